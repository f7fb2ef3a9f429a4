//! Shared helpers for engine tests.

mod encounter_harness;

pub use encounter_harness::EncounterHarness;
