//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate the port traits to fulfill user stories.

pub mod encounter;

pub use encounter::EncounterUseCases;
