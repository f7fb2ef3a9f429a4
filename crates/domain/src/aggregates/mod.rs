//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome values from mutations

pub mod encounter;

pub use encounter::{CombatantAdded, Encounter, EncounterStatus, EncounterType, TurnAdvance};
