//! Taleforge domain - encounter aggregate, identifiers and narrative time.
//!
//! This crate has no I/O. Persistence, character lookup and the world clock
//! are ports owned by the engine.

pub mod aggregates;
pub mod error;
pub mod ids;
pub mod narrative_time;
pub mod value_objects;

pub use aggregates::{
    CombatantAdded, Encounter, EncounterStatus, EncounterType, TurnAdvance,
};
pub use error::DomainError;
pub use ids::{CharacterId, EncounterId, LocationId, WorldId};
pub use narrative_time::{NarrativeTime, TimeBreakdown, ROUND_SECONDS};
pub use value_objects::{derive_turn_order, Combatant};
