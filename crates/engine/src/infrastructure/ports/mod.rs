//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for:
//! - Encounter persistence (SQLite or in-memory)
//! - Character lookup and world time (owned by other subsystems)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;
pub mod types;

pub use repos::{CharacterRepo, EncounterRepo, WorldTimeRepo};
pub use types::CharacterProfile;

#[cfg(test)]
pub use repos::{MockCharacterRepo, MockEncounterRepo, MockWorldTimeRepo};

pub use testing::ClockPort;

pub use error::RepoError;
