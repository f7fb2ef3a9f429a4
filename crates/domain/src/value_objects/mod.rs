//! Value objects - Immutable objects defined by their attributes

mod combatant;

pub use combatant::{derive_turn_order, Combatant};
