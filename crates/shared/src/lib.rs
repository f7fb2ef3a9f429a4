//! Taleforge Protocol - wire types for the encounter tool surface
//!
//! This crate contains the types exchanged between callers and the engine:
//! - `EncounterRequest`, the closed set of tools
//! - `ResponseResult` / `ErrorCode`, the response envelope
//! - Encounter payload DTOs
//! - The tool catalog (names, descriptions, input schemas)
//!
//! # Design Principles
//!
//! 1. **No business logic** - Pure data types and serialization
//! 2. **String ids on the wire** - the engine parses them into domain ids

pub mod encounter;
pub mod requests;
pub mod responses;
pub mod tools;

pub use encounter::{
    ActingCombatant, ActiveEncounterLookup, CombatantAddedView, CombatantRemoved,
    CurrentTurnRef, EncounterEnded, EncounterStarted, EncounterView, InitiativeSet,
    TurnAdvanced, TurnOrderEntry, UNKNOWN_CHARACTER,
};
pub use requests::EncounterRequest;
pub use responses::{ErrorCode, ResponseResult};
pub use tools::{tool_catalog, ToolDescriptor};
