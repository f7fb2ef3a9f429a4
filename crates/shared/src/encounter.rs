//! Encounter payloads returned by the tools.
//!
//! Names, hit points and statuses are resolved from the character store at
//! call time; nothing here is cached on the encounter.

use serde::{Deserialize, Serialize};
use taleforge_domain::{EncounterStatus, EncounterType};

/// Display name used when a combatant's character can no longer be found.
pub const UNKNOWN_CHARACTER: &str = "Unknown";

/// One row of the derived turn order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOrderEntry {
    pub character_id: String,
    pub name: String,
    pub initiative: f64,
    pub is_current: bool,
    pub is_active: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentTurnRef {
    pub character_id: Option<String>,
    pub name: Option<String>,
}

/// Full encounter state as shown to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterView {
    pub id: String,
    pub world_id: String,
    pub name: String,
    pub status: EncounterStatus,
    pub encounter_type: EncounterType,
    pub location_id: Option<String>,
    pub round: u32,
    pub current_turn: CurrentTurnRef,
    pub turn_order: Vec<TurnOrderEntry>,
    pub total_combatants: usize,
    pub active_combatants: usize,
    pub tags: Vec<String>,
    pub started_at: i64,
    pub started_at_display: String,
    pub ended_at: Option<i64>,
    pub ended_at_display: Option<String>,
    pub summary: String,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterStarted {
    pub encounter: EncounterView,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEncounterLookup {
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter: Option<EncounterView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantAddedView {
    pub added: String,
    pub character_id: String,
    pub initiative: f64,
    /// True when a departed combatant was brought back instead of appended.
    pub reactivated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiativeSet {
    pub set: String,
    pub initiative: f64,
    pub turn_order: Vec<TurnOrderEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantRemoved {
    pub removed: String,
    pub character_id: String,
    pub reason: String,
    pub active_combatants: usize,
}

/// The combatant now acting, with live character state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActingCombatant {
    pub character_id: String,
    pub name: String,
    /// `"current/max"`, or `None` when the character has no HP attribute.
    pub hp: Option<String>,
    pub statuses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnAdvanced {
    pub round: u32,
    /// True when this advance started a new round.
    pub wrapped: bool,
    pub current_turn: ActingCombatant,
    pub turn_order: Vec<TurnOrderEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterEnded {
    pub ended: String,
    pub rounds: u32,
    pub outcome: String,
    pub summary: String,
    pub started_at: i64,
    pub ended_at: i64,
    pub ended_at_display: String,
}
