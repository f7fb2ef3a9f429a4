//! Tool requests.
//!
//! One variant per exposed tool. The wire shape is
//! `{"tool": "<snake_case name>", "arguments": {...}}`; ids travel as strings
//! and are parsed by the engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "arguments", rename_all = "snake_case")]
pub enum EncounterRequest {
    StartEncounter {
        world_id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        location_id: Option<String>,
        #[serde(default)]
        encounter_type: Option<String>,
        #[serde(default)]
        combatant_ids: Vec<String>,
        #[serde(default)]
        tags: Vec<String>,
    },
    GetEncounter {
        encounter_id: String,
    },
    GetActiveEncounter {
        world_id: String,
    },
    AddCombatant {
        encounter_id: String,
        character_id: String,
        #[serde(default)]
        initiative: f64,
        #[serde(default)]
        notes: String,
    },
    SetInitiative {
        encounter_id: String,
        character_id: String,
        initiative: f64,
    },
    RemoveCombatant {
        encounter_id: String,
        character_id: String,
        #[serde(default)]
        reason: String,
    },
    NextTurn {
        encounter_id: String,
    },
    EndEncounter {
        encounter_id: String,
        #[serde(default)]
        summary: String,
        #[serde(default)]
        outcome: String,
    },
    PauseEncounter {
        encounter_id: String,
    },
    ResumeEncounter {
        encounter_id: String,
    },
}

impl EncounterRequest {
    /// Wire name of the tool this request invokes.
    pub fn tool_name(&self) -> &'static str {
        match self {
            EncounterRequest::StartEncounter { .. } => "start_encounter",
            EncounterRequest::GetEncounter { .. } => "get_encounter",
            EncounterRequest::GetActiveEncounter { .. } => "get_active_encounter",
            EncounterRequest::AddCombatant { .. } => "add_combatant",
            EncounterRequest::SetInitiative { .. } => "set_initiative",
            EncounterRequest::RemoveCombatant { .. } => "remove_combatant",
            EncounterRequest::NextTurn { .. } => "next_turn",
            EncounterRequest::EndEncounter { .. } => "end_encounter",
            EncounterRequest::PauseEncounter { .. } => "pause_encounter",
            EncounterRequest::ResumeEncounter { .. } => "resume_encounter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_arguments_take_defaults() {
        let req: EncounterRequest = serde_json::from_value(json!({
            "tool": "add_combatant",
            "arguments": {"encounter_id": "e", "character_id": "c"}
        }))
        .expect("deserialize");

        assert_eq!(
            req,
            EncounterRequest::AddCombatant {
                encounter_id: "e".into(),
                character_id: "c".into(),
                initiative: 0.0,
                notes: String::new(),
            }
        );
        assert_eq!(req.tool_name(), "add_combatant");
    }

    #[test]
    fn start_encounter_accepts_only_world_id() {
        let req: EncounterRequest = serde_json::from_value(json!({
            "tool": "start_encounter",
            "arguments": {"world_id": "w"}
        }))
        .expect("deserialize");

        match req {
            EncounterRequest::StartEncounter {
                name,
                combatant_ids,
                tags,
                ..
            } => {
                assert!(name.is_none());
                assert!(combatant_ids.is_empty());
                assert!(tags.is_empty());
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn unknown_tool_is_rejected() {
        let result = serde_json::from_value::<EncounterRequest>(json!({
            "tool": "roll_dice",
            "arguments": {"formula": "1d20"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn set_initiative_requires_a_value() {
        let result = serde_json::from_value::<EncounterRequest>(json!({
            "tool": "set_initiative",
            "arguments": {"encounter_id": "e", "character_id": "c"}
        }));
        assert!(result.is_err());
    }
}
