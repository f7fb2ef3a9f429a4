//! Tool catalog: names, descriptions and JSON input schemas for every
//! encounter tool, in the order they are listed to callers.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDescriptor {
    fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

fn id_field(what: &str) -> Value {
    json!({"type": "string", "description": format!("{what} id (UUID string, not a name)")})
}

fn encounter_only(description: &str, name: &str) -> ToolDescriptor {
    ToolDescriptor::new(
        name,
        description,
        json!({
            "type": "object",
            "properties": {"encounter_id": id_field("Encounter")},
            "required": ["encounter_id"],
        }),
    )
}

pub fn tool_catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "start_encounter",
            "Start a new encounter (combat, chase, social challenge). Optionally adds combatants at initiative 0.",
            json!({
                "type": "object",
                "properties": {
                    "world_id": id_field("World"),
                    "name": {"type": "string", "description": "Encounter name (e.g. 'Ambush at the Bridge')"},
                    "location_id": id_field("Location"),
                    "encounter_type": {"type": "string", "enum": ["combat", "chase", "social", "custom"], "default": "combat"},
                    "combatant_ids": {"type": "array", "items": {"type": "string"}, "description": "Character ids (not names)"},
                    "tags": {"type": "array", "items": {"type": "string"}},
                },
                "required": ["world_id"],
            }),
        ),
        encounter_only(
            "Get encounter state including turn order, current combatant and round number",
            "get_encounter",
        ),
        ToolDescriptor::new(
            "get_active_encounter",
            "Get the active encounter for a world (if any)",
            json!({
                "type": "object",
                "properties": {"world_id": id_field("World")},
                "required": ["world_id"],
            }),
        ),
        ToolDescriptor::new(
            "add_combatant",
            "Add a character to an encounter with optional initiative. A departed combatant is brought back.",
            json!({
                "type": "object",
                "properties": {
                    "encounter_id": id_field("Encounter"),
                    "character_id": id_field("Character"),
                    "initiative": {"type": "number", "description": "Initiative value (higher goes first)"},
                    "notes": {"type": "string", "description": "GM notes for this combatant"},
                },
                "required": ["encounter_id", "character_id"],
            }),
        ),
        ToolDescriptor::new(
            "set_initiative",
            "Set or update initiative for a combatant and return the new turn order",
            json!({
                "type": "object",
                "properties": {
                    "encounter_id": id_field("Encounter"),
                    "character_id": id_field("Character"),
                    "initiative": {"type": "number", "description": "Initiative value"},
                },
                "required": ["encounter_id", "character_id", "initiative"],
            }),
        ),
        ToolDescriptor::new(
            "remove_combatant",
            "Take a combatant out of the encounter (fled, captured, etc.). The record is kept; the character is not deleted.",
            json!({
                "type": "object",
                "properties": {
                    "encounter_id": id_field("Encounter"),
                    "character_id": id_field("Character"),
                    "reason": {"type": "string", "description": "Why removed (fled, surrendered, etc.)"},
                },
                "required": ["encounter_id", "character_id"],
            }),
        ),
        encounter_only(
            "Advance to the next combatant's turn. Increments the round when the order wraps.",
            "next_turn",
        ),
        ToolDescriptor::new(
            "end_encounter",
            "End an encounter with optional summary and outcome",
            json!({
                "type": "object",
                "properties": {
                    "encounter_id": id_field("Encounter"),
                    "summary": {"type": "string", "description": "Summary of what happened"},
                    "outcome": {"type": "string", "description": "victory, defeat, fled, negotiated, etc."},
                },
                "required": ["encounter_id"],
            }),
        ),
        encounter_only("Pause an active encounter", "pause_encounter"),
        encounter_only("Resume a paused encounter", "resume_encounter"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EncounterRequest;

    #[test]
    fn catalog_names_are_unique() {
        let catalog = tool_catalog();
        let mut names: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn every_catalog_entry_is_a_request_variant() {
        for tool in tool_catalog() {
            let required = tool.input_schema["required"]
                .as_array()
                .cloned()
                .unwrap_or_default();
            let mut arguments = serde_json::Map::new();
            for field in required {
                let field = field.as_str().unwrap_or_default().to_string();
                let value = if field == "initiative" { json!(1.0) } else { json!("x") };
                arguments.insert(field, value);
            }

            let request: EncounterRequest = serde_json::from_value(json!({
                "tool": tool.name,
                "arguments": arguments,
            }))
            .unwrap_or_else(|e| panic!("{} does not deserialize: {e}", tool.name));
            assert_eq!(request.tool_name(), tool.name);
        }
    }
}
