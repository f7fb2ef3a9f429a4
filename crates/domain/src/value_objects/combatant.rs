//! Combatant - a character's seat in an encounter.

use serde::{Deserialize, Serialize};

use crate::CharacterId;

/// A participant entry in an encounter.
///
/// Combatants only reference characters; hit points and statuses live on the
/// character and are resolved at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub character_id: CharacterId,
    /// Higher acts first. Not required to be unique or integral.
    #[serde(default)]
    pub initiative: f64,
    /// False once the combatant has fled, been captured, died, etc.
    /// The record itself is kept for history.
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub notes: String,
}

fn default_active() -> bool {
    true
}

impl Combatant {
    pub fn new(character_id: CharacterId) -> Self {
        Self {
            character_id,
            initiative: 0.0,
            is_active: true,
            notes: String::new(),
        }
    }

    pub fn with_initiative(mut self, initiative: f64) -> Self {
        self.initiative = initiative;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Derive the turn order from a raw combatant list.
///
/// Active combatants only, highest initiative first. The sort is stable, so
/// tied combatants keep their relative order from `combatants` and repeated
/// calls on unchanged data give identical results.
pub fn derive_turn_order(combatants: &[Combatant]) -> Vec<Combatant> {
    let mut order: Vec<Combatant> = combatants.iter().filter(|c| c.is_active).cloned().collect();
    order.sort_by(|a, b| b.initiative.total_cmp(&a.initiative));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combatant(initiative: f64) -> Combatant {
        Combatant::new(CharacterId::new()).with_initiative(initiative)
    }

    #[test]
    fn orders_by_initiative_descending() {
        let low = combatant(3.0);
        let high = combatant(18.0);
        let mid = combatant(11.5);

        let order = derive_turn_order(&[low.clone(), high.clone(), mid.clone()]);

        assert_eq!(order, vec![high, mid, low]);
    }

    #[test]
    fn ties_keep_list_order() {
        let first = combatant(10.0);
        let second = combatant(10.0);
        let third = combatant(10.0);
        let list = vec![first.clone(), second.clone(), third.clone()];

        let once = derive_turn_order(&list);
        let twice = derive_turn_order(&list);

        assert_eq!(once, vec![first, second, third]);
        assert_eq!(once, twice);
    }

    #[test]
    fn skips_inactive_combatants() {
        let fled = Combatant {
            is_active: false,
            ..combatant(20.0)
        };
        let standing = combatant(5.0);

        let order = derive_turn_order(&[fled, standing.clone()]);

        assert_eq!(order, vec![standing]);
    }

    #[test]
    fn empty_list_gives_empty_order() {
        assert!(derive_turn_order(&[]).is_empty());
    }

    #[test]
    fn missing_fields_take_defaults_when_deserializing() {
        let id = CharacterId::new();
        let json = format!(r#"{{"character_id":"{id}"}}"#);
        let c: Combatant = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(c, Combatant::new(id));
    }
}
