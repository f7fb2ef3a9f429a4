//! Turn-order and encounter projections with live character data.

use std::collections::HashMap;

use taleforge_domain::{CharacterId, Combatant, Encounter};
use taleforge_shared::{
    ActingCombatant, CurrentTurnRef, EncounterView, TurnOrderEntry, UNKNOWN_CHARACTER,
};

use crate::infrastructure::ports::{CharacterProfile, CharacterRepo, RepoError};

/// Character profiles for everyone who ever joined an encounter, loaded once per call.
#[derive(Debug, Default)]
pub(crate) struct Roster {
    profiles: HashMap<CharacterId, CharacterProfile>,
}

impl Roster {
    pub(crate) async fn load(
        characters: &dyn CharacterRepo,
        encounter: &Encounter,
    ) -> Result<Self, RepoError> {
        let mut profiles = HashMap::new();
        for combatant in encounter.combatants() {
            let id = combatant.character_id;
            if profiles.contains_key(&id) {
                continue;
            }
            if let Some(profile) = characters.get_profile(id).await? {
                profiles.insert(id, profile);
            }
        }
        Ok(Self { profiles })
    }

    pub(crate) fn from_profiles(profiles: HashMap<CharacterId, CharacterProfile>) -> Self {
        Self { profiles }
    }

    pub(crate) fn name(&self, id: CharacterId) -> String {
        self.profiles
            .get(&id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_CHARACTER.to_string())
    }

    pub(crate) fn acting(&self, combatant: &Combatant) -> ActingCombatant {
        let profile = self.profiles.get(&combatant.character_id);
        ActingCombatant {
            character_id: combatant.character_id.to_string(),
            name: self.name(combatant.character_id),
            hp: profile.and_then(CharacterProfile::hp_display),
            statuses: profile.map(|p| p.statuses.clone()).unwrap_or_default(),
        }
    }
}

/// Named turn order. `is_current` is positional: the entry at `current_turn mod len`.
pub(crate) fn turn_order_entries(encounter: &Encounter, roster: &Roster) -> Vec<TurnOrderEntry> {
    let order = encounter.turn_order();
    let current = encounter.current_index(order.len());
    order
        .iter()
        .enumerate()
        .map(|(idx, c)| TurnOrderEntry {
            character_id: c.character_id.to_string(),
            name: roster.name(c.character_id),
            initiative: c.initiative,
            is_current: Some(idx) == current,
            is_active: c.is_active,
            notes: c.notes.clone(),
        })
        .collect()
}

pub(crate) fn encounter_view(encounter: &Encounter, roster: &Roster) -> EncounterView {
    let current = encounter.current_combatant();
    EncounterView {
        id: encounter.id().to_string(),
        world_id: encounter.world_id().to_string(),
        name: encounter.name().to_string(),
        status: encounter.status(),
        encounter_type: encounter.encounter_type(),
        location_id: encounter.location_id().map(|l| l.to_string()),
        round: encounter.round_number(),
        current_turn: CurrentTurnRef {
            character_id: current.as_ref().map(|c| c.character_id.to_string()),
            name: current.as_ref().map(|c| roster.name(c.character_id)),
        },
        turn_order: turn_order_entries(encounter, roster),
        total_combatants: encounter.combatants().len(),
        active_combatants: encounter.active_count(),
        tags: encounter.tags().to_vec(),
        started_at: encounter.started_at().seconds(),
        started_at_display: encounter.started_at().to_string(),
        ended_at: encounter.ended_at().map(|t| t.seconds()),
        ended_at_display: encounter.ended_at().map(|t| t.to_string()),
        summary: encounter.summary().to_string(),
        metadata: encounter
            .metadata()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use taleforge_domain::{EncounterType, NarrativeTime, WorldId};

    #[test]
    fn unknown_characters_render_as_unknown() {
        let known = CharacterId::new();
        let gone = CharacterId::new();
        let mut encounter = Encounter::new(
            WorldId::new(),
            "Skirmish",
            EncounterType::Combat,
            NarrativeTime::from_seconds(28_800),
            Utc::now(),
        );
        encounter
            .add_combatant(known, 10.0, "", Utc::now())
            .expect("add");
        encounter
            .add_combatant(gone, 20.0, "", Utc::now())
            .expect("add");

        let roster = Roster::from_profiles(HashMap::from([(
            known,
            CharacterProfile::named("Brakka"),
        )]));
        let view = encounter_view(&encounter, &roster);

        let names: Vec<&str> = view.turn_order.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![UNKNOWN_CHARACTER, "Brakka"]);
        assert!(view.turn_order[0].is_current);
        assert!(!view.turn_order[1].is_current);
        assert_eq!(view.current_turn.name.as_deref(), Some(UNKNOWN_CHARACTER));
        assert_eq!(view.started_at_display, "Day 1, 8:00 AM");
        assert_eq!(view.ended_at, None);
    }

    #[test]
    fn empty_encounter_has_no_current_turn() {
        let encounter = Encounter::new(
            WorldId::new(),
            "Quiet",
            EncounterType::Social,
            NarrativeTime::default(),
            Utc::now(),
        );
        let view = encounter_view(&encounter, &Roster::default());
        assert!(view.turn_order.is_empty());
        assert_eq!(view.current_turn.character_id, None);
        assert_eq!(view.active_combatants, 0);
    }
}
