//! Remove combatant use case.
//!
//! Removal is a deactivation: the record stays with the reason in `notes`.

use std::sync::Arc;

use taleforge_domain::{CharacterId, EncounterId};
use taleforge_shared::{CombatantRemoved, UNKNOWN_CHARACTER};

use super::error::EncounterError;
use crate::infrastructure::ports::{CharacterRepo, ClockPort, EncounterRepo};

pub struct RemoveCombatant {
    encounters: Arc<dyn EncounterRepo>,
    characters: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl RemoveCombatant {
    pub fn new(
        encounters: Arc<dyn EncounterRepo>,
        characters: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            encounters,
            characters,
            clock,
        }
    }

    pub async fn execute(
        &self,
        encounter_id: EncounterId,
        character_id: CharacterId,
        reason: String,
    ) -> Result<CombatantRemoved, EncounterError> {
        let mut encounter = self
            .encounters
            .get(encounter_id)
            .await?
            .ok_or_else(|| EncounterError::encounter_not_found(encounter_id))?;

        let removed = encounter.deactivate_combatant(character_id, reason, self.clock.now())?;
        self.encounters.update(&encounter).await?;

        let name = self
            .characters
            .get_profile(character_id)
            .await?
            .map(|p| p.name)
            .unwrap_or_else(|| UNKNOWN_CHARACTER.to_string());

        tracing::debug!(
            encounter_id = %encounter_id,
            character_id = %character_id,
            reason = %removed.notes,
            active_combatants = encounter.active_count(),
            "Combatant removed"
        );

        Ok(CombatantRemoved {
            removed: name,
            character_id: character_id.to_string(),
            reason: removed.notes,
            active_combatants: encounter.active_count(),
        })
    }
}
