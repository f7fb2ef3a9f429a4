//! Add combatant use case.

use std::sync::Arc;

use taleforge_domain::{CharacterId, CombatantAdded, EncounterId};
use taleforge_shared::CombatantAddedView;

use super::error::EncounterError;
use crate::infrastructure::ports::{CharacterRepo, ClockPort, EncounterRepo};

pub struct AddCombatant {
    encounters: Arc<dyn EncounterRepo>,
    characters: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl AddCombatant {
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

    /// Seat a character. `current_turn` is not touched.
    pub async fn execute(
        &self,
        encounter_id: EncounterId,
        character_id: CharacterId,
        initiative: f64,
        notes: String,
    ) -> Result<CombatantAddedView, EncounterError> {
        let mut encounter = self
            .encounters
            .get(encounter_id)
            .await?
            .ok_or_else(|| EncounterError::encounter_not_found(encounter_id))?;
        let profile = self
            .characters
            .get_profile(character_id)
            .await?
            .ok_or_else(|| EncounterError::not_found("Character", character_id))?;

        let added = encounter.add_combatant(character_id, initiative, notes, self.clock.now())?;
        self.encounters.update(&encounter).await?;

        let reactivated = added == CombatantAdded::Reactivated;
        tracing::debug!(
            encounter_id = %encounter_id,
            character_id = %character_id,
            initiative,
            reactivated,
            "Combatant added"
        );

        Ok(CombatantAddedView {
            added: profile.name,
            character_id: character_id.to_string(),
            initiative,
            reactivated,
        })
    }
}
