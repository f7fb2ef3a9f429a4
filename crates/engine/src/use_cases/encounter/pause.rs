//! Pause / resume use cases.

use std::sync::Arc;

use taleforge_domain::EncounterId;
use taleforge_shared::EncounterView;

use super::error::EncounterError;
use super::view::{encounter_view, Roster};
use crate::infrastructure::ports::{CharacterRepo, ClockPort, EncounterRepo};

pub struct PauseEncounter {
    encounters: Arc<dyn EncounterRepo>,
    characters: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl PauseEncounter {
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
    ) -> Result<EncounterView, EncounterError> {
        let mut encounter = self
            .encounters
            .get(encounter_id)
            .await?
            .ok_or_else(|| EncounterError::encounter_not_found(encounter_id))?;

        encounter.pause(self.clock.now())?;
        self.encounters.update(&encounter).await?;
        tracing::info!(
            encounter_id = %encounter_id,
            round = encounter.round_number(),
            "Encounter paused"
        );

        let roster = Roster::load(self.characters.as_ref(), &encounter).await?;
        Ok(encounter_view(&encounter, &roster))
    }
}

/// Resume a paused encounter. The world must not have another active one.
pub struct ResumeEncounter {
    encounters: Arc<dyn EncounterRepo>,
    characters: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ResumeEncounter {
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
    ) -> Result<EncounterView, EncounterError> {
        let mut encounter = self
            .encounters
            .get(encounter_id)
            .await?
            .ok_or_else(|| EncounterError::encounter_not_found(encounter_id))?;

        encounter.resume(self.clock.now())?;

        if let Some(other) = self
            .encounters
            .find_active_for_world(encounter.world_id())
            .await?
            .filter(|other| other.id() != encounter_id)
        {
            return Err(EncounterError::Conflict(format!(
                "World already has an active encounter: '{}' ({})",
                other.name(),
                other.id()
            )));
        }

        self.encounters.update(&encounter).await?;
        tracing::info!(
            encounter_id = %encounter_id,
            round = encounter.round_number(),
            "Encounter resumed"
        );

        let roster = Roster::load(self.characters.as_ref(), &encounter).await?;
        Ok(encounter_view(&encounter, &roster))
    }
}
