//! Read-only encounter queries.

use std::sync::Arc;

use taleforge_domain::{EncounterId, WorldId};
use taleforge_shared::{ActiveEncounterLookup, EncounterView};

use super::error::EncounterError;
use super::view::{encounter_view, Roster};
use crate::infrastructure::ports::{CharacterRepo, EncounterRepo};

pub struct GetEncounter {
    encounters: Arc<dyn EncounterRepo>,
    characters: Arc<dyn CharacterRepo>,
}

impl GetEncounter {
    pub fn new(encounters: Arc<dyn EncounterRepo>, characters: Arc<dyn CharacterRepo>) -> Self {
        Self {
            encounters,
            characters,
        }
    }

    pub async fn execute(&self, id: EncounterId) -> Result<EncounterView, EncounterError> {
        let encounter = self
            .encounters
            .get(id)
            .await?
            .ok_or_else(|| EncounterError::encounter_not_found(id))?;
        let roster = Roster::load(self.characters.as_ref(), &encounter).await?;
        Ok(encounter_view(&encounter, &roster))
    }
}

/// The active encounter for a world. "None active" is a normal result.
pub struct GetActiveEncounter {
    encounters: Arc<dyn EncounterRepo>,
    characters: Arc<dyn CharacterRepo>,
}

impl GetActiveEncounter {
    pub fn new(encounters: Arc<dyn EncounterRepo>, characters: Arc<dyn CharacterRepo>) -> Self {
        Self {
            encounters,
            characters,
        }
    }

    pub async fn execute(
        &self,
        world_id: WorldId,
    ) -> Result<ActiveEncounterLookup, EncounterError> {
        let Some(encounter) = self.encounters.find_active_for_world(world_id).await? else {
            return Ok(ActiveEncounterLookup {
                active: false,
                encounter: None,
                message: Some("No active encounter".to_string()),
            });
        };

        let roster = Roster::load(self.characters.as_ref(), &encounter).await?;
        Ok(ActiveEncounterLookup {
            active: true,
            encounter: Some(encounter_view(&encounter, &roster)),
            message: None,
        })
    }
}
