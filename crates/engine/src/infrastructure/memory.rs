//! In-memory store backed by `DashMap`.
//!
//! Same semantics as the SQLite adapter: versioned conditional updates and at
//! most one active encounter per world. Used for `STORE_BACKEND=memory` and
//! for multi-step tests.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use taleforge_domain::{CharacterId, Encounter, EncounterId, NarrativeTime, WorldId};

use crate::infrastructure::ports::{
    CharacterProfile, CharacterRepo, EncounterRepo, RepoError, WorldTimeRepo,
};

#[derive(Default)]
pub struct InMemoryStore {
    encounters: DashMap<EncounterId, Encounter>,
    /// world -> its single active encounter
    active_by_world: DashMap<WorldId, EncounterId>,
    characters: DashMap<CharacterId, CharacterProfile>,
    game_times: DashMap<WorldId, NarrativeTime>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_character(&self, id: CharacterId, profile: CharacterProfile) {
        self.characters.insert(id, profile);
    }

    pub fn set_game_time(&self, world_id: WorldId, time: NarrativeTime) {
        self.game_times.insert(world_id, time);
    }

    pub fn encounter_count(&self) -> usize {
        self.encounters.len()
    }

    /// Point the world's active slot at `encounter_id`, failing if another
    /// encounter holds it.
    fn claim_active(&self, world_id: WorldId, encounter_id: EncounterId) -> Result<(), RepoError> {
        match self.active_by_world.entry(world_id) {
            Entry::Occupied(held) if *held.get() != encounter_id => {
                Err(RepoError::conflict("Encounter", encounter_id))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(encounter_id);
                Ok(())
            }
        }
    }

    fn release_active(&self, world_id: WorldId, encounter_id: EncounterId) {
        self.active_by_world
            .remove_if(&world_id, |_, held| *held == encounter_id);
    }
}

#[async_trait]
impl EncounterRepo for InMemoryStore {
    async fn insert(&self, encounter: &Encounter) -> Result<(), RepoError> {
        let id = encounter.id();
        match self.encounters.entry(id) {
            Entry::Occupied(_) => Err(RepoError::conflict("Encounter", id)),
            Entry::Vacant(slot) => {
                if encounter.is_active() {
                    self.claim_active(encounter.world_id(), id)?;
                }
                slot.insert(encounter.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, id: EncounterId) -> Result<Option<Encounter>, RepoError> {
        Ok(self.encounters.get(&id).map(|e| e.value().clone()))
    }

    async fn find_active_for_world(
        &self,
        world_id: WorldId,
    ) -> Result<Option<Encounter>, RepoError> {
        // Copy the id out so no guard on the index is held while reading encounters.
        let Some(id) = self.active_by_world.get(&world_id).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self
            .encounters
            .get(&id)
            .map(|e| e.value().clone())
            .filter(Encounter::is_active))
    }

    async fn update(&self, encounter: &Encounter) -> Result<(), RepoError> {
        let id = encounter.id();
        let mut stored = self
            .encounters
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Encounter", id))?;

        if stored.version() != encounter.version() {
            return Err(RepoError::conflict("Encounter", id));
        }

        if encounter.is_active() {
            self.claim_active(encounter.world_id(), id)?;
        } else {
            self.release_active(encounter.world_id(), id);
        }

        *stored = encounter.clone().with_version(encounter.version() + 1);
        Ok(())
    }
}

#[async_trait]
impl CharacterRepo for InMemoryStore {
    async fn get_profile(&self, id: CharacterId) -> Result<Option<CharacterProfile>, RepoError> {
        Ok(self.characters.get(&id).map(|p| p.value().clone()))
    }
}

#[async_trait]
impl WorldTimeRepo for InMemoryStore {
    async fn current_game_time(&self, world_id: WorldId) -> Result<NarrativeTime, RepoError> {
        Ok(self
            .game_times
            .get(&world_id)
            .map(|t| *t.value())
            .unwrap_or_default())
    }
}
