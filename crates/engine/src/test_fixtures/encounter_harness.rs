//! In-memory wiring of the encounter use cases for multi-step tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use taleforge_domain::{CharacterId, Encounter, EncounterId, WorldId};

use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::ports::{CharacterProfile, EncounterRepo};
use crate::use_cases::encounter::{EncounterUseCases, StartEncounterInput};

pub struct EncounterHarness {
    pub store: Arc<InMemoryStore>,
    use_cases: EncounterUseCases,
}

impl EncounterHarness {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        ));
        let use_cases = EncounterUseCases::new(store.clone(), store.clone(), store.clone(), clock);
        Self { store, use_cases }
    }

    pub fn use_cases(&self) -> &EncounterUseCases {
        &self.use_cases
    }

    /// Seed a character with just a name.
    pub fn character(&self, name: &str) -> CharacterId {
        let id = CharacterId::new();
        self.store.seed_character(id, CharacterProfile::named(name));
        id
    }

    /// Start an encounter in a fresh world.
    pub async fn started_with(
        &self,
        combatants: &[(&str, f64)],
    ) -> (EncounterId, Vec<CharacterId>) {
        self.started_in(WorldId::new(), combatants).await
    }

    /// Start an encounter with the named combatants, in order, and set
    /// their initiatives. `current_turn` is left at 0.
    pub async fn started_in(
        &self,
        world_id: WorldId,
        combatants: &[(&str, f64)],
    ) -> (EncounterId, Vec<CharacterId>) {
        let ids: Vec<CharacterId> = combatants
            .iter()
            .map(|(name, _)| self.character(name))
            .collect();

        let started = self
            .use_cases
            .start
            .execute(StartEncounterInput {
                world_id,
                combatant_ids: ids.clone(),
                ..Default::default()
            })
            .await
            .expect("start encounter");
        let encounter_id: EncounterId = started.encounter.id.parse().expect("encounter id");

        for (id, (_, initiative)) in ids.iter().zip(combatants) {
            self.use_cases
                .set_initiative
                .execute(encounter_id, *id, *initiative)
                .await
                .expect("set initiative");
        }

        (encounter_id, ids)
    }

    pub async fn advance(&self, encounter_id: EncounterId) {
        self.use_cases
            .next_turn
            .execute(encounter_id)
            .await
            .expect("next turn");
    }

    pub async fn stored(&self, encounter_id: EncounterId) -> Encounter {
        self.store
            .get(encounter_id)
            .await
            .expect("get")
            .expect("encounter stored")
    }
}
