//! Start encounter use case.
//!
//! Creates an active encounter stamped with the world's narrative time and
//! seats the requested characters at initiative 0.

use std::collections::HashMap;
use std::sync::Arc;

use taleforge_domain::{CharacterId, Encounter, EncounterType, LocationId, WorldId};
use taleforge_shared::EncounterStarted;

use super::error::EncounterError;
use super::view::{encounter_view, Roster};
use crate::infrastructure::ports::{CharacterRepo, ClockPort, EncounterRepo, WorldTimeRepo};

const DEFAULT_NAME: &str = "Encounter";

#[derive(Debug, Clone, Default)]
pub struct StartEncounterInput {
    pub world_id: WorldId,
    pub name: Option<String>,
    pub location_id: Option<LocationId>,
    pub encounter_type: EncounterType,
    pub combatant_ids: Vec<CharacterId>,
    pub tags: Vec<String>,
}

pub struct StartEncounter {
    encounters: Arc<dyn EncounterRepo>,
    characters: Arc<dyn CharacterRepo>,
    world_time: Arc<dyn WorldTimeRepo>,
    clock: Arc<dyn ClockPort>,
}

impl StartEncounter {
    pub fn new(
        encounters: Arc<dyn EncounterRepo>,
        characters: Arc<dyn CharacterRepo>,
        world_time: Arc<dyn WorldTimeRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            encounters,
            characters,
            world_time,
            clock,
        }
    }

    /// Start an encounter.
    ///
    /// Unknown character ids are skipped, as are repeats of the same id.
    /// Fails with `Conflict` if the world already has an active encounter.
    pub async fn execute(
        &self,
        input: StartEncounterInput,
    ) -> Result<EncounterStarted, EncounterError> {
        let world_id = input.world_id;

        if let Some(existing) = self.encounters.find_active_for_world(world_id).await? {
            return Err(already_active(&existing));
        }

        let started_at = self.world_time.current_game_time(world_id).await?;

        let mut profiles = HashMap::new();
        let mut seated = Vec::new();
        for character_id in input.combatant_ids {
            if profiles.contains_key(&character_id) {
                tracing::debug!(character_id = %character_id, "Skipping repeated combatant id");
                continue;
            }
            match self.characters.get_profile(character_id).await? {
                Some(profile) => {
                    profiles.insert(character_id, profile);
                    seated.push(character_id);
                }
                None => {
                    tracing::debug!(
                        character_id = %character_id,
                        "Skipping unknown character in start_encounter"
                    );
                }
            }
        }

        let name = input
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        let encounter = Encounter::new(
            world_id,
            name,
            input.encounter_type,
            started_at,
            self.clock.now(),
        )
        .with_location(input.location_id)
        .with_tags(input.tags)
        .with_combatants(seated);

        self.encounters.insert(&encounter).await.map_err(|e| {
            if e.is_conflict() {
                // Lost a race with another start for the same world.
                EncounterError::Conflict(format!(
                    "World {} already has an active encounter",
                    world_id
                ))
            } else {
                e.into()
            }
        })?;

        tracing::info!(
            encounter_id = %encounter.id(),
            world_id = %world_id,
            encounter_type = %encounter.encounter_type(),
            combatants = encounter.combatants().len(),
            started_at = %encounter.started_at(),
            "Encounter started"
        );

        let roster = Roster::from_profiles(profiles);
        Ok(EncounterStarted {
            message: format!(
                "Encounter '{}' started with {} combatants. Set initiative for each, then use next_turn to begin.",
                encounter.name(),
                encounter.combatants().len()
            ),
            encounter: encounter_view(&encounter, &roster),
        })
    }
}

fn already_active(existing: &Encounter) -> EncounterError {
    EncounterError::Conflict(format!(
        "World already has an active encounter: '{}' ({})",
        existing.name(),
        existing.id()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{
        CharacterProfile, MockCharacterRepo, MockEncounterRepo, MockWorldTimeRepo, RepoError,
    };
    use crate::test_fixtures::EncounterHarness;
    use chrono::Utc;
    use taleforge_domain::{EncounterStatus, NarrativeTime};

    #[tokio::test]
    async fn starts_active_at_world_time_with_initial_combatants() {
        let harness = EncounterHarness::new();
        let world = WorldId::new();
        harness.store.set_game_time(world, NarrativeTime::from_seconds(30_600));
        let archer = harness.character("Archer");
        let brute = harness.character("Brute");

        let started = harness
            .use_cases()
            .start
            .execute(StartEncounterInput {
                world_id: world,
                name: Some("Ambush at the Bridge".into()),
                combatant_ids: vec![archer, brute],
                tags: vec!["bridge".into()],
                ..Default::default()
            })
            .await
            .expect("start");

        let view = &started.encounter;
        assert_eq!(view.status, EncounterStatus::Active);
        assert_eq!(view.round, 1);
        assert_eq!(view.started_at, 30_600);
        assert_eq!(view.started_at_display, "Day 1, 8:30 AM");
        assert_eq!(view.total_combatants, 2);
        assert!(view.turn_order.iter().all(|e| e.initiative == 0.0));
        assert_eq!(view.turn_order[0].name, "Archer");
        assert_eq!(
            started.message,
            "Encounter 'Ambush at the Bridge' started with 2 combatants. Set initiative for each, then use next_turn to begin."
        );
        assert_eq!(harness.store.encounter_count(), 1);
    }

    #[tokio::test]
    async fn unknown_and_repeated_ids_are_skipped() {
        let harness = EncounterHarness::new();
        let archer = harness.character("Archer");

        let started = harness
            .use_cases()
            .start
            .execute(StartEncounterInput {
                world_id: WorldId::new(),
                combatant_ids: vec![archer, CharacterId::new(), archer],
                ..Default::default()
            })
            .await
            .expect("start");

        assert_eq!(started.encounter.total_combatants, 1);
        assert_eq!(started.encounter.name, "Encounter");
    }

    #[tokio::test]
    async fn second_active_encounter_in_world_is_conflict() {
        let harness = EncounterHarness::new();
        let world = WorldId::new();
        let input = StartEncounterInput {
            world_id: world,
            ..Default::default()
        };
        harness
            .use_cases()
            .start
            .execute(input.clone())
            .await
            .expect("first");

        let err = harness
            .use_cases()
            .start
            .execute(input)
            .await
            .expect_err("second");
        assert!(matches!(err, EncounterError::Conflict(ref m) if m.contains("already has an active encounter")));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let mut encounters = MockEncounterRepo::new();
        encounters
            .expect_find_active_for_world()
            .returning(|_| Err(RepoError::database("encounter.find_active", "unavailable")));

        let use_case = StartEncounter::new(
            Arc::new(encounters),
            Arc::new(MockCharacterRepo::new()),
            Arc::new(MockWorldTimeRepo::new()),
            Arc::new(FixedClock(Utc::now())),
        );

        let err = use_case
            .execute(StartEncounterInput::default())
            .await
            .expect_err("store down");
        assert!(matches!(err, EncounterError::Repo(_)));
    }

    #[tokio::test]
    async fn insert_race_reports_conflict() {
        let mut encounters = MockEncounterRepo::new();
        encounters
            .expect_find_active_for_world()
            .returning(|_| Ok(None));
        encounters
            .expect_insert()
            .times(1)
            .returning(|e| Err(RepoError::conflict("Encounter", e.id())));

        let mut world_time = MockWorldTimeRepo::new();
        world_time
            .expect_current_game_time()
            .returning(|_| Ok(NarrativeTime::from_seconds(0)));

        let mut characters = MockCharacterRepo::new();
        characters
            .expect_get_profile()
            .returning(|_| Ok(Some(CharacterProfile::named("Archer"))));

        let use_case = StartEncounter::new(
            Arc::new(encounters),
            Arc::new(characters),
            Arc::new(world_time),
            Arc::new(FixedClock(Utc::now())),
        );

        let err = use_case
            .execute(StartEncounterInput {
                combatant_ids: vec![CharacterId::new()],
                ..Default::default()
            })
            .await
            .expect_err("race");
        assert!(matches!(err, EncounterError::Conflict(_)));
    }
}
