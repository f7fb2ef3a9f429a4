//! Next turn use case.
//!
//! Advances the position in the derived turn order and bumps the round when
//! it wraps. The write is conditional on the version that was read, so two
//! concurrent advances cannot both land.

use std::sync::Arc;

use taleforge_domain::EncounterId;
use taleforge_shared::TurnAdvanced;

use super::error::EncounterError;
use super::view::{turn_order_entries, Roster};
use crate::infrastructure::ports::{CharacterRepo, ClockPort, EncounterRepo};

pub struct NextTurn {
    encounters: Arc<dyn EncounterRepo>,
    characters: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl NextTurn {
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
    ) -> Result<TurnAdvanced, EncounterError> {
        let mut encounter = self
            .encounters
            .get(encounter_id)
            .await?
            .ok_or_else(|| EncounterError::encounter_not_found(encounter_id))?;

        let advance = encounter.advance_turn(self.clock.now())?;
        self.encounters.update(&encounter).await?;

        tracing::info!(
            encounter_id = %encounter_id,
            round = advance.round_number,
            turn = advance.turn_index,
            wrapped = advance.wrapped,
            character_id = %advance.current.character_id,
            "Turn advanced"
        );

        // HP and statuses are read now, not cached on the combatant.
        let roster = Roster::load(self.characters.as_ref(), &encounter).await?;
        Ok(TurnAdvanced {
            round: advance.round_number,
            wrapped: advance.wrapped,
            current_turn: roster.acting(&advance.current),
            turn_order: turn_order_entries(&encounter, &roster),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{
        CharacterProfile, MockCharacterRepo, MockEncounterRepo, RepoError,
    };
    use crate::test_fixtures::EncounterHarness;
    use chrono::Utc;
    use taleforge_domain::{CharacterId, Encounter, EncounterType, NarrativeTime, WorldId};

    #[tokio::test]
    async fn walks_the_documented_scenario() {
        let harness = EncounterHarness::new();
        let (encounter_id, ids) = harness.started_with(&[("A", 15.0), ("B", 20.0)]).await;
        let next = &harness.use_cases().next_turn;

        let first = next.execute(encounter_id).await.expect("advance");
        assert_eq!(first.round, 1);
        assert!(!first.wrapped);
        assert_eq!(first.current_turn.name, "A");

        let second = next.execute(encounter_id).await.expect("advance");
        assert_eq!(second.round, 2);
        assert!(second.wrapped);
        assert_eq!(second.current_turn.name, "B");
        assert!(second.turn_order[0].is_current);

        harness
            .use_cases()
            .remove_combatant
            .execute(encounter_id, ids[1], "fled".into())
            .await
            .expect("remove");

        let third = next.execute(encounter_id).await.expect("advance");
        assert_eq!(third.round, 3);
        assert_eq!(third.current_turn.name, "A");
        assert_eq!(third.turn_order.len(), 1);
    }

    #[tokio::test]
    async fn n_advances_complete_one_round() {
        let harness = EncounterHarness::new();
        let (encounter_id, _) = harness
            .started_with(&[("A", 4.0), ("B", 3.0), ("C", 2.0), ("D", 1.0)])
            .await;

        for _ in 0..4 * 3 {
            harness.advance(encounter_id).await;
        }

        let stored = harness.stored(encounter_id).await;
        assert_eq!(stored.round_number(), 4);
        assert_eq!(stored.current_turn(), 0);
    }

    #[tokio::test]
    async fn reports_live_hp_and_statuses() {
        let harness = EncounterHarness::new();
        let (encounter_id, ids) = harness.started_with(&[("A", 15.0), ("B", 20.0)]).await;
        harness.store.seed_character(
            ids[0],
            CharacterProfile::named("A")
                .with_hp(4, 12)
                .with_status("bleeding"),
        );

        let advanced = harness
            .use_cases()
            .next_turn
            .execute(encounter_id)
            .await
            .expect("advance");
        assert_eq!(advanced.current_turn.hp.as_deref(), Some("4/12"));
        assert_eq!(advanced.current_turn.statuses, vec!["bleeding"]);
    }

    #[tokio::test]
    async fn no_active_combatants_is_invalid_state() {
        let harness = EncounterHarness::new();
        let (encounter_id, _) = harness.started_with(&[]).await;

        let err = harness
            .use_cases()
            .next_turn
            .execute(encounter_id)
            .await
            .expect_err("empty");
        assert!(matches!(err, EncounterError::InvalidState(ref m) if m == "No active combatants"));
    }

    #[tokio::test]
    async fn ended_encounter_does_not_move() {
        let harness = EncounterHarness::new();
        let (encounter_id, _) = harness.started_with(&[("A", 1.0), ("B", 2.0)]).await;
        harness.advance(encounter_id).await;
        harness
            .use_cases()
            .end
            .execute(encounter_id, String::new(), String::new())
            .await
            .expect("end");

        let err = harness
            .use_cases()
            .next_turn
            .execute(encounter_id)
            .await
            .expect_err("ended");
        assert!(matches!(err, EncounterError::InvalidState(_)));

        let stored = harness.stored(encounter_id).await;
        assert_eq!(stored.current_turn(), 1);
        assert_eq!(stored.round_number(), 1);
    }

    #[tokio::test]
    async fn lost_race_is_reported_as_conflict() {
        let mut encounter = Encounter::new(
            WorldId::new(),
            "Race",
            EncounterType::Combat,
            NarrativeTime::default(),
            Utc::now(),
        );
        encounter
            .add_combatant(CharacterId::new(), 1.0, "", Utc::now())
            .expect("add");
        let id = encounter.id();

        let mut encounters = MockEncounterRepo::new();
        encounters
            .expect_get()
            .returning(move |_| Ok(Some(encounter.clone())));
        encounters
            .expect_update()
            .times(1)
            .returning(move |_| Err(RepoError::conflict("Encounter", id)));

        let use_case = NextTurn::new(
            Arc::new(encounters),
            Arc::new(MockCharacterRepo::new()),
            Arc::new(FixedClock(Utc::now())),
        );

        let err = use_case.execute(id).await.expect_err("conflict");
        assert!(matches!(err, EncounterError::Conflict(ref m) if m.contains("modified concurrently")));
    }
}
