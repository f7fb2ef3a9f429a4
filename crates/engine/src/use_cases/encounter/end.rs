//! End encounter use case.

use std::sync::Arc;

use taleforge_domain::EncounterId;
use taleforge_shared::EncounterEnded;

use super::error::EncounterError;
use crate::infrastructure::ports::{ClockPort, EncounterRepo};

pub struct EndEncounter {
    encounters: Arc<dyn EncounterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl EndEncounter {
    pub fn new(encounters: Arc<dyn EncounterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { encounters, clock }
    }

    /// End the encounter. `ended_at` is `started_at` plus six narrative
    /// seconds per round reached. Ending twice is an invalid-state error.
    pub async fn execute(
        &self,
        encounter_id: EncounterId,
        summary: String,
        outcome: String,
    ) -> Result<EncounterEnded, EncounterError> {
        let mut encounter = self
            .encounters
            .get(encounter_id)
            .await?
            .ok_or_else(|| EncounterError::encounter_not_found(encounter_id))?;

        let ended_at = encounter.end(summary, outcome, self.clock.now())?;
        self.encounters.update(&encounter).await?;

        tracing::info!(
            encounter_id = %encounter_id,
            world_id = %encounter.world_id(),
            rounds = encounter.round_number(),
            outcome = encounter.outcome().unwrap_or_default(),
            ended_at = %ended_at,
            "Encounter ended"
        );

        Ok(EncounterEnded {
            ended: encounter.name().to_string(),
            rounds: encounter.round_number(),
            outcome: encounter.outcome().unwrap_or_default().to_string(),
            summary: encounter.summary().to_string(),
            started_at: encounter.started_at().seconds(),
            ended_at: ended_at.seconds(),
            ended_at_display: ended_at.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::EncounterHarness;
    use taleforge_domain::{EncounterStatus, NarrativeTime, WorldId};

    #[tokio::test]
    async fn derives_ended_at_from_rounds() {
        let harness = EncounterHarness::new();
        let world = WorldId::new();
        harness.store.set_game_time(world, NarrativeTime::from_seconds(1_000));
        let (encounter_id, _) = harness
            .started_in(world, &[("A", 2.0), ("B", 1.0)])
            .await;
        for _ in 0..4 {
            harness.advance(encounter_id).await;
        }

        let ended = harness
            .use_cases()
            .end
            .execute(encounter_id, "Bandits routed".into(), "victory".into())
            .await
            .expect("end");

        assert_eq!(ended.rounds, 3);
        assert_eq!(ended.started_at, 1_000);
        assert_eq!(ended.ended_at, 1_018);
        assert_eq!(ended.outcome, "victory");
        assert_eq!(ended.summary, "Bandits routed");

        let stored = harness.stored(encounter_id).await;
        assert_eq!(stored.status(), EncounterStatus::Ended);
        assert_eq!(stored.outcome(), Some("victory"));
    }

    #[tokio::test]
    async fn empty_outcome_is_not_recorded() {
        let harness = EncounterHarness::new();
        let (encounter_id, _) = harness.started_with(&[]).await;

        let ended = harness
            .use_cases()
            .end
            .execute(encounter_id, String::new(), String::new())
            .await
            .expect("end");
        assert_eq!(ended.outcome, "");
        assert!(harness.stored(encounter_id).await.metadata().is_empty());
    }

    #[tokio::test]
    async fn ending_twice_is_invalid_state() {
        let harness = EncounterHarness::new();
        let (encounter_id, _) = harness.started_with(&[("A", 1.0)]).await;
        let end = &harness.use_cases().end;

        let first = end
            .execute(encounter_id, String::new(), "fled".into())
            .await
            .expect("first");
        let err = end
            .execute(encounter_id, String::new(), String::new())
            .await
            .expect_err("second");
        assert!(matches!(err, EncounterError::InvalidState(ref m) if m == "Encounter has already ended"));

        let stored = harness.stored(encounter_id).await;
        assert_eq!(stored.ended_at().map(|t| t.seconds()), Some(first.ended_at));
    }

    #[tokio::test]
    async fn ended_world_can_start_again() {
        let harness = EncounterHarness::new();
        let world = WorldId::new();
        let (encounter_id, _) = harness.started_in(world, &[]).await;
        harness
            .use_cases()
            .end
            .execute(encounter_id, String::new(), String::new())
            .await
            .expect("end");

        harness.started_in(world, &[]).await;
    }
}
