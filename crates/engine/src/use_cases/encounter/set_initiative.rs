//! Set initiative use case.

use std::sync::Arc;

use taleforge_domain::{CharacterId, EncounterId};
use taleforge_shared::InitiativeSet;

use super::error::EncounterError;
use super::view::{turn_order_entries, Roster};
use crate::infrastructure::ports::{CharacterRepo, ClockPort, EncounterRepo};

pub struct SetInitiative {
    encounters: Arc<dyn EncounterRepo>,
    characters: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl SetInitiative {
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

    /// Update a combatant's initiative and return the re-derived order.
    ///
    /// `current_turn` stays a position, so who acts next may change.
    pub async fn execute(
        &self,
        encounter_id: EncounterId,
        character_id: CharacterId,
        initiative: f64,
    ) -> Result<InitiativeSet, EncounterError> {
        let mut encounter = self
            .encounters
            .get(encounter_id)
            .await?
            .ok_or_else(|| EncounterError::encounter_not_found(encounter_id))?;

        encounter.set_initiative(character_id, initiative, self.clock.now())?;
        self.encounters.update(&encounter).await?;

        tracing::debug!(
            encounter_id = %encounter_id,
            character_id = %character_id,
            initiative,
            "Initiative set"
        );

        let roster = Roster::load(self.characters.as_ref(), &encounter).await?;
        Ok(InitiativeSet {
            set: roster.name(character_id),
            initiative,
            turn_order: turn_order_entries(&encounter, &roster),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::EncounterHarness;

    #[tokio::test]
    async fn returns_reordered_turn_order() {
        let harness = EncounterHarness::new();
        let (encounter_id, ids) = harness.started_with(&[("A", 0.0), ("B", 0.0)]).await;

        let result = harness
            .use_cases()
            .set_initiative
            .execute(encounter_id, ids[1], 20.0)
            .await
            .expect("set");

        assert_eq!(result.set, "B");
        let names: Vec<&str> = result.turn_order.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        // Position 0 is still current; it now points at B.
        assert!(result.turn_order[0].is_current);
    }

    #[tokio::test]
    async fn unknown_combatant_is_not_found() {
        let harness = EncounterHarness::new();
        let (encounter_id, _) = harness.started_with(&[("A", 0.0)]).await;

        let err = harness
            .use_cases()
            .set_initiative
            .execute(encounter_id, CharacterId::new(), 5.0)
            .await
            .expect_err("not seated");
        assert!(matches!(err, EncounterError::NotFound { entity_type: "Combatant", .. }));
    }

    #[tokio::test]
    async fn ended_encounter_rejects_changes() {
        let harness = EncounterHarness::new();
        let (encounter_id, ids) = harness.started_with(&[("A", 1.0)]).await;
        harness
            .use_cases()
            .end
            .execute(encounter_id, String::new(), String::new())
            .await
            .expect("end");

        let err = harness
            .use_cases()
            .set_initiative
            .execute(encounter_id, ids[0], 9.0)
            .await
            .expect_err("ended");
        assert!(matches!(err, EncounterError::InvalidState(_)));
    }
}
