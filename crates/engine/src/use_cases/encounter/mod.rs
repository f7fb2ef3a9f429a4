//! Encounter use cases.
//!
//! Turn-based encounter tracking for the GM. The flow is:
//! 1. Start an encounter with its combatants (StartEncounter)
//! 2. Set initiative for each combatant (SetInitiative)
//! 3. Advance turns; rounds increment when the order wraps (NextTurn)
//! 4. Add or remove combatants as the scene changes
//! 5. End the encounter with an outcome (EndEncounter)
//!
//! Every mutation is load, change the aggregate, then a versioned
//! conditional write.

use std::sync::Arc;

mod add_combatant;
mod end;
mod error;
mod get;
mod next_turn;
mod pause;
mod remove_combatant;
mod set_initiative;
mod start;
mod view;

pub use add_combatant::AddCombatant;
pub use end::EndEncounter;
pub use error::EncounterError;
pub use get::{GetActiveEncounter, GetEncounter};
pub use next_turn::NextTurn;
pub use pause::{PauseEncounter, ResumeEncounter};
pub use remove_combatant::RemoveCombatant;
pub use set_initiative::SetInitiative;
pub use start::{StartEncounter, StartEncounterInput};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, EncounterRepo, WorldTimeRepo};

/// Container for encounter use cases.
pub struct EncounterUseCases {
    pub start: Arc<StartEncounter>,
    pub get: Arc<GetEncounter>,
    pub get_active: Arc<GetActiveEncounter>,
    pub add_combatant: Arc<AddCombatant>,
    pub set_initiative: Arc<SetInitiative>,
    pub remove_combatant: Arc<RemoveCombatant>,
    pub next_turn: Arc<NextTurn>,
    pub end: Arc<EndEncounter>,
    pub pause: Arc<PauseEncounter>,
    pub resume: Arc<ResumeEncounter>,
}

impl EncounterUseCases {
    pub fn new(
        encounters: Arc<dyn EncounterRepo>,
        characters: Arc<dyn CharacterRepo>,
        world_time: Arc<dyn WorldTimeRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            start: Arc::new(StartEncounter::new(
                encounters.clone(),
                characters.clone(),
                world_time,
                clock.clone(),
            )),
            get: Arc::new(GetEncounter::new(encounters.clone(), characters.clone())),
            get_active: Arc::new(GetActiveEncounter::new(
                encounters.clone(),
                characters.clone(),
            )),
            add_combatant: Arc::new(AddCombatant::new(
                encounters.clone(),
                characters.clone(),
                clock.clone(),
            )),
            set_initiative: Arc::new(SetInitiative::new(
                encounters.clone(),
                characters.clone(),
                clock.clone(),
            )),
            remove_combatant: Arc::new(RemoveCombatant::new(
                encounters.clone(),
                characters.clone(),
                clock.clone(),
            )),
            next_turn: Arc::new(NextTurn::new(
                encounters.clone(),
                characters.clone(),
                clock.clone(),
            )),
            end: Arc::new(EndEncounter::new(encounters.clone(), clock.clone())),
            pause: Arc::new(PauseEncounter::new(
                encounters.clone(),
                characters.clone(),
                clock.clone(),
            )),
            resume: Arc::new(ResumeEncounter::new(encounters, characters, clock)),
        }
    }
}
