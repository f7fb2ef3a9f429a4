//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{CharacterRepo, ClockPort, EncounterRepo, WorldTimeRepo};
use crate::use_cases;

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub encounter: use_cases::EncounterUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        encounter: Arc<dyn EncounterRepo>,
        character: Arc<dyn CharacterRepo>,
        world_time: Arc<dyn WorldTimeRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            use_cases: UseCases {
                encounter: use_cases::EncounterUseCases::new(
                    encounter, character, world_time, clock,
                ),
            },
        }
    }
}
