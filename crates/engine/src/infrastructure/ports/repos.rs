//! Repository port traits for database access.

use async_trait::async_trait;
use taleforge_domain::{CharacterId, Encounter, EncounterId, NarrativeTime, WorldId};

use super::error::RepoError;
use super::types::CharacterProfile;

// =============================================================================
// Encounter Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EncounterRepo: Send + Sync {
    async fn insert(&self, encounter: &Encounter) -> Result<(), RepoError>;
    async fn get(&self, id: EncounterId) -> Result<Option<Encounter>, RepoError>;

    /// The encounter with status `active` for a world, if any.
    async fn find_active_for_world(
        &self,
        world_id: WorldId,
    ) -> Result<Option<Encounter>, RepoError>;

    /// Conditional write.
    ///
    /// Succeeds only if the stored version still equals `encounter.version()`;
    /// the stored version then becomes `encounter.version() + 1`. A lost race
    /// is `RepoError::Conflict`, a missing row is `RepoError::NotFound`.
    async fn update(&self, encounter: &Encounter) -> Result<(), RepoError>;
}

// =============================================================================
// Collaborator Ports (owned by neighbouring subsystems)
// =============================================================================

/// Read-only character lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get_profile(&self, id: CharacterId) -> Result<Option<CharacterProfile>, RepoError>;
}

/// Narrative clock for a world, derived from its event log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorldTimeRepo: Send + Sync {
    async fn current_game_time(&self, world_id: WorldId) -> Result<NarrativeTime, RepoError>;
}
