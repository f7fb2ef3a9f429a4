//! Errors shared by the encounter use cases.

use taleforge_domain::{DomainError, EncounterId};

use crate::infrastructure::ports::RepoError;

/// Everything except `Repo` is a reportable domain condition. `Repo` means
/// the store could not be reached and the request should fail outright.
#[derive(Debug, thiserror::Error)]
pub enum EncounterError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    Repo(RepoError),
}

impl EncounterError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub(super) fn encounter_not_found(id: EncounterId) -> Self {
        Self::not_found("Encounter", id)
    }
}

impl From<DomainError> for EncounterError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            DomainError::Constraint(msg) => Self::Conflict(msg),
            DomainError::InvalidStateTransition(msg) => Self::InvalidState(msg),
            other @ (DomainError::Validation(_)
            | DomainError::InvalidId(_)
            | DomainError::Parse(_)) => Self::InvalidInput(other.to_string()),
        }
    }
}

impl From<RepoError> for EncounterError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            RepoError::Conflict { entity_type, id } => Self::Conflict(format!(
                "{entity_type} {id} was modified concurrently; retry"
            )),
            other => Self::Repo(other),
        }
    }
}
