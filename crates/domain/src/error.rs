//! Errors raised by encounter rules.
//!
//! The engine maps each variant onto a reported result: `NotFound` to
//! not_found, `Constraint` to conflict, `InvalidStateTransition` to
//! invalid_state, and the input variants to bad_request.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A value the encounter cannot hold, such as a turn index out of range.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An id string that does not parse; carries the field label.
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// No combatant (or other record) with that id.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// e.g. adding a character that is already an active combatant.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Unknown encounter type or status name.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operation not allowed in the encounter's current status.
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
