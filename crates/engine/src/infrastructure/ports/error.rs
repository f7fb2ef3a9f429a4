//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    ///
    /// This is the "store unavailable" class: callers propagate it rather
    /// than turning it into a reported result.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Conditional write lost: the stored version moved on, or a uniqueness
    /// rule (one active encounter per world) rejected the write.
    #[error("Conflicting write to {entity_type} {id}")]
    Conflict {
        entity_type: &'static str,
        id: String,
    },
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a Conflict error.
    pub fn conflict(entity_type: &'static str, id: impl ToString) -> Self {
        Self::Conflict {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            RepoError::database("encounter.update", "disk I/O error").to_string(),
            "Database error in encounter.update: disk I/O error"
        );
        assert!(RepoError::conflict("Encounter", "abc").is_conflict());
        assert!(RepoError::not_found("Encounter", "abc").is_not_found());
    }
}
