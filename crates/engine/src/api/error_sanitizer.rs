//! Error sanitization for client-facing messages.
//!
//! Prevents leaking internal details (paths, DB errors) to callers.

/// Sanitize a repository error.
///
/// Logs the full error server-side, returns a generic message for the caller.
pub fn sanitize_repo_error<E: std::fmt::Display>(error: &E, operation: &str) -> String {
    tracing::error!(
        error = %error,
        operation = operation,
        "Repository error"
    );

    format!("Failed to {} - please try again", operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::RepoError;

    #[test]
    fn hides_store_details() {
        let err = RepoError::database("encounter.get", "unable to open /var/lib/taleforge.db");
        let message = sanitize_repo_error(&err, "run next_turn");
        assert_eq!(message, "Failed to run next_turn - please try again");
        assert!(!message.contains("/var/lib"));
    }
}
