//! Response envelope for tool calls
//!
//! Every tool call answers with a `ResponseResult`. Domain conditions
//! (missing encounter, wrong state, conflicting write) are `Error` results,
//! never transport failures.

use serde::{Deserialize, Serialize};

// =============================================================================
// Response Result
// =============================================================================

/// Result of a tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseResult {
    /// Operation succeeded
    Success {
        /// Optional data payload (varies by tool)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },
    /// Operation reported a domain-level failure
    Error {
        /// Error classification code
        code: ErrorCode,
        /// Human-readable error message
        message: String,
    },
}

impl ResponseResult {
    /// Create a success response with data.
    ///
    /// Fails when the payload cannot be represented as JSON.
    pub fn success<T: Serialize>(data: T) -> Result<Self, serde_json::Error> {
        Ok(ResponseResult::Success {
            data: Some(serde_json::to_value(data)?),
        })
    }

    /// Create an error response
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ResponseResult::Error {
            code,
            message: message.into(),
        }
    }

    /// Check if this is a success response
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseResult::Success { .. })
    }

    /// Check if this is an error response
    pub fn is_error(&self) -> bool {
        matches!(self, ResponseResult::Error { .. })
    }

    /// Error code, if this is an error response
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            ResponseResult::Error { code, .. } => Some(*code),
            ResponseResult::Success { .. } => None,
        }
    }

    /// Success payload, if any
    pub fn data(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseResult::Success { data } => data.as_ref(),
            ResponseResult::Error { .. } => None,
        }
    }
}

// =============================================================================
// Error Codes
// =============================================================================

/// Error classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Unknown tool, malformed arguments or unparsable ids
    BadRequest,
    /// Referenced encounter, character or combatant does not exist
    NotFound,
    /// Operation conflicts with stored state (duplicate, concurrent write, second active encounter)
    Conflict,
    /// Operation not allowed in the encounter's current status
    InvalidState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_serializes_with_status_tag() {
        let result = ResponseResult::success(serde_json::json!({"round": 2})).expect("payload");
        let json = serde_json::to_value(result).expect("serialize");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["round"], 2);
    }

    #[test]
    fn error_serializes_code_in_snake_case() {
        let json = serde_json::to_value(ResponseResult::error(
            ErrorCode::InvalidState,
            "Encounter is not active",
        ))
        .expect("serialize");
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "invalid_state");
        assert_eq!(json["message"], "Encounter is not active");
    }

    #[test]
    fn unrepresentable_payload_is_an_error() {
        let mut by_position = std::collections::HashMap::new();
        by_position.insert((1, 2), "goblin");
        assert!(ResponseResult::success(by_position).is_err());
    }

    #[test]
    fn accessors_match_variant() {
        let ok = ResponseResult::Success { data: None };
        assert!(ok.is_success());
        assert_eq!(ok.error_code(), None);

        let err = ResponseResult::error(ErrorCode::NotFound, "gone");
        assert!(err.is_error());
        assert_eq!(err.error_code(), Some(ErrorCode::NotFound));
        assert!(err.data().is_none());
    }
}
