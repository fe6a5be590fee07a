//! Error types for the Taskpad client.

use thiserror::Error;

/// A shared error type for the entire Taskpad client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Remote failures of every
/// kind (transport, non-2xx response, malformed payload) are normalized
/// into the single `Remote` variant so callers never need to distinguish
/// transport failures from application failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskpadError {
    /// Remote store failure, carrying the name of the action that triggered it
    #[error("Remote store error during '{action}': {message}")]
    Remote {
        action: &'static str,
        message: String,
    },

    /// Local validation failure; never reaches the remote store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found in the local collection
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: &'static str, id: i64 },

    /// Attempt to insert an entity whose id is already present
    #[error("Duplicate entity: {entity_type} '{id}'")]
    Duplicate { entity_type: &'static str, id: i64 },

    /// An action of the same kind is already in flight
    #[error("Action '{action}' is already in progress")]
    Busy { action: &'static str },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskpadError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Remote error for the given action
    pub fn remote(action: &'static str, message: impl Into<String>) -> Self {
        Self::Remote {
            action,
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: i64) -> Self {
        Self::NotFound { entity_type, id }
    }

    /// Creates a Duplicate error
    pub fn duplicate(entity_type: &'static str, id: i64) -> Self {
        Self::Duplicate { entity_type, id }
    }

    /// Creates a Busy error
    pub fn busy(action: &'static str) -> Self {
        Self::Busy { action }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Remote error
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Busy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for TaskpadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<String> for TaskpadError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, TaskpadError>`.
pub type Result<T> = std::result::Result<T, TaskpadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_carries_action_name() {
        let err = TaskpadError::remote("create_task", "connection refused");
        assert!(err.is_remote());
        assert_eq!(
            err.to_string(),
            "Remote store error during 'create_task': connection refused"
        );
    }

    #[test]
    fn test_predicates() {
        assert!(TaskpadError::validation("empty title").is_validation());
        assert!(TaskpadError::not_found("Task", 7).is_not_found());
        assert!(TaskpadError::busy("delete_task").is_busy());
        assert!(!TaskpadError::duplicate("Task", 1).is_remote());
    }
}
