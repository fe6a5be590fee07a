//! Task domain model.
//!
//! This module contains the Task and Comment entities as persisted by the
//! remote store, plus the draft/patch payload types the client sends when
//! creating or updating them.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskpadError};

/// A text note attached to exactly one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier, assigned by the remote store.
    pub id: i64,
    /// The owning task. Required at creation, fixed thereafter.
    pub task_id: i64,
    /// The comment text. Non-empty after trimming.
    pub content: String,
    /// Server-stamped creation time. Opaque and read-only to the client.
    pub created_at: String,
    /// Server-stamped modification time. Opaque and read-only to the client.
    #[serde(default)]
    pub updated_at: String,
}

/// A to-do item with title, description, completion flag, and owned comments.
///
/// All server-assigned fields (`id`, `created_at`, `updated_at`) are treated
/// as opaque by the client; it never stamps or rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the remote store, immutable once created.
    pub id: i64,
    /// Non-empty title. The client rejects blank submissions locally.
    pub title: String,
    /// Optional free text.
    #[serde(default)]
    pub description: Option<String>,
    /// Completion flag, defaults to false.
    #[serde(default)]
    pub completed: bool,
    /// Server-stamped creation time.
    pub created_at: String,
    /// Server-stamped modification time.
    #[serde(default)]
    pub updated_at: String,
    /// Embedded comments in chronological order. Some endpoints omit the
    /// array entirely, so absence deserializes to empty.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

// ============================================================================
// Write payloads
// ============================================================================

/// Payload for creating a task (`POST /tasks`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TaskDraft {
    /// Creates a draft with the given title and no description.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Validates the draft for submission, trimming the title.
    ///
    /// # Errors
    ///
    /// Returns `TaskpadError::Validation` if the title is empty after
    /// trimming whitespace. Invalid drafts must never reach the remote store.
    pub fn validated(self) -> Result<Self> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(TaskpadError::validation("task title must not be empty"));
        }
        Ok(Self { title, ..self })
    }
}

/// Partial update payload for a task (`PUT /tasks/{id}`).
///
/// Only the fields present are sent; the remote store leaves the rest
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// A patch that only flips the completion flag.
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Returns true if the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Validates the patch for submission, trimming the title if present.
    ///
    /// # Errors
    ///
    /// Returns `TaskpadError::Validation` if a title is present but empty
    /// after trimming.
    pub fn validated(self) -> Result<Self> {
        let title = match self.title {
            Some(title) => {
                let title = title.trim().to_string();
                if title.is_empty() {
                    return Err(TaskpadError::validation("task title must not be empty"));
                }
                Some(title)
            }
            None => None,
        };
        Ok(Self { title, ..self })
    }
}

/// Payload for creating or updating a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub content: String,
}

impl CommentDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Validates the draft for submission, trimming the content.
    ///
    /// # Errors
    ///
    /// Returns `TaskpadError::Validation` if the content is empty after
    /// trimming whitespace.
    pub fn validated(self) -> Result<Self> {
        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err(TaskpadError::validation(
                "comment content must not be empty",
            ));
        }
        Ok(Self { content })
    }
}
