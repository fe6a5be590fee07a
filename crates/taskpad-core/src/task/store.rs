//! Remote store trait.
//!
//! Defines the interface for the remote task/comment store.

use super::model::{Comment, CommentDraft, Task, TaskDraft, TaskPatch};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract client for the remote store of record for tasks and comments.
///
/// This trait defines one operation per (entity, verb) pair, decoupling the
/// coordinators from the concrete transport (HTTP in production, in-memory
/// doubles in tests). Implementations hold no collection state of their own;
/// the only side effect of any operation is the remote call itself.
///
/// # Error contract
///
/// Every failure mode (network unreachable, non-2xx response, malformed
/// payload) must be normalized to `TaskpadError::Remote` carrying the name
/// of the failing action, so callers never need to distinguish transport
/// failures from application failures.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Lists all tasks, with embedded comments where the store provides them.
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Fetches a single task by id, including its embedded comment list.
    async fn get_task(&self, task_id: i64) -> Result<Task>;

    /// Creates a task; returns it as persisted, with server-assigned
    /// id and timestamps.
    async fn create_task(&self, draft: &TaskDraft) -> Result<Task>;

    /// Applies a partial update to a task; returns the updated task.
    async fn update_task(&self, task_id: i64, patch: &TaskPatch) -> Result<Task>;

    /// Deletes a task. The store cascades deletion of its comments.
    async fn delete_task(&self, task_id: i64) -> Result<()>;

    /// Creates a comment on the given task; returns it as persisted.
    async fn create_comment(&self, task_id: i64, draft: &CommentDraft) -> Result<Comment>;

    /// Replaces a comment's content; returns the updated comment.
    async fn update_comment(&self, comment_id: i64, draft: &CommentDraft) -> Result<Comment>;

    /// Deletes a comment.
    async fn delete_comment(&self, comment_id: i64) -> Result<()>;

    /// Probes the store's health endpoint.
    async fn health_check(&self) -> Result<()>;
}
