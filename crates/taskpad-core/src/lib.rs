//! Core domain layer for Taskpad.
//!
//! Holds the task/comment entities, the ordered in-memory `TaskCollection`
//! that is the client's single source of truth for rendering, the
//! `RemoteStore` trait implemented by the HTTP client, and the shared error
//! type.

pub mod error;
pub mod task;

// Re-export common error type
pub use error::{Result, TaskpadError};
pub use task::{Comment, CommentDraft, RemoteStore, Task, TaskCollection, TaskDraft, TaskPatch};
