//! Task domain: entities, the in-memory collection, and the remote store seam.

pub mod collection;
pub mod model;
pub mod store;

pub use collection::TaskCollection;
pub use model::{Comment, CommentDraft, Task, TaskDraft, TaskPatch};
pub use store::RemoteStore;
