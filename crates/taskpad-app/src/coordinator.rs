//! Mutation coordinators.
//!
//! `TaskCoordinator` pairs each remote mutation with its precise local-state
//! reconciliation: task mutations take the server's response as the new
//! truth for that one task, while comment mutations refetch only the owning
//! task, never the whole collection. Each coordinator invocation also drives
//! the shared status state (busy flag, success/error banner).

use std::sync::Arc;
use taskpad_core::error::{Result, TaskpadError};
use taskpad_core::task::collection::TaskCollection;
use taskpad_core::task::model::{CommentDraft, Task, TaskDraft, TaskPatch};
use taskpad_core::task::store::RemoteStore;
use tokio::sync::Mutex;

use crate::status::{Action, SharedStatus};

/// Coordinates remote mutations with the in-memory task collection.
///
/// All writes to the collection happen from the completion path of exactly
/// one coordinator invocation. There is no cancellation: once a remote call
/// is issued it runs to completion, and a rapid duplicate submission is
/// guarded only by the per-action busy flag. If the host overlaps two calls
/// touching the same task, the later-completing one wins.
///
/// Deleting a task or comment is destructive on the remote store; callers
/// are expected to confirm with the user before invoking those methods.
#[derive(Clone)]
pub struct TaskCoordinator {
    store: Arc<dyn RemoteStore>,
    collection: Arc<Mutex<TaskCollection>>,
    status: SharedStatus,
}

impl TaskCoordinator {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            collection: Arc::new(Mutex::new(TaskCollection::new())),
            status: SharedStatus::new(),
        }
    }

    /// The shared status state this coordinator drives.
    pub fn status(&self) -> &SharedStatus {
        &self.status
    }

    /// A snapshot of the current collection for rendering.
    pub async fn snapshot(&self) -> TaskCollection {
        self.collection.lock().await.clone()
    }

    /// Loads the full task list from the remote store, replacing the
    /// collection wholesale. Used at startup.
    pub async fn load_tasks(&self) -> Result<()> {
        self.status.begin(Action::LoadTasks).await?;
        self.status.set_loading(true).await;
        tracing::debug!("[TaskCoordinator] Loading task list");

        let result = self.store.list_tasks().await;
        self.status.set_loading(false).await;
        match result {
            Ok(tasks) => {
                tracing::info!("[TaskCoordinator] Loaded {} tasks", tasks.len());
                self.collection.lock().await.replace_all(tasks);
                // No success banner for a plain read.
                self.status.finish_quiet(Action::LoadTasks).await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[TaskCoordinator] Failed to load tasks: {}", e);
                self.status
                    .finish_error(Action::LoadTasks, "Failed to fetch tasks")
                    .await;
                Err(e)
            }
        }
    }

    /// Creates a task and appends the persisted result to the collection.
    pub async fn create_task(&self, draft: TaskDraft) -> Result<Task> {
        let draft = match draft.validated() {
            Ok(draft) => draft,
            Err(e) => {
                self.status.reject(e.to_string()).await;
                return Err(e);
            }
        };
        self.status.begin(Action::CreateTask).await?;

        match self.store.create_task(&draft).await {
            Ok(task) => {
                if let Err(e) = self.collection.lock().await.insert(task.clone()) {
                    self.status
                        .finish_error(Action::CreateTask, "Failed to create task")
                        .await;
                    return Err(e);
                }
                tracing::info!("[TaskCoordinator] Created task {}", task.id);
                self.status
                    .finish_success(Action::CreateTask, "Task created successfully!")
                    .await;
                Ok(task)
            }
            Err(e) => {
                tracing::warn!("[TaskCoordinator] Failed to create task: {}", e);
                self.status
                    .finish_error(Action::CreateTask, "Failed to create task")
                    .await;
                Err(e)
            }
        }
    }

    /// Applies a partial update to a task, replacing the local copy with the
    /// server's response while preserving its display position.
    pub async fn update_task(&self, task_id: i64, patch: TaskPatch) -> Result<Task> {
        let patch = match patch.validated() {
            Ok(patch) => patch,
            Err(e) => {
                self.status.reject(e.to_string()).await;
                return Err(e);
            }
        };
        self.status.begin(Action::UpdateTask).await?;

        match self.store.update_task(task_id, &patch).await {
            Ok(task) => {
                if let Err(e) = self.collection.lock().await.patch_task(task_id, task.clone()) {
                    self.status
                        .finish_error(Action::UpdateTask, "Failed to update task")
                        .await;
                    return Err(e);
                }
                tracing::info!("[TaskCoordinator] Updated task {}", task_id);
                self.status
                    .finish_success(Action::UpdateTask, "Task updated successfully!")
                    .await;
                Ok(task)
            }
            Err(e) => {
                tracing::warn!("[TaskCoordinator] Failed to update task {}: {}", task_id, e);
                self.status
                    .finish_error(Action::UpdateTask, "Failed to update task")
                    .await;
                Err(e)
            }
        }
    }

    /// Flips a task's completion flag based on its current local state.
    pub async fn toggle_complete(&self, task_id: i64) -> Result<Task> {
        let completed = match self.collection.lock().await.get(task_id) {
            Some(task) => task.completed,
            None => {
                let e = TaskpadError::not_found("Task", task_id);
                self.status.reject(e.to_string()).await;
                return Err(e);
            }
        };
        self.status.begin(Action::ToggleComplete).await?;

        let patch = TaskPatch::completion(!completed);
        match self.store.update_task(task_id, &patch).await {
            Ok(task) => {
                if let Err(e) = self.collection.lock().await.patch_task(task_id, task.clone()) {
                    self.status
                        .finish_error(Action::ToggleComplete, "Failed to update task")
                        .await;
                    return Err(e);
                }
                tracing::info!(
                    "[TaskCoordinator] Toggled task {} to completed={}",
                    task_id,
                    task.completed
                );
                self.status
                    .finish_success(Action::ToggleComplete, "Task updated successfully!")
                    .await;
                Ok(task)
            }
            Err(e) => {
                tracing::warn!("[TaskCoordinator] Failed to toggle task {}: {}", task_id, e);
                self.status
                    .finish_error(Action::ToggleComplete, "Failed to update task")
                    .await;
                Err(e)
            }
        }
    }

    /// Deletes a task; the remote store cascades deletion of its comments,
    /// and removing the local record discards the embedded copies with it.
    pub async fn delete_task(&self, task_id: i64) -> Result<()> {
        self.status.begin(Action::DeleteTask).await?;

        match self.store.delete_task(task_id).await {
            Ok(()) => {
                if let Err(e) = self.collection.lock().await.remove(task_id) {
                    self.status
                        .finish_error(Action::DeleteTask, "Failed to delete task")
                        .await;
                    return Err(e);
                }
                tracing::info!("[TaskCoordinator] Deleted task {}", task_id);
                self.status
                    .finish_success(Action::DeleteTask, "Task deleted successfully!")
                    .await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[TaskCoordinator] Failed to delete task {}: {}", task_id, e);
                self.status
                    .finish_error(Action::DeleteTask, "Failed to delete task")
                    .await;
                Err(e)
            }
        }
    }

    /// Adds a comment to a task, then refetches exactly that task so its
    /// embedded comment list reflects the store.
    ///
    /// The two remote calls are strictly sequential; the refetch does not
    /// start until the create acknowledges. If the create succeeds but the
    /// refetch fails, the comment may exist server-side, but the client does
    /// not guess: it simply does not show it until a successful refresh.
    pub async fn create_comment(&self, task_id: i64, draft: CommentDraft) -> Result<Task> {
        let draft = match draft.validated() {
            Ok(draft) => draft,
            Err(e) => {
                self.status.reject(e.to_string()).await;
                return Err(e);
            }
        };
        if self.collection.lock().await.get(task_id).is_none() {
            let e = TaskpadError::not_found("Task", task_id);
            self.status.reject(e.to_string()).await;
            return Err(e);
        }
        self.status.begin(Action::CreateComment).await?;

        let created = self.store.create_comment(task_id, &draft).await;
        match created {
            Ok(comment) => {
                tracing::info!(
                    "[TaskCoordinator] Created comment {} on task {}",
                    comment.id,
                    task_id
                );
                match self.refresh_owner(task_id).await {
                    Ok(task) => {
                        self.status
                            .finish_success(Action::CreateComment, "Comment added successfully!")
                            .await;
                        Ok(task)
                    }
                    Err(e) => {
                        self.status
                            .finish_error(Action::CreateComment, "Failed to add comment")
                            .await;
                        Err(e)
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    "[TaskCoordinator] Failed to create comment on task {}: {}",
                    task_id,
                    e
                );
                self.status
                    .finish_error(Action::CreateComment, "Failed to add comment")
                    .await;
                Err(e)
            }
        }
    }

    /// Updates a comment's content, then refreshes its owning task.
    pub async fn update_comment(&self, comment_id: i64, draft: CommentDraft) -> Result<Task> {
        let draft = match draft.validated() {
            Ok(draft) => draft,
            Err(e) => {
                self.status.reject(e.to_string()).await;
                return Err(e);
            }
        };
        let Some(task_id) = self.collection.lock().await.owner_of_comment(comment_id) else {
            let e = TaskpadError::not_found("Comment", comment_id);
            self.status.reject(e.to_string()).await;
            return Err(e);
        };
        self.status.begin(Action::UpdateComment).await?;

        match self.store.update_comment(comment_id, &draft).await {
            Ok(_) => {
                tracing::info!("[TaskCoordinator] Updated comment {}", comment_id);
                match self.refresh_owner(task_id).await {
                    Ok(task) => {
                        self.status
                            .finish_success(Action::UpdateComment, "Comment updated successfully!")
                            .await;
                        Ok(task)
                    }
                    Err(e) => {
                        self.status
                            .finish_error(Action::UpdateComment, "Failed to update comment")
                            .await;
                        Err(e)
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    "[TaskCoordinator] Failed to update comment {}: {}",
                    comment_id,
                    e
                );
                self.status
                    .finish_error(Action::UpdateComment, "Failed to update comment")
                    .await;
                Err(e)
            }
        }
    }

    /// Deletes a comment, then refreshes its owning task.
    pub async fn delete_comment(&self, comment_id: i64) -> Result<Task> {
        let Some(task_id) = self.collection.lock().await.owner_of_comment(comment_id) else {
            let e = TaskpadError::not_found("Comment", comment_id);
            self.status.reject(e.to_string()).await;
            return Err(e);
        };
        self.status.begin(Action::DeleteComment).await?;

        match self.store.delete_comment(comment_id).await {
            Ok(()) => {
                tracing::info!("[TaskCoordinator] Deleted comment {}", comment_id);
                match self.refresh_owner(task_id).await {
                    Ok(task) => {
                        self.status
                            .finish_success(Action::DeleteComment, "Comment deleted successfully!")
                            .await;
                        Ok(task)
                    }
                    Err(e) => {
                        self.status
                            .finish_error(Action::DeleteComment, "Failed to delete comment")
                            .await;
                        Err(e)
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    "[TaskCoordinator] Failed to delete comment {}: {}",
                    comment_id,
                    e
                );
                self.status
                    .finish_error(Action::DeleteComment, "Failed to delete comment")
                    .await;
                Err(e)
            }
        }
    }

    /// Refetches one task and patches it into the collection in place.
    ///
    /// This is the minimal operation restoring consistency after a comment
    /// mutation: the comment endpoints do not return the full parent, and a
    /// full-collection refresh would clobber unrelated tasks.
    async fn refresh_owner(&self, task_id: i64) -> Result<Task> {
        let task = self.store.get_task(task_id).await?;
        self.collection.lock().await.patch_task(task_id, task.clone())?;
        Ok(task)
    }
}
