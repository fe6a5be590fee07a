//! Shared UI status state.
//!
//! Holds the transient state the presentation layer renders around the task
//! collection: the success/error banner, the per-action busy flags, and the
//! initial-load indicator. The state is created at app init and mutated only
//! by the coordinators.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use taskpad_core::error::{Result, TaskpadError};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// How long a success banner stays visible before auto-clearing.
pub const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(3);

/// One entry per coordinator, used to key the per-action busy flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    LoadTasks,
    CreateTask,
    UpdateTask,
    ToggleComplete,
    DeleteTask,
    CreateComment,
    UpdateComment,
    DeleteComment,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::LoadTasks => "load_tasks",
            Action::CreateTask => "create_task",
            Action::UpdateTask => "update_task",
            Action::ToggleComplete => "toggle_complete",
            Action::DeleteTask => "delete_task",
            Action::CreateComment => "create_comment",
            Action::UpdateComment => "update_comment",
            Action::DeleteComment => "delete_comment",
        }
    }
}

/// The message currently shown in the status region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    /// Auto-clears after `SUCCESS_BANNER_TTL`.
    Success(String),
    /// Persists until the next action completes.
    Error(String),
}

#[derive(Debug, Default)]
struct StatusInner {
    banner: Option<Banner>,
    busy: HashSet<Action>,
    loading: bool,
    /// Pending auto-clear for the current success banner. Kept so a
    /// superseding action aborts it instead of racing it.
    clear_timer: Option<JoinHandle<()>>,
}

/// Shared handle to the status state.
///
/// Cheap to clone; all clones observe the same state. Reads are exposed to
/// the presentation layer, writes only to the coordinators in this crate.
#[derive(Debug, Clone, Default)]
pub struct SharedStatus {
    inner: Arc<Mutex<StatusInner>>,
}

impl SharedStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// The banner currently visible, if any.
    pub async fn banner(&self) -> Option<Banner> {
        self.inner.lock().await.banner.clone()
    }

    /// Whether an action of the given kind is currently in flight.
    pub async fn is_busy(&self, action: Action) -> bool {
        self.inner.lock().await.busy.contains(&action)
    }

    /// Whether the initial task list load is in flight.
    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.loading
    }

    pub(crate) async fn set_loading(&self, loading: bool) {
        self.inner.lock().await.loading = loading;
    }

    /// Marks an action as in flight.
    ///
    /// A new attempt dismisses whatever banner the previous action left
    /// behind, including a sticky error.
    ///
    /// # Errors
    ///
    /// Returns `TaskpadError::Busy` if an action of the same kind is already
    /// in flight; the busy flag guards duplicate submissions per action, not
    /// globally.
    pub(crate) async fn begin(&self, action: Action) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.busy.contains(&action) {
            return Err(TaskpadError::busy(action.as_str()));
        }
        inner.busy.insert(action);
        Self::clear_banner(&mut inner);
        Ok(())
    }

    /// Clears the busy flag and shows a success banner that auto-clears
    /// after `SUCCESS_BANNER_TTL`.
    pub(crate) async fn finish_success(&self, action: Action, message: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        inner.busy.remove(&action);
        Self::clear_banner(&mut inner);
        inner.banner = Some(Banner::Success(message.into()));

        let shared = Arc::clone(&self.inner);
        inner.clear_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(SUCCESS_BANNER_TTL).await;
            let mut inner = shared.lock().await;
            if matches!(inner.banner, Some(Banner::Success(_))) {
                inner.banner = None;
            }
            inner.clear_timer = None;
        }));
    }

    /// Clears the busy flag without posting a banner, for plain reads.
    pub(crate) async fn finish_quiet(&self, action: Action) {
        self.inner.lock().await.busy.remove(&action);
    }

    /// Clears the busy flag and shows an error banner. The banner persists
    /// until the next action completes.
    pub(crate) async fn finish_error(&self, action: Action, message: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        inner.busy.remove(&action);
        Self::clear_banner(&mut inner);
        inner.banner = Some(Banner::Error(message.into()));
    }

    /// Reports a local rejection (validation, unknown entity) without
    /// touching the busy flags; the action never started.
    pub(crate) async fn reject(&self, message: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        Self::clear_banner(&mut inner);
        inner.banner = Some(Banner::Error(message.into()));
    }

    fn clear_banner(inner: &mut StatusInner) {
        if let Some(timer) = inner.clear_timer.take() {
            timer.abort();
        }
        inner.banner = None;
    }
}
