//! Coordinator behavior tests against an in-memory remote store double.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use taskpad_core::error::{Result, TaskpadError};
use taskpad_core::task::model::{Comment, CommentDraft, Task, TaskDraft, TaskPatch};
use taskpad_core::task::store::RemoteStore;
use tokio::sync::{Mutex, Notify};

use crate::coordinator::TaskCoordinator;
use crate::status::{Action, Banner};

const STAMP: &str = "2024-01-01T00:00:00";

/// In-memory stand-in for the HTTP store. Actions listed in `failing`
/// return a simulated network error; an optional gate holds requests open
/// so tests can observe in-flight state.
#[derive(Default)]
struct FakeStore {
    tasks: Mutex<Vec<Task>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<&'static str>>,
    gate: Mutex<Option<Arc<Notify>>>,
    next_id: AtomicI64,
}

impl FakeStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(100),
            ..Self::default()
        })
    }

    async fn seed(&self, tasks: Vec<Task>) {
        *self.tasks.lock().await = tasks;
    }

    async fn fail_on(&self, action: &'static str) {
        self.failing.lock().await.insert(action);
    }

    async fn hold_requests(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().await = Some(Arc::clone(&gate));
        gate
    }

    async fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().await.clone()
    }

    async fn enter(&self, action: &'static str) -> Result<()> {
        self.calls.lock().await.push(action);
        let gate = self.gate.lock().await.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.failing.lock().await.contains(action) {
            return Err(TaskpadError::remote(action, "simulated network error"));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for FakeStore {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.enter("list_tasks").await?;
        Ok(self.tasks.lock().await.clone())
    }

    async fn get_task(&self, task_id: i64) -> Result<Task> {
        self.enter("get_task").await?;
        self.tasks
            .lock()
            .await
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| TaskpadError::remote("get_task", "404 Not Found"))
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        self.enter("create_task").await?;
        let task = Task {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: draft.title.clone(),
            description: draft.description.clone(),
            completed: draft.completed,
            created_at: STAMP.to_string(),
            updated_at: STAMP.to_string(),
            comments: Vec::new(),
        };
        self.tasks.lock().await.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, task_id: i64, patch: &TaskPatch) -> Result<Task> {
        self.enter("update_task").await?;
        let mut tasks = self.tasks.lock().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| TaskpadError::remote("update_task", "404 Not Found"))?;
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = Some(description.clone());
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        Ok(task.clone())
    }

    async fn delete_task(&self, task_id: i64) -> Result<()> {
        self.enter("delete_task").await?;
        self.tasks.lock().await.retain(|t| t.id != task_id);
        Ok(())
    }

    async fn create_comment(&self, task_id: i64, draft: &CommentDraft) -> Result<Comment> {
        self.enter("create_comment").await?;
        let comment = Comment {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            task_id,
            content: draft.content.clone(),
            created_at: STAMP.to_string(),
            updated_at: STAMP.to_string(),
        };
        let mut tasks = self.tasks.lock().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| TaskpadError::remote("create_comment", "404 Not Found"))?;
        task.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, comment_id: i64, draft: &CommentDraft) -> Result<Comment> {
        self.enter("update_comment").await?;
        let mut tasks = self.tasks.lock().await;
        let comment = tasks
            .iter_mut()
            .flat_map(|t| t.comments.iter_mut())
            .find(|c| c.id == comment_id)
            .ok_or_else(|| TaskpadError::remote("update_comment", "404 Not Found"))?;
        comment.content = draft.content.clone();
        Ok(comment.clone())
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<()> {
        self.enter("delete_comment").await?;
        for task in self.tasks.lock().await.iter_mut() {
            task.comments.retain(|c| c.id != comment_id);
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        self.enter("health_check").await
    }
}

fn task(id: i64, title: &str) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        completed: false,
        created_at: STAMP.to_string(),
        updated_at: STAMP.to_string(),
        comments: Vec::new(),
    }
}

fn comment(id: i64, task_id: i64, content: &str) -> Comment {
    Comment {
        id,
        task_id,
        content: content.to_string(),
        created_at: STAMP.to_string(),
        updated_at: STAMP.to_string(),
    }
}

/// Seeds the fake store and loads the collection through the coordinator.
async fn loaded(tasks: Vec<Task>) -> (Arc<FakeStore>, TaskCoordinator) {
    let store = FakeStore::new();
    store.seed(tasks).await;
    let coordinator = TaskCoordinator::new(store.clone());
    coordinator.load_tasks().await.unwrap();
    (store, coordinator)
}

#[tokio::test]
async fn test_create_task_appends_persisted_result() {
    let (_, coordinator) = loaded(vec![task(1, "existing")]).await;

    let created = coordinator
        .create_task(TaskDraft::new("write the report"))
        .await
        .unwrap();

    assert_eq!(created.id, 100);
    assert!(!created.created_at.is_empty());

    let snapshot = coordinator.snapshot().await;
    let ids: Vec<i64> = snapshot.tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 100], "new task is appended at the end");
}

#[tokio::test]
async fn test_blank_title_never_reaches_store() {
    let store = FakeStore::new();
    let coordinator = TaskCoordinator::new(store.clone());

    let err = coordinator
        .create_task(TaskDraft::new("   "))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(store.calls().await.is_empty());
    assert!(coordinator.snapshot().await.is_empty());
    assert!(matches!(
        coordinator.status().banner().await,
        Some(Banner::Error(_))
    ));
}

#[tokio::test]
async fn test_delete_task_removes_exactly_that_task() {
    let (_, coordinator) = loaded(vec![task(1, "A"), task(2, "B")]).await;

    coordinator.delete_task(1).await.unwrap();

    let snapshot = coordinator.snapshot().await;
    let ids: Vec<i64> = snapshot.tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2]);
    assert_eq!(snapshot.get(2).unwrap().title, "B");
}

#[tokio::test]
async fn test_failed_update_leaves_collection_unchanged() {
    let (store, coordinator) = loaded(vec![task(1, "A")]).await;
    store.fail_on("update_task").await;

    let before = coordinator.snapshot().await;
    let err = coordinator
        .update_task(1, TaskPatch::completion(true))
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert_eq!(coordinator.snapshot().await, before);
    assert_eq!(
        coordinator.status().banner().await,
        Some(Banner::Error("Failed to update task".to_string()))
    );
    assert!(!coordinator.status().is_busy(Action::UpdateTask).await);
}

#[tokio::test]
async fn test_create_comment_refreshes_only_the_owning_task() {
    let (store, coordinator) = loaded(vec![task(1, "A"), task(2, "B")]).await;
    let other_before = coordinator.snapshot().await.get(2).unwrap().clone();

    let refreshed = coordinator
        .create_comment(1, CommentDraft::new("hi"))
        .await
        .unwrap();

    assert_eq!(refreshed.comments.len(), 1);
    assert_eq!(refreshed.comments[0].content, "hi");

    let snapshot = coordinator.snapshot().await;
    assert_eq!(snapshot.get(1).unwrap().comments[0].content, "hi");
    assert_eq!(snapshot.get(2).unwrap(), &other_before);

    // Mutation then single-task refetch, never a full list refresh.
    let calls = store.calls().await;
    assert_eq!(calls, vec!["list_tasks", "create_comment", "get_task"]);
}

#[tokio::test]
async fn test_update_comment_touches_only_owner() {
    let mut first = task(1, "A");
    first.comments.push(comment(10, 1, "old"));
    let mut second = task(2, "B");
    second.comments.push(comment(11, 2, "keep"));

    let (_, coordinator) = loaded(vec![first, second]).await;
    let other_before = coordinator.snapshot().await.get(2).unwrap().clone();

    coordinator
        .update_comment(10, CommentDraft::new("new"))
        .await
        .unwrap();

    let snapshot = coordinator.snapshot().await;
    assert_eq!(snapshot.get(1).unwrap().comments[0].content, "new");
    assert_eq!(snapshot.get(2).unwrap(), &other_before);
}

#[tokio::test]
async fn test_delete_comment_refreshes_owner() {
    let mut first = task(1, "A");
    first.comments.push(comment(10, 1, "bye"));

    let (_, coordinator) = loaded(vec![first]).await;

    coordinator.delete_comment(10).await.unwrap();

    assert!(coordinator.snapshot().await.get(1).unwrap().comments.is_empty());
    assert_eq!(
        coordinator.status().banner().await,
        Some(Banner::Success("Comment deleted successfully!".to_string()))
    );
}

#[tokio::test]
async fn test_blank_comment_never_reaches_store() {
    let (store, coordinator) = loaded(vec![task(1, "A")]).await;
    let before = coordinator.snapshot().await;

    let err = coordinator
        .create_comment(1, CommentDraft::new(" \t"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(store.calls().await, vec!["list_tasks"]);
    assert_eq!(coordinator.snapshot().await, before);
}

#[tokio::test]
async fn test_comment_on_unknown_task_rejected_locally() {
    let (store, coordinator) = loaded(vec![task(1, "A")]).await;

    let err = coordinator
        .create_comment(99, CommentDraft::new("orphan"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(store.calls().await, vec!["list_tasks"]);
}

#[tokio::test]
async fn test_unknown_comment_rejected_locally() {
    let (store, coordinator) = loaded(vec![task(1, "A")]).await;

    let err = coordinator.delete_comment(55).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(store.calls().await, vec!["list_tasks"]);
}

#[tokio::test]
async fn test_toggle_complete_flips_current_local_state() {
    let (_, coordinator) = loaded(vec![task(1, "A")]).await;

    let toggled = coordinator.toggle_complete(1).await.unwrap();
    assert!(toggled.completed);
    assert!(coordinator.snapshot().await.get(1).unwrap().completed);

    let toggled = coordinator.toggle_complete(1).await.unwrap();
    assert!(!toggled.completed);
}

#[tokio::test]
async fn test_busy_guard_blocks_duplicate_submission() {
    let store = FakeStore::new();
    let gate = store.hold_requests().await;
    let coordinator = TaskCoordinator::new(store.clone());

    let in_flight = coordinator.clone();
    let handle =
        tokio::spawn(async move { in_flight.create_task(TaskDraft::new("slow")).await });

    // Let the first submission reach the store and park on the gate.
    while !coordinator.status().is_busy(Action::CreateTask).await {
        tokio::task::yield_now().await;
    }

    let err = coordinator
        .create_task(TaskDraft::new("duplicate"))
        .await
        .unwrap_err();
    assert!(err.is_busy());

    // A different action kind is not blocked by the guard (it parks on the
    // gate only after passing it).
    assert!(!coordinator.status().is_busy(Action::DeleteTask).await);

    gate.notify_one();
    handle.await.unwrap().unwrap();

    assert_eq!(coordinator.snapshot().await.len(), 1);
    assert!(!coordinator.status().is_busy(Action::CreateTask).await);
}

#[tokio::test]
async fn test_failed_load_sets_error_and_clears_loading() {
    let store = FakeStore::new();
    store.fail_on("list_tasks").await;
    let coordinator = TaskCoordinator::new(store);

    let err = coordinator.load_tasks().await.unwrap_err();

    assert!(err.is_remote());
    assert!(!coordinator.status().is_loading().await);
    assert_eq!(
        coordinator.status().banner().await,
        Some(Banner::Error("Failed to fetch tasks".to_string()))
    );
}
