//! In-memory task collection.
//!
//! `TaskCollection` is the authoritative client-side representation of all
//! tasks (each embedding its comments) and the single source of truth for
//! rendering. Every method here is a pure state transition; the collection
//! never performs I/O itself.

use super::model::Task;
use crate::error::{Result, TaskpadError};

/// The ordered set of tasks held by the client.
///
/// Insertion order among tasks is display order and is preserved across
/// partial updates. The collection holds at most one task per id. After any
/// successful mutation applied through the coordinators, the collection is
/// equivalent to what a full refetch from the remote store would return.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire collection, used after an initial load.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Appends one task to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns `TaskpadError::Duplicate` if a task with the same id is
    /// already present; the collection is left unchanged in that case.
    pub fn insert(&mut self, task: Task) -> Result<()> {
        if self.get(task.id).is_some() {
            return Err(TaskpadError::duplicate("Task", task.id));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Replaces the task with the given id with a fully-formed replacement,
    /// preserving its position in the display order.
    ///
    /// # Errors
    ///
    /// Returns `TaskpadError::NotFound` if no task with that id exists.
    pub fn patch_task(&mut self, task_id: i64, task: Task) -> Result<()> {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(slot) => {
                *slot = task;
                Ok(())
            }
            None => Err(TaskpadError::not_found("Task", task_id)),
        }
    }

    /// Removes the task with the given id, discarding its embedded comments
    /// along with it.
    ///
    /// # Errors
    ///
    /// Returns `TaskpadError::NotFound` if no task with that id exists.
    pub fn remove(&mut self, task_id: i64) -> Result<Task> {
        match self.tasks.iter().position(|t| t.id == task_id) {
            Some(index) => Ok(self.tasks.remove(index)),
            None => Err(TaskpadError::not_found("Task", task_id)),
        }
    }

    /// Returns the task with the given id, if present.
    pub fn get(&self, task_id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Returns the id of the task owning the given comment, if any task in
    /// the collection embeds it.
    pub fn owner_of_comment(&self, comment_id: i64) -> Option<i64> {
        self.tasks
            .iter()
            .find(|t| t.comments.iter().any(|c| c.id == comment_id))
            .map(|t| t.id)
    }

    /// All tasks in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
