//! In-memory authoritative task collection.
//!
//! Every mutating call re-serializes the full collection to the store before
//! returning. A failed write is logged and remembered; the in-memory state
//! stays authoritative. While the slot still holds data that failed to load,
//! toggles and removals that match nothing leave it untouched.

use chrono::Utc;

use crate::storage::SlotStore;

use super::model::{Task, TaskId};
use super::store::TaskStore;

#[derive(Debug)]
pub struct TaskRepository<S> {
    store: TaskStore<S>,
    tasks: Vec<Task>,
    last_save_error: Option<String>,
    unusable_slot: bool,
}

impl<S: SlotStore> TaskRepository<S> {
    /// Hydrate from the store (empty when absent or malformed).
    pub fn open(store: TaskStore<S>) -> Self {
        let (tasks, unusable_slot) = store.load_checked();
        Self {
            store,
            tasks,
            last_save_error: None,
            unusable_slot,
        }
    }

    /// Append a new pending task. Blank text is ignored and nothing is persisted.
    pub fn add(&mut self, text: &str) -> Option<Task> {
        let mut id = TaskId::generate();
        while self.get(id.as_str()).is_some() {
            id = TaskId::generate();
        }
        let task = Task::new(id, text, Utc::now())?;
        tracing::debug!(id = %task.id(), "adding task");
        self.tasks.push(task.clone());
        self.persist();
        Some(task)
    }

    /// Flip `completed` of the task with `id`. Returns whether a task matched.
    pub fn toggle(&mut self, id: &str) -> bool {
        let matched = match self.tasks.iter_mut().find(|task| task.id().as_str() == id) {
            Some(task) => {
                task.toggle();
                tracing::debug!(%id, completed = task.completed(), "toggled task");
                true
            }
            None => {
                tracing::debug!(%id, "toggle ignored: unknown id");
                false
            }
        };
        self.persist_after(matched);
        matched
    }

    /// Delete the task with `id`. Returns whether a task matched.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id().as_str() != id);
        let matched = self.tasks.len() != before;
        if matched {
            tracing::debug!(%id, "removed task");
        } else {
            tracing::debug!(%id, "remove ignored: unknown id");
        }
        self.persist_after(matched);
        matched
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id().as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Message of the most recent failed write, cleared by the next success.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    fn persist_after(&mut self, matched: bool) {
        if !matched && self.unusable_slot {
            tracing::debug!(slot = %self.store.slot(), "keeping unreadable slot after no-op");
            return;
        }
        self.persist();
    }

    fn persist(&mut self) {
        match self.store.save(&self.tasks) {
            Ok(()) => {
                self.last_save_error = None;
                self.unusable_slot = false;
            }
            Err(err) => {
                tracing::warn!(slot = %self.store.slot(), error = %err, "failed to persist tasks");
                self.last_save_error = Some(err.to_string());
            }
        }
    }
}
