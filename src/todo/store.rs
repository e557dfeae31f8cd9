//! Persistent store adapter for the task collection.
//!
//! The whole collection lives in a single slot as a JSON array. A missing or
//! malformed slot loads as an empty collection.

use std::collections::HashSet;

use crate::error::Result;
use crate::storage::SlotStore;

use super::model::Task;

/// Default slot name of the task collection
pub const DEFAULT_SLOT: &str = "todos";

#[derive(Debug, Clone)]
pub struct TaskStore<S> {
    slots: S,
    slot: String,
}

impl<S: SlotStore> TaskStore<S> {
    pub fn new(slots: S, slot: impl Into<String>) -> Self {
        Self {
            slots,
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Load the persisted collection in stored order.
    pub fn load(&self) -> Vec<Task> {
        self.load_checked().0
    }

    /// Like [`TaskStore::load`], also reporting whether the slot held data
    /// that could not be used and was replaced by an empty collection.
    pub(crate) fn load_checked(&self) -> (Vec<Task>, bool) {
        let raw = match self.slots.get(&self.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (Vec::new(), false),
            Err(err) => {
                tracing::warn!(slot = %self.slot, error = %err, "task slot unreadable; starting empty");
                return (Vec::new(), true);
            }
        };

        match decode(&raw) {
            Ok(tasks) => {
                tracing::debug!(slot = %self.slot, count = tasks.len(), "loaded tasks");
                (tasks, false)
            }
            Err(reason) => {
                tracing::warn!(slot = %self.slot, %reason, "task slot malformed; starting empty");
                (Vec::new(), true)
            }
        }
    }

    /// Overwrite the slot with the full collection.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string(tasks)?;
        self.slots.set(&self.slot, &json)
    }
}

fn decode(raw: &str) -> std::result::Result<Vec<Task>, String> {
    let tasks: Vec<Task> = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    let mut seen = HashSet::new();
    for task in &tasks {
        if !task.has_text() {
            return Err(format!("task {} has empty text", task.id()));
        }
        if !seen.insert(task.id().clone()) {
            return Err(format!("duplicate task id {}", task.id()));
        }
    }
    Ok(tasks)
}
