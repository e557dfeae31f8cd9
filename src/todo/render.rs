//! Render engine: (tasks, filter) -> visible list + counters.
//!
//! Each render produces a new [`RenderedView`]. Controls on a view carry the
//! task id they act on, so dispatch never depends on row positions, and a
//! view replaced by a newer render takes its controls with it.

use serde::Serialize;

use super::filter::Filter;
use super::model::{Task, TaskId};

/// Per-item affordance bound to one task id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Toggle(TaskId),
    Delete(TaskId),
}

impl Control {
    pub fn id(&self) -> &TaskId {
        match self {
            Control::Toggle(id) | Control::Delete(id) => id,
        }
    }
}

/// Progress over the whole collection, independent of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counters {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl Counters {
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed()).count();
        Self {
            total,
            pending: total - completed,
            completed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedItem {
    #[serde(flatten)]
    pub task: Task,
    #[serde(skip)]
    pub toggle: Control,
    #[serde(skip)]
    pub delete: Control,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderedView {
    pub filter: Filter,
    pub items: Vec<RenderedItem>,
    pub counters: Counters,
}

impl RenderedView {
    pub fn item(&self, row: usize) -> Option<&RenderedItem> {
        self.items.get(row)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.task.id().as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn render(tasks: &[Task], filter: Filter) -> RenderedView {
    let items: Vec<RenderedItem> = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .map(|task| RenderedItem {
            toggle: Control::Toggle(task.id().clone()),
            delete: Control::Delete(task.id().clone()),
            task: task.clone(),
        })
        .collect();
    let counters = Counters::of(tasks);
    tracing::debug!(%filter, visible = items.len(), total = counters.total, "rendered tasks");

    RenderedView {
        filter,
        items,
        counters,
    }
}
