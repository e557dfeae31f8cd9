//! Interaction controller for the todo widget.
//!
//! All widget state lives on a [`TodoWidget`] instance. Every event runs to
//! completion synchronously: mutate, persist (inside the repository), render.

use crate::storage::SlotStore;

use super::filter::{Filter, FilterState};
use super::model::TaskId;
use super::render::{render, Control, RenderedView};
use super::repository::TaskRepository;
use super::store::TaskStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoEvent {
    /// Replace the input buffer.
    Input(String),
    /// Submit button.
    Submit,
    /// Enter pressed in the input field; same as `Submit`.
    EnterKey,
    /// A toggle or delete control of the current view was activated.
    Activate(Control),
    /// A filter control was activated.
    SetFilter(Filter),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub changed: bool,
    pub message: String,
    pub task_id: Option<TaskId>,
}

impl ActionOutcome {
    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            changed: false,
            message: message.into(),
            task_id: None,
        }
    }
}

#[derive(Debug)]
pub struct TodoWidget<S> {
    repository: TaskRepository<S>,
    filter: FilterState,
    input: String,
    view: RenderedView,
}

impl<S: SlotStore> TodoWidget<S> {
    pub fn new(repository: TaskRepository<S>) -> Self {
        let filter = FilterState::default();
        let view = render(repository.all(), filter.get());
        Self {
            repository,
            filter,
            input: String::new(),
            view,
        }
    }

    /// Hydrate a widget from `slot` of `slots`.
    pub fn open(slots: S, slot: &str) -> Self {
        Self::new(TaskRepository::open(TaskStore::new(slots, slot)))
    }

    pub fn handle(&mut self, event: TodoEvent) -> ActionOutcome {
        match event {
            TodoEvent::Input(text) => {
                self.input = text;
                ActionOutcome::unchanged("")
            }
            TodoEvent::Submit | TodoEvent::EnterKey => self.submit(),
            TodoEvent::Activate(Control::Toggle(id)) => {
                let matched = self.repository.toggle(id.as_str());
                self.rerender();
                let message = match self.repository.get(id.as_str()) {
                    Some(task) if task.completed() => format!("completed {id}"),
                    Some(_) => format!("reopened {id}"),
                    None => format!("no task {id}"),
                };
                ActionOutcome {
                    changed: matched,
                    message,
                    task_id: matched.then_some(id),
                }
            }
            TodoEvent::Activate(Control::Delete(id)) => {
                let matched = self.repository.remove(id.as_str());
                self.rerender();
                let message = if matched {
                    format!("deleted {id}")
                } else {
                    format!("no task {id}")
                };
                ActionOutcome {
                    changed: matched,
                    message,
                    task_id: matched.then_some(id),
                }
            }
            TodoEvent::SetFilter(filter) => {
                self.filter.set(filter);
                self.rerender();
                ActionOutcome::unchanged(format!("filter: {filter}"))
            }
        }
    }

    fn submit(&mut self) -> ActionOutcome {
        match self.repository.add(&self.input) {
            Some(task) => {
                self.rerender();
                self.input.clear();
                ActionOutcome {
                    changed: true,
                    message: format!("added {}", task.id()),
                    task_id: Some(task.id().clone()),
                }
            }
            None => ActionOutcome::unchanged(""),
        }
    }

    fn rerender(&mut self) {
        self.view = render(self.repository.all(), self.filter.get());
    }

    pub fn view(&self) -> &RenderedView {
        &self.view
    }

    pub fn filter(&self) -> Filter {
        self.filter.get()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn repository(&self) -> &TaskRepository<S> {
        &self.repository
    }
}
