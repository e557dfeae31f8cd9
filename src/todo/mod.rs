//! Task list widget: persistent collection, filter, render engine and
//! interaction controller.
//!
//! Flow of one user action:
//!
//! ```text
//! TodoEvent -> TodoWidget::handle -> TaskRepository (mutate + persist)
//!                                 -> FilterState
//!                                 -> render() -> RenderedView (replaces the old one)
//! ```

pub mod controller;
pub mod filter;
pub mod model;
pub mod render;
pub mod repository;
pub mod store;

pub use controller::{ActionOutcome, TodoEvent, TodoWidget};
pub use filter::{Filter, FilterState};
pub use model::{Task, TaskId};
pub use render::{render, Control, Counters, RenderedItem, RenderedView};
pub use repository::TaskRepository;
pub use store::{TaskStore, DEFAULT_SLOT};
