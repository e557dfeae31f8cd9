//! tabboard - a two-tab terminal dashboard
//!
//! This library provides the core functionality for the tabboard CLI:
//! a persistent task list and a GitHub profile lookup behind a tab switcher.
//!
//! # Core Concepts
//!
//! - **Slots**: named string values in a key-value store, one file per slot
//! - **Tasks**: `{id, text, completed, createdAt}` records kept in one slot
//! - **Views**: each mutation re-renders the filtered list plus counters
//! - **Controls**: per-item toggle/delete handles bound to a task id
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `tabboard.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output envelopes
//! - `storage`: Data directory and slot stores
//! - `todo`: Task model, store, repository, filter, render engine, controller
//! - `profile`: Profile lookup client and widget
//! - `tabs`: Tab switcher
//! - `ui`: Terminal dashboard built on ratatui

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod profile;
pub mod storage;
pub mod tabs;
pub mod todo;
pub mod ui;

pub use error::{Error, Result};
