//! Command-line interface for tabboard
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command group lives in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputMode;
use crate::storage::Storage;
use crate::todo::Filter;

mod profile;
mod todo;
mod ui;

/// tabboard - a two-tab terminal dashboard
///
/// A persistent todo list next to a GitHub profile lookup.
#[derive(Parser, Debug)]
#[command(name = "tabboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the task slots and tabboard.toml
    #[arg(long, global = true, env = "TABBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Explicit config file (must exist)
    #[arg(long, global = true, env = "TABBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the task list
    #[command(subcommand)]
    Todo(TodoCommands),

    /// Look up a GitHub profile
    Profile {
        /// GitHub username
        username: String,
    },

    /// Launch the terminal dashboard (default)
    Ui,
}

#[derive(Subcommand, Debug)]
pub enum TodoCommands {
    /// Add a task
    Add {
        /// Task text (words are joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Flip the completion state of a task
    Toggle {
        /// Task id
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: String,
    },

    /// List tasks
    List {
        /// Which tasks to show
        #[arg(long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
    },

    /// Show task counters
    Stats,
}

/// Resolved data directory plus effective configuration.
pub(crate) struct Context {
    pub storage: Storage,
    pub config: Config,
}

impl Context {
    pub(crate) fn load(data_dir: Option<PathBuf>, config: Option<&std::path::Path>) -> Result<Self> {
        let storage = Storage::resolve(data_dir)?;
        let config = Config::resolve(config, storage.data_dir())?;
        tracing::debug!(data_dir = %storage.data_dir().display(), "resolved context");
        Ok(Self { storage, config })
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let Cli {
            data_dir,
            config,
            json,
            quiet,
            command,
        } = self;
        let context = Context::load(data_dir, config.as_deref())?;
        let mode = OutputMode::from_flags(json, quiet);

        match command.unwrap_or(Commands::Ui) {
            Commands::Todo(command) => match command {
                TodoCommands::Add { text } => todo::run_add(
                    context,
                    todo::AddOptions {
                        text: text.join(" "),
                        mode,
                    },
                ),
                TodoCommands::Toggle { id } => {
                    todo::run_toggle(context, todo::IdOptions { id, mode })
                }
                TodoCommands::Rm { id } => todo::run_rm(context, todo::IdOptions { id, mode }),
                TodoCommands::List { filter } => {
                    todo::run_list(context, todo::ListOptions { filter, mode })
                }
                TodoCommands::Stats => todo::run_stats(context, mode),
            },
            Commands::Profile { username } => profile::run(
                context,
                profile::ProfileOptions { username, mode },
            ),
            Commands::Ui => ui::run(context),
        }
    }
}
