use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::Task;

/// View selector. Restricts the visible list, never the counters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.completed(),
            Filter::Completed => task.completed(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "pending" => Ok(Filter::Pending),
            "completed" => Ok(Filter::Completed),
            other => Err(format!(
                "unknown filter '{other}' (expected all|pending|completed)"
            )),
        }
    }
}

/// Current filter of a widget instance. Not persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterState {
    current: Filter,
}

impl FilterState {
    pub fn get(&self) -> Filter {
        self.current
    }

    pub fn set(&mut self, filter: Filter) {
        self.current = filter;
    }
}
