//! Tab switcher for the dashboard.
//!
//! Switching tabs only changes which widget is shown; neither widget's state
//! is touched.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Todo,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Todo, Tab::Profile];

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Todo => "todo",
            Tab::Profile => "profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Todo => "1 Todo",
            Tab::Profile => "2 Profile",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Tab::Todo),
            "profile" => Ok(Tab::Profile),
            other => Err(format!("unknown tab '{other}' (expected todo|profile)")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TabSwitcher {
    active: Tab,
}

impl TabSwitcher {
    pub fn new(active: Tab) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn activate(&mut self, tab: Tab) {
        if self.active != tab {
            tracing::debug!(from = %self.active, to = %tab, "switching tab");
        }
        self.active = tab;
    }

    pub fn next(&mut self) {
        let pos = Tab::ALL.iter().position(|tab| *tab == self.active).unwrap_or(0);
        self.activate(Tab::ALL[(pos + 1) % Tab::ALL.len()]);
    }

    pub fn previous(&mut self) {
        let pos = Tab::ALL.iter().position(|tab| *tab == self.active).unwrap_or(0);
        self.activate(Tab::ALL[(pos + Tab::ALL.len() - 1) % Tab::ALL.len()]);
    }
}
