use crate::error::{Error, Result};

use super::model::ProfileSummary;

pub const EMPTY_USERNAME_MESSAGE: &str = "Please enter a GitHub username";
pub const NOT_FOUND_MESSAGE: &str = "User not found";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileStatus {
    Idle,
    Loading(String),
    Loaded(ProfileSummary),
    Failed(String),
}

/// Profile panel state. Shares nothing with the task widget.
#[derive(Debug, Clone)]
pub struct ProfileWidget {
    input: String,
    status: ProfileStatus,
}

impl Default for ProfileWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileWidget {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            status: ProfileStatus::Idle,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn status(&self) -> &ProfileStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ProfileStatus::Loading(_))
    }

    /// Start a lookup for the current input.
    ///
    /// Returns the username to request, or `None` when the input is blank (the
    /// status then carries the prompt message).
    pub fn submit(&mut self) -> Option<String> {
        let username = self.input.trim().to_string();
        if username.is_empty() {
            self.status = ProfileStatus::Failed(EMPTY_USERNAME_MESSAGE.to_string());
            return None;
        }
        self.status = ProfileStatus::Loading(username.clone());
        Some(username)
    }

    /// Settle a lookup. Results for anything but the latest request are dropped.
    pub fn finish(&mut self, username: &str, result: Result<ProfileSummary>) {
        match &self.status {
            ProfileStatus::Loading(pending) if pending == username => {}
            _ => {
                tracing::debug!(%username, "dropping stale profile result");
                return;
            }
        }
        self.status = match result {
            Ok(summary) => ProfileStatus::Loaded(summary),
            Err(err) => ProfileStatus::Failed(failure_message(&err)),
        };
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.status = ProfileStatus::Idle;
    }
}

/// Panel text for a failed lookup: not found, or the generic message.
pub fn failure_message(err: &Error) -> String {
    let message = match err {
        Error::ProfileNotFound(_) => NOT_FOUND_MESSAGE,
        _ => GENERIC_FAILURE_MESSAGE,
    };
    message.to_string()
}
