//! Profile lookup widget: one username in, one profile summary (or an error
//! message) out. Independent of the task widget.

pub mod client;
pub mod model;
pub mod widget;

pub use client::{classify_status, validate_username, GithubProfileClient, ProfileSource};
pub use model::{ProfileSummary, UserRecord};
pub use widget::{failure_message, ProfileStatus, ProfileWidget};
