//! tabboard profile command implementation

use crate::error::Result;
use crate::output::{OutputMode, Report};
use crate::profile::{GithubProfileClient, ProfileSource};

use super::Context;

/// Options for `tabboard profile`
pub struct ProfileOptions {
    pub username: String,
    pub mode: OutputMode,
}

pub fn run(context: Context, options: ProfileOptions) -> Result<()> {
    let client = GithubProfileClient::new(&context.config.profile)?;
    let summary = client.lookup(&options.username)?;

    let mut report = Report::new(
        "profile",
        format!("{} (@{})", summary.name, summary.login),
    );
    report.push_summary("bio", &summary.bio);
    report.push_summary("repos", summary.public_repos.to_string());
    report.push_summary("followers", summary.followers.to_string());
    report.push_summary("following", summary.following.to_string());
    report.push_detail(format!("company: {}", summary.company));
    report.push_detail(format!("location: {}", summary.location));
    report.push_detail(format!("email: {}", summary.email));
    report.push_detail(format!("website: {}", summary.blog));
    report.push_detail(format!("twitter: {}", summary.twitter));
    if let Some(url) = summary.profile_url.as_deref() {
        report.push_detail(format!("profile: {url}"));
    }

    report.emit(options.mode, &summary)
}
