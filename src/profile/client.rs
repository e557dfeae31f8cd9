//! Remote user-directory client.

use std::time::Duration;

use reqwest::header::ACCEPT;
use tokio::runtime::Runtime;

use crate::config::ProfileConfig;
use crate::error::{Error, Result};

use super::model::{ProfileSummary, UserRecord};

/// Something that can resolve a username to a profile.
pub trait ProfileSource {
    fn lookup(&self, username: &str) -> Result<ProfileSummary>;
}

/// Map a response status to the lookup outcome.
pub fn classify_status(status: u16, username: &str) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        404 => Err(Error::ProfileNotFound(username.to_string())),
        other => Err(Error::ProfileLookup(format!("HTTP {other}"))),
    }
}

/// Usernames go into the request path, so only directory-safe names pass.
/// A name outside that alphabet cannot exist upstream and reports as not
/// found without a request.
pub fn validate_username(username: &str) -> Result<&str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::InvalidArgument("username cannot be empty".to_string()));
    }
    if !username
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
    {
        return Err(Error::ProfileNotFound(username.to_string()));
    }
    Ok(username)
}

/// GitHub-compatible `GET /users/{username}` client.
///
/// Owns a current-thread runtime so callers stay synchronous.
pub struct GithubProfileClient {
    http: reqwest::Client,
    api_base: String,
    runtime: Runtime,
}

impl GithubProfileClient {
    pub fn new(config: &ProfileConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base.trim().trim_end_matches('/').to_string(),
            runtime,
        })
    }

    pub fn user_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.api_base, username)
    }

    pub async fn fetch(&self, username: &str) -> Result<ProfileSummary> {
        let username = validate_username(username)?;
        let url = self.user_url(username);
        tracing::info!(%url, "looking up profile");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|err| Error::ProfileLookup(err.to_string()))?;

        let status = response.status().as_u16();
        if let Err(err) = classify_status(status, username) {
            tracing::info!(%username, status, "profile lookup failed");
            return Err(err);
        }

        let record: UserRecord = response
            .json()
            .await
            .map_err(|err| Error::ProfileLookup(format!("invalid response: {err}")))?;
        Ok(record.into())
    }
}

impl ProfileSource for GithubProfileClient {
    fn lookup(&self, username: &str) -> Result<ProfileSummary> {
        self.runtime.block_on(self.fetch(username))
    }
}
