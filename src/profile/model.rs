use serde::{Deserialize, Serialize};

pub const NO_NAME: &str = "No name";
pub const NO_BIO: &str = "No bio available";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const NO_WEBSITE: &str = "No website";

/// User record as returned by the directory API. Only consumed fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Display-ready profile with fallbacks applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub login: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: String,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub company: String,
    pub location: String,
    pub email: String,
    pub blog: String,
    pub twitter: String,
    pub profile_url: Option<String>,
}

impl From<UserRecord> for ProfileSummary {
    fn from(record: UserRecord) -> Self {
        Self {
            name: or_fallback(record.name, NO_NAME),
            avatar_url: present(record.avatar_url),
            bio: or_fallback(record.bio, NO_BIO),
            public_repos: record.public_repos,
            followers: record.followers,
            following: record.following,
            company: or_fallback(record.company, NOT_SPECIFIED),
            location: or_fallback(record.location, NOT_SPECIFIED),
            email: or_fallback(record.email, NOT_SPECIFIED),
            blog: or_fallback(record.blog, NO_WEBSITE),
            twitter: or_fallback(record.twitter_username, NOT_SPECIFIED),
            profile_url: present(record.html_url),
            login: record.login,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn or_fallback(value: Option<String>, fallback: &str) -> String {
    present(value).unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallbacks_fill_missing_fields() {
        let record: UserRecord = serde_json::from_str(
            r#"{"login":"ghost","name":null,"bio":"","blog":"","public_repos":2}"#,
        )
        .expect("parse");
        let summary = ProfileSummary::from(record);
        assert_eq!(summary.login, "ghost");
        assert_eq!(summary.name, NO_NAME);
        assert_eq!(summary.bio, NO_BIO);
        assert_eq!(summary.company, NOT_SPECIFIED);
        assert_eq!(summary.twitter, NOT_SPECIFIED);
        assert_eq!(summary.blog, NO_WEBSITE);
        assert_eq!(summary.public_repos, 2);
        assert_eq!(summary.avatar_url, None);
    }

    #[test]
    fn present_fields_are_kept() {
        let record: UserRecord = serde_json::from_str(
            r#"{
                "login":"octocat","name":"The Octocat","company":"@github",
                "location":"San Francisco","blog":"https://github.blog",
                "twitter_username":"octo","followers":10,"following":1,
                "avatar_url":"https://avatars.example/1","html_url":"https://github.com/octocat"
            }"#,
        )
        .expect("parse");
        let summary = ProfileSummary::from(record);
        assert_eq!(summary.name, "The Octocat");
        assert_eq!(summary.company, "@github");
        assert_eq!(summary.twitter, "octo");
        assert_eq!(summary.followers, 10);
        assert_eq!(summary.profile_url.as_deref(), Some("https://github.com/octocat"));
    }
}
