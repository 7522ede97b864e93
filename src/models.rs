use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LookupError;
use crate::types::GitHubUser;

/// Identifier the user typed. An empty key means "no active search".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchKey(String);

impl SearchKey {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SearchKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Normalized GitHub profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl ProfileRecord {
    /// Name shown on the card; falls back to the login.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }

    /// Single letter used when the avatar image is unavailable.
    pub fn avatar_initial(&self) -> char {
        self.login
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }

    /// The `blog` field as a followable link. Users often omit the scheme.
    pub fn blog_url(&self) -> Option<String> {
        self.blog.as_ref().map(|blog| {
            if blog.starts_with("http") {
                blog.clone()
            } else {
                format!("https://{}", blog)
            }
        })
    }
}

impl TryFrom<GitHubUser> for ProfileRecord {
    type Error = LookupError;

    fn try_from(user: GitHubUser) -> Result<Self, Self::Error> {
        let login = user.login.trim().to_string();
        if login.is_empty() {
            return Err(LookupError::InvalidProfile(
                "profile has an empty login".to_string(),
            ));
        }

        Ok(ProfileRecord {
            name: non_empty(user.name),
            avatar_url: user.avatar_url.unwrap_or_default(),
            bio: non_empty(user.bio),
            public_repos: user.public_repos.unwrap_or(0),
            followers: user.followers.unwrap_or(0),
            following: user.following.unwrap_or(0),
            location: non_empty(user.location),
            company: non_empty(user.company),
            blog: non_empty(user.blog),
            html_url: user
                .html_url
                .unwrap_or_else(|| format!("https://github.com/{}", login)),
            created_at: user.created_at,
            login,
        })
    }
}

// GitHub returns "" for cleared profile fields
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Current state of the lookup, as seen by rendering surfaces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupState {
    #[default]
    Idle,
    Loading { key: String },
    Success(ProfileRecord),
    Failure { message: String },
}

impl LookupState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading { .. })
    }

    pub fn profile(&self) -> Option<&ProfileRecord> {
        match self {
            LookupState::Success(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Counters kept by the lookup controller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupStats {
    pub submissions: u64,
    pub fetches_started: u64,
    pub fetches_completed: u64,
    pub stale_responses_discarded: u64,
}
