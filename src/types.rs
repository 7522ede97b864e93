use chrono::{DateTime, Utc};
use serde::Deserialize;

// GitHub API response structures. Everything except `login` is optional on the
// wire; unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub public_repos: Option<u32>,
    pub followers: Option<u32>,
    pub following: Option<u32>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub html_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct GitHubErrorBody {
    pub message: String,
}
