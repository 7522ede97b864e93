use crate::error::{LookupError, Result};
use crate::models::ProfileRecord;
use crate::source::ProfileSource;
use crate::types::{GitHubErrorBody, GitHubUser};
use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Settings for the profile service client
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("github-profile-lookup/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(config: GitHubClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_url)?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::ApiError(format!(
                "API URL cannot be used as a base: {}",
                config.api_url
            )));
        }

        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(GitHubClient { client, base_url })
    }

    /// `{api_url}/users/{username}`, with the username encoded as one path segment
    pub fn user_url(&self, username: &str) -> Result<Url> {
        // `.` and `..` are dropped by URL normalization and would hit `/users`,
        // the user listing. No GitHub login can be dot-only.
        if !username.is_empty() && username.chars().all(|c| c == '.') {
            return Err(LookupError::NotFound(username.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::ApiError(format!("API URL cannot be used as a base: {}", self.base_url)))?
            .pop_if_empty()
            .push("users")
            .push(username);
        Ok(url)
    }

    /// Fetch a single user profile. One request, no retries.
    pub async fn fetch_user(&self, username: &str) -> Result<ProfileRecord> {
        let url = self.user_url(username)?;
        debug!(%url, "Fetching GitHub profile");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(LookupError::NotFound(username.to_string()));
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                warn!(%status, username, "Profile request failed");
                return Err(LookupError::ApiError(format!(
                    "request failed with status {}: {}",
                    status,
                    error_message(&error_text)
                )));
            }
        }

        let body = response.text().await?;
        let user: GitHubUser = serde_json::from_str(&body)?;
        ProfileRecord::try_from(user)
    }
}

impl ProfileSource for GitHubClient {
    fn fetch_profile<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<ProfileRecord>> {
        self.fetch_user(key).boxed()
    }
}

// GitHub error bodies look like {"message": "...", "documentation_url": "..."}
fn error_message(body: &str) -> String {
    match serde_json::from_str::<GitHubErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
