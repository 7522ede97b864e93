use clap::Parser;

use crate::github::{GitHubClientConfig, DEFAULT_API_URL};

#[derive(Parser, Debug)]
#[command(name = "github-profile-lookup")]
#[command(about = "GitHub Profile Lookup - Search for GitHub users and view their profile information")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Usernames to look up once, in order, before exiting
    pub usernames: Vec<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "LOOKUP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Serve the lookup over HTTP instead of reading usernames from stdin
    #[arg(long)]
    pub serve: bool,

    /// Port for the HTTP surface
    #[arg(long, env = "LOOKUP_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl Cli {
    pub fn client_config(&self) -> GitHubClientConfig {
        GitHubClientConfig {
            api_url: self.api_url.clone(),
            timeout: std::time::Duration::from_secs(self.timeout),
            ..Default::default()
        }
    }
}
