pub mod actors;
pub mod cli;
pub mod error;
pub mod github;
pub mod lookup;
pub mod models;
pub mod render;
pub mod server;
pub mod source;
pub mod types;

pub use actors::{LookupController, LookupHandle};
pub use error::{LookupError, Result};
pub use github::{GitHubClient, GitHubClientConfig};
pub use models::{LookupState, LookupStats, ProfileRecord, SearchKey};
pub use source::ProfileSource;
