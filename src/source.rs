use futures::future::BoxFuture;

use crate::error::Result;
use crate::models::ProfileRecord;

/// Anything that can turn a search key into a profile.
///
/// The lookup controller only talks to the profile service through this
/// trait; `GitHubClient` is the production implementation.
pub trait ProfileSource: Send + Sync + 'static {
    fn fetch_profile<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<ProfileRecord>>;
}
