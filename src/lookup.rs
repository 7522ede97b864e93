use crate::error::Result;
use crate::models::{LookupState, ProfileRecord, SearchKey};
use tracing::debug;

/// Transition core of the lookup controller.
///
/// Holds the active key and the current state. It performs no I/O: `submit`
/// says which key to fetch, `complete` applies a finished fetch if the key is
/// still the active one.
#[derive(Debug, Default)]
pub struct LookupMachine {
    active: SearchKey,
    state: LookupState,
}

impl LookupMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn active_key(&self) -> Option<&str> {
        if self.active.is_empty() {
            None
        } else {
            Some(self.active.as_str())
        }
    }

    /// Replace the active key. Returns the key that must be fetched, or `None`
    /// when the submission cleared the search.
    pub fn submit(&mut self, raw: &str) -> Option<SearchKey> {
        let key = SearchKey::new(raw);
        if key.is_empty() {
            // Dropping the old state discards any record held for the prior key
            self.active = SearchKey::default();
            self.state = LookupState::Idle;
            return None;
        }

        self.active = key.clone();
        self.state = LookupState::Loading {
            key: key.to_string(),
        };
        Some(key)
    }

    /// Apply a finished fetch. Returns `false` if the response was stale and
    /// has been discarded.
    pub fn complete(&mut self, key: &SearchKey, result: Result<ProfileRecord>) -> bool {
        if self.active.is_empty() || &self.active != key {
            debug!(
                response_key = %key,
                active_key = %self.active,
                "Discarding stale profile response"
            );
            return false;
        }

        self.state = match result {
            Ok(profile) => LookupState::Success(profile),
            Err(e) => LookupState::Failure {
                message: e.to_string(),
            },
        };
        true
    }
}
