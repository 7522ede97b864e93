use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Could not parse profile response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid profile response: {0}")]
    InvalidProfile(String),

    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),

    #[error("Lookup controller error: {0}")]
    ControllerError(String),
}

impl LookupError {
    /// True for errors caused by a response body that does not look like a profile.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, LookupError::ParseError(_) | LookupError::InvalidProfile(_))
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
