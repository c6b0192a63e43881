use thiserror::Error;

/// Failure talking to the properties API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx answer. `message` is already human readable.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL {0}")]
    InvalidUrl(String),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::InvalidUrl(_) | ClientError::Decode(_) => None,
        }
    }
}

/// Client-side form check failure. Only the first failing rule is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Address and Description are required.")]
    MissingText,

    #[error("Price and Size must be numbers.")]
    NotNumeric,

    #[error("Price must be greater than 0.")]
    NonPositivePrice,

    #[error("Size must be greater than 0.")]
    NonPositiveSize,

    #[error("Description must be at most {max} characters.")]
    DescriptionTooLong { max: usize },
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
