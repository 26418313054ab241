use reqwest::StatusCode;
use std::fmt;

/// Why a live fetch produced no usable payload. Every variant routes to the
/// same recovery (the mock fallback); the split exists for diagnostics.
#[derive(Debug, Clone)]
pub enum FetchError {
    Transport { detail: String },
    Http { status: StatusCode, body: String },
    Decode { detail: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport { detail } => write!(f, "transport failure: {detail}"),
            FetchError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            FetchError::Decode { detail } => write!(f, "response decode failure: {detail}"),
        }
    }
}

impl std::error::Error for FetchError {}
