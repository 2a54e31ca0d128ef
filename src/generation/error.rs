//! Generation error types
//!
//! These stay inside the provider; callers only ever see a
//! [`GenerationResult`](super::GenerationResult).

use reqwest::StatusCode;
use thiserror::Error;

/// Why a generation call fell back
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Connection refused, DNS failure, timeout, unreadable body
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Body was not JSON at all
    #[error("failed to parse response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Body was JSON but carried no candidate text
    #[error("response contained no candidate text")]
    MissingText,
}

impl GenerationError {
    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(e) if e.is_timeout() => "timeout",
            Self::Transport(e) if e.is_connect() => "connect",
            Self::Transport(_) => "transport",
            Self::Status { status, .. } if status.is_server_error() => "server_error",
            Self::Status { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS => {
                "rate_limit"
            }
            Self::Status { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN =>
            {
                "auth"
            }
            Self::Status { .. } => "http_status",
            Self::Malformed(_) => "malformed",
            Self::MissingText => "missing_text",
        }
    }
}
