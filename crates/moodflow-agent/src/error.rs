//! Error types for the MoodFlow agent.
//!
//! Most collaborator failures never reach the caller: each adapter boundary
//! turns them into a fallback value and logs a warning. What remains here is
//! what a request can actually fail with.

use moodflow_core::CoreError;
use thiserror::Error;

/// Result type for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors that can occur in the MoodFlow agent.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The user text was empty or whitespace only.
    #[error("user text must not be empty")]
    EmptyInput,

    /// Transport failure or unexpected HTTP status.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// A response could not be decoded.
    #[error("Failed to parse response: {message}")]
    Parse { message: String },

    /// A request was rejected with 401 and may be retried with a new token.
    #[error("Unauthorized by {service}")]
    Unauthorized { service: String },

    /// The music catalog refused our credentials, even after a token refresh.
    #[error("Music catalog authorization failed: {message}")]
    MusicAuthorization { message: String },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Error from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AgentError {
    /// Create an HTTP error from any error type.
    pub fn http<E: std::fmt::Display>(e: E) -> Self {
        Self::Http {
            message: e.to_string(),
        }
    }

    /// Create a parse error from any error type.
    pub fn parse<E: std::fmt::Display>(e: E) -> Self {
        Self::Parse {
            message: e.to_string(),
        }
    }

    /// Create a configuration error from any error type.
    pub fn config<E: std::fmt::Display>(e: E) -> Self {
        Self::Config {
            message: e.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for AgentError {
    fn from(e: reqwest::Error) -> Self {
        if e.status() == Some(reqwest::StatusCode::UNAUTHORIZED) {
            return Self::Unauthorized {
                service: e
                    .url()
                    .and_then(|u| u.host_str().map(str::to_string))
                    .unwrap_or_else(|| "remote service".to_string()),
            };
        }
        Self::http(e)
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(e: serde_json::Error) -> Self {
        Self::parse(e)
    }
}
