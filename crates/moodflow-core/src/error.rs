//! Error types for moodflow-core.
//!
//! The pipeline stages in this crate are total functions: unknown keys fall
//! back to neutral table rows and out-of-range inputs are clamped. Errors only
//! arise while building the static machinery (configuration, custom lexicons).
//!
//! # Examples
//!
//! ```rust
//! use moodflow_core::CoreError;
//!
//! let error = CoreError::ConfigError("llm.timeout_secs must be greater than 0".into());
//! assert!(error.to_string().contains("timeout_secs"));
//! ```

use thiserror::Error;

/// Top-level error type for moodflow-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A lexicon entry could not be compiled into a matcher.
    ///
    /// Entries are regex-escaped before compilation, so this only occurs
    /// when the resulting pattern exceeds the regex size limits.
    #[error("Invalid lexicon entry '{entry}': {message}")]
    InvalidLexiconEntry {
        /// The offending word or phrase
        entry: String,
        /// Compiler message
        message: String,
    },
}

/// Result type alias for moodflow-core operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<config::ConfigError> for CoreError {
    fn from(e: config::ConfigError) -> Self {
        CoreError::ConfigError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_error_display() {
        let err = CoreError::InvalidLexiconEntry {
            entry: "mutlu".to_string(),
            message: "too big".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("mutlu"));
        assert!(msg.contains("too big"));
    }
}
