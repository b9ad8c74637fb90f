//! Error types for keyfinder
//!
//! A plain `search` never fails; these cover the hardened search, key
//! patterns, configuration and document loading.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for keyfinder operations
#[derive(Error, Debug)]
pub enum Error {
    /// A container was nested deeper than the configured limit
    #[error("Structure exceeds maximum nesting depth of {limit}")]
    DepthExceeded { limit: usize },

    /// The key pattern is not a valid regular expression
    #[error("Invalid key pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// I/O errors (reading documents)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Loading a specific file failed
    #[error("Failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for keyfinder operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Attach the file a loading error came from.
    pub fn at_path(self, path: impl Into<PathBuf>) -> Self {
        Error::Load {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_exceeded_display() {
        let err = Error::DepthExceeded { limit: 8 };
        assert_eq!(
            err.to_string(),
            "Structure exceeds maximum nesting depth of 8"
        );
    }

    #[test]
    fn test_load_error_names_path() {
        let err = Error::Config("bad".to_string()).at_path("data/issues.json");
        let display = format!("{}", err);
        assert!(display.contains("data/issues.json"));
        assert!(display.contains("Configuration error: bad"));
    }

    #[test]
    fn test_invalid_pattern_from_regex() {
        let err: Error = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
