//! Error types for the timeline crate.

use chronicle_config::ConfigError;
use chronicle_llm::LlmError;
use thiserror::Error;

/// Result type alias using the timeline error type.
pub type Result<T> = std::result::Result<T, TimelineError>;

/// Errors raised while grouping, summarizing or assembling a timeline.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// A content row is missing a required field.
    #[error("malformed input: row {row} has no {field}")]
    MalformedInput {
        /// Zero-based row index.
        row: usize,
        /// The missing field.
        field: &'static str,
    },

    /// The row collection itself could not be read.
    #[error("malformed input: {0}")]
    InvalidRows(String),

    /// A date token is not `YYYYMMDD` or `YYYY-MM-DD`.
    #[error("malformed date token '{token}': expected YYYYMMDD or YYYY-MM-DD")]
    MalformedDate {
        /// The offending token.
        token: String,
    },

    /// The timeline template does not have the expected shape.
    #[error("invalid timeline template: {0}")]
    Template(String),

    /// Failed to read the timeline template file.
    #[error("failed to read timeline template '{path}': {source}")]
    TemplateRead {
        path: String,
        source: std::io::Error,
    },

    /// The summarization backend failed.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The generator could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TimelineError {
    /// Create a malformed date error.
    pub fn malformed_date(token: impl Into<String>) -> Self {
        Self::MalformedDate {
            token: token.into(),
        }
    }

    /// Create a template shape error.
    pub fn template(reason: impl Into<String>) -> Self {
        Self::Template(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TimelineError::MalformedInput {
            row: 3,
            field: "date",
        };
        assert_eq!(err.to_string(), "malformed input: row 3 has no date");

        let err = TimelineError::malformed_date("2024-5-1");
        assert!(err.to_string().contains("'2024-5-1'"));

        let err = TimelineError::template("events must be an array");
        assert!(err.to_string().contains("events must be an array"));
    }

    #[test]
    fn test_llm_error_is_transparent() {
        let err: TimelineError = LlmError::Backend("HTTP 500: boom".to_string()).into();
        assert_eq!(err.to_string(), "Backend error: HTTP 500: boom");
    }
}
