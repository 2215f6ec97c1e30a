//! Error types for GitHub API operations.

use thiserror::Error;

/// Errors that can occur during GitHub API operations.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Configuration is missing or incomplete.
    #[error("GitHub configuration required: {0}")]
    ConfigMissing(String),

    /// A required input was blank or out of range. No request was sent.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The server answered with a status the operation does not accept.
    #[error("Didn't receive {expected} status from GitHub: {status_line}{}", message_suffix(.message))]
    UnexpectedStatus {
        /// Accepted status codes, e.g. `"204 or 404"`.
        expected: String,
        status: u16,
        /// Literal status line, e.g. `"404 Not Found"`.
        status_line: String,
        /// The `message` field of the error body, when present.
        message: Option<String>,
    },

    /// A branch merge was refused (conflict or missing ref).
    #[error("{message}")]
    MergeFailed { status: u16, message: String },

    /// A documented failure status with a fixed meaning.
    #[error("GitHub API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON encoding or decoding error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Local file error while saving an archive.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(" ({message})"),
        None => String::new(),
    }
}

/// Result type alias for GitHub operations.
pub type Result<T> = core::result::Result<T, GitHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_mentions_status_line() {
        let err = GitHubError::UnexpectedStatus {
            expected: "204 or 404".to_string(),
            status: 500,
            status_line: "500 Internal Server Error".to_string(),
            message: None,
        };
        let text = err.to_string();
        assert!(text.contains("500 Internal Server Error"));
        assert!(text.contains("204 or 404"));
    }

    #[test]
    fn test_merge_failed_displays_message_verbatim() {
        let err = GitHubError::MergeFailed {
            status: 409,
            message: "Merge conflict".to_string(),
        };
        assert_eq!(err.to_string(), "Merge conflict");
    }
}
