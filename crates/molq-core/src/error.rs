//! Error taxonomy for query execution.
//!
//! Every failure is returned as a value and rendered by the UI layer; no
//! operation retries, and no failure aborts the session.

use thiserror::Error;

/// A failed search, record, or image action.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-200 status.
    #[error("Error {status}: {reason}")]
    Http { status: u16, reason: String },

    /// The request never completed (connection, TLS, timeout).
    #[error("Failed to fetch data: {0}")]
    Transport(String),

    /// The body could not be parsed as JSON.
    #[error("malformed JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body could not be decoded as an image.
    #[error("could not decode structure image: {0}")]
    ImageDecode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_carries_status_and_reason() {
        let err = ApiError::Http {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Error 404: Not Found");
    }

    #[test]
    fn transport_error_display() {
        let err = ApiError::Transport("connection failed: refused".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to fetch data: connection failed: refused"
        );
    }
}
