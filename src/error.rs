// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for RuleCraft
//!
//! This module defines all error types used throughout the application.

use thiserror::Error;

/// Main error type for RuleCraft operations
#[derive(Error, Debug)]
pub enum RuleCraftError {
    /// Chat endpoint errors
    #[error("Send error: {0}")]
    Send(#[from] SendError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Terminal errors
    #[error("Terminal error: {0}")]
    Tui(String),
}

/// Failure of a single send to the chat endpoint.
///
/// Every variant is a network or protocol failure: the controller renders the
/// same error bubble for all of them. A reply that is merely empty is not an
/// error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// Connection refused, DNS failure, reset, ...
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout waiting for response
    #[error("Request timed out")]
    Timeout,

    /// Server answered with a non-2xx status
    #[error("Server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Body was not the expected JSON object
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SendError::Timeout
        } else if err.is_decode() {
            SendError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            SendError::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            SendError::Network(err.to_string())
        }
    }
}

/// Result type alias for RuleCraft operations
pub type Result<T> = std::result::Result<T, RuleCraftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rulecraft_error_config() {
        let err = RuleCraftError::Config("bad config".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_rulecraft_error_invalid_input() {
        let err = RuleCraftError::InvalidInput("bad input".to_string());
        assert!(err.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_rulecraft_error_tui() {
        let err = RuleCraftError::Tui("raw mode".to_string());
        assert_eq!(err.to_string(), "Terminal error: raw mode");
    }

    #[test]
    fn test_rulecraft_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RuleCraftError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_rulecraft_error_from_send() {
        let err: RuleCraftError = SendError::Timeout.into();
        assert!(matches!(err, RuleCraftError::Send(SendError::Timeout)));
        assert_eq!(err.to_string(), "Send error: Request timed out");
    }

    #[test]
    fn test_send_error_status_display() {
        let err = SendError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (502): bad gateway");
    }

    #[test]
    fn test_send_error_network_display() {
        let err = SendError::Network("connection refused".to_string());
        assert!(err.to_string().contains("Network error"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_send_error_clone_eq() {
        let err = SendError::InvalidResponse("not json".to_string());
        assert_eq!(err.clone(), err);
    }
}
