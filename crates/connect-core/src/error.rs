//! Error Types

use thiserror::Error;

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Message shown whenever an action is attempted without a bearer token
pub const MISSING_TOKEN_MESSAGE: &str =
    "JWT token is required. Please add your token in the form above.";

/// Console error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// No bearer token pasted yet; checked before any request
    #[error("JWT token is required")]
    MissingToken,

    /// Client-side guard rejected the input; no request was issued
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend answered with a non-success status
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no error message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// Request never completed
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ConsoleError {
    /// Server-provided message, if the backend sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ConsoleError::Api { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Convert to the text shown in the error banner.
    ///
    /// `fallback` is used when the backend gave no message of its own.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ConsoleError::MissingToken => MISSING_TOKEN_MESSAGE.into(),
            ConsoleError::Validation(msg) => msg.clone(),
            ConsoleError::Api { .. } => self
                .server_message()
                .map_or_else(|| fallback.to_string(), str::to_string),
            ConsoleError::Network(_) | ConsoleError::Decode(_) => fallback.into(),
        }
    }

    /// True when the error was raised locally, before any request
    pub fn is_local(&self) -> bool {
        matches!(self, ConsoleError::MissingToken | ConsoleError::Validation(_))
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins_over_fallback() {
        let err = ConsoleError::Api {
            status: 400,
            message: Some("insufficient balance".into()),
        };
        assert_eq!(err.user_message("Failed to process payment"), "insufficient balance");
    }

    #[test]
    fn test_fallback_when_server_is_silent() {
        let err = ConsoleError::Api { status: 500, message: None };
        assert_eq!(err.user_message("Failed to process payment"), "Failed to process payment");

        let err = ConsoleError::Api { status: 500, message: Some(String::new()) };
        assert_eq!(err.user_message("Failed"), "Failed");

        let err = ConsoleError::Network("connection refused".into());
        assert_eq!(err.user_message("Failed"), "Failed");
    }

    #[test]
    fn test_local_errors() {
        assert!(ConsoleError::MissingToken.is_local());
        assert!(ConsoleError::Validation("nope".into()).is_local());
        assert!(!ConsoleError::Network("down".into()).is_local());
        assert_eq!(ConsoleError::MissingToken.user_message("x"), MISSING_TOKEN_MESSAGE);
    }
}
