//! Fetch error types

use std::time::Duration;

use super::AuthError;

/// Errors that can occur while fetching a page of a collection.
///
/// Every failure mode of a list fetch collapses into this one type so the
/// owning container only has to decide between rendering a page and rendering
/// an error panel. Use [`FetchError::message`] for the text shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Non-2xx response from the backend.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, or the canonical reason when the body was empty.
        message: String,
    },

    /// Network error while sending the request or reading the body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid base URL or endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body was not valid JSON, or an item did not match the
    /// requested item type.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// The token provider could not supply a credential.
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The request was superseded or its owner went away.
    #[error("Request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Human-readable message for the error panel.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the request was cancelled rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
