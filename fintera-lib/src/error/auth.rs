//! Authentication error types

/// Errors raised by a [`TokenProvider`](crate::auth::TokenProvider).
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// No session credential is available.
    #[error("No access token available: {0}")]
    TokenUnavailable(String),

    /// The stored access token has expired.
    #[error("Access token expired")]
    TokenExpired,
}
