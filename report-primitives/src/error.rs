//! Shared error definitions for report primitives.

use thiserror::Error;

/// Result alias used throughout the extension.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating primitive report types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Token string failed validation.
    #[error("invalid token `{token}`: {reason}")]
    InvalidToken {
        /// The offending token string.
        token: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// The provided site identifier could not be used.
    #[error("invalid site id `{value}`: {reason}")]
    InvalidSiteId {
        /// Textual form of the rejected value.
        value: String,
        /// Human-readable reason for rejection.
        reason: &'static str,
    },
}
