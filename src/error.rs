//! Client Error Types
//!
//! Errors surfaced by the auth and card clients. The taxonomy is deliberately
//! small: a backend rejection carries the backend's own detail message
//! verbatim, while transport failures collapse into a generic connection
//! error (the raw cause is logged, never shown to the user).

use thiserror::Error;

/// Errors from register/login flows
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Backend rejected the request (bad credentials, duplicate email).
    /// The message is the backend-provided detail, surfaced verbatim.
    #[error("{message}")]
    Rejected { message: String },

    /// Timeout or unreachable host
    #[error("unable to reach the CardMate backend; check your connection")]
    Network,
}

impl AuthError {
    /// Create a rejection carrying the backend detail message
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Errors from account management (delete account, settings)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Backend rejected the request
    #[error("{message}")]
    Rejected { message: String },

    /// Timeout or unreachable host
    #[error("unable to reach the CardMate backend; check your connection")]
    Network,
}

impl AccountError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Errors from card write operations (scan, create, update, set-owner)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    /// Backend reported a failure; message is the backend's error string
    #[error("{message}")]
    Backend { message: String },

    /// Timeout or unreachable host
    #[error("unable to reach the CardMate backend; check your connection")]
    Network,
}

impl CardError {
    /// Create a backend error carrying the server's message
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
