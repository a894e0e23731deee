//! Unified error types for Enfold.
//!
//! Every fallible surface in the workspace returns [`EnfoldError`] so that
//! failures compose through the ? operator without wrapping or translation.
//! Errors raised by user-supplied operation bodies use
//! [`ErrorKind::Operation`] and are propagated verbatim; the interception
//! machinery never catches, retries, or rewraps them.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A declaration was malformed (bad or missing options). Raised only at
    /// declaration time, never while dispatching a call.
    Configuration,
    /// A lookup named an operation, wrapper, or declarator that is not
    /// defined on the table.
    UnknownOperation,
    /// An alias name is already in use on the table.
    AliasCollision,
    /// An error raised by a user-supplied operation or wrapper body.
    Operation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::UnknownOperation => write!(f, "UNKNOWN_OPERATION"),
            Self::AliasCollision => write!(f, "ALIAS_COLLISION"),
            Self::Operation => write!(f, "OPERATION"),
        }
    }
}

/// The unified error used throughout Enfold.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct EnfoldError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl EnfoldError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an unknown-operation error.
    pub fn unknown_operation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownOperation, message)
    }

    /// Create an alias-collision error.
    pub fn alias_collision(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AliasCollision, message)
    }

    /// Create an operation error (for user-supplied bodies).
    pub fn operation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Operation, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_code_and_message() {
        let err = EnfoldError::configuration("`call` option with identifier argument required");
        assert_eq!(
            err.to_string(),
            "CONFIGURATION: `call` option with identifier argument required"
        );
    }

    #[test]
    fn source_is_preserved() {
        let io = std::io::Error::other("boom");
        let err = EnfoldError::with_source(ErrorKind::Operation, "save failed", io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
