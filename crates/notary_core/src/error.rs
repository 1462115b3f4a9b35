//! Core error types for NOTARY.

use crate::hash::DigestAlgorithm;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
///
/// Empty input is never an error: every algorithm has a well-defined digest
/// of the empty byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Requested digest algorithm is not one of `sha256`, `sha1`, `md5`
    #[error("Unsupported digest algorithm: {name}")]
    UnsupportedAlgorithm {
        /// Identifier as supplied by the caller
        name: String,
    },

    /// Supplied digest fails the length or charset check
    #[error("Invalid {algorithm} digest format: {reason}")]
    InvalidDigestFormat {
        /// Algorithm whose format was expected
        algorithm: DigestAlgorithm,
        /// What was wrong with the value
        reason: String,
    },

    /// A record carries no digest for the algorithm being checked
    #[error("Missing {algorithm} digest")]
    MissingDigest {
        /// Algorithm that was looked up
        algorithm: DigestAlgorithm,
    },
}

impl CoreError {
    /// Whether this error was caused by the caller's request rather than by
    /// the engine. Every current kind is a caller error and is never retried.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        match self {
            Self::UnsupportedAlgorithm { .. }
            | Self::InvalidDigestFormat { .. }
            | Self::MissingDigest { .. } => true,
        }
    }
}
