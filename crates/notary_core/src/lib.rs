//! NOTARY Core Types
//!
//! This crate contains pure types and logic with no I/O.
//! Digests are computed over in-memory byte buffers and rendered as
//! lowercase hexadecimal.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod hash;
pub mod time;

// Re-exports
pub use error::{CoreError, CoreResult};
pub use hash::{
    DigestAlgorithm, DigestSet, Sha256Hex, compute_digests, compute_named_digests,
};
pub use time::Timestamp;
