//! NOTARY Server
//!
//! HTTP API for certifying uploaded files, verifying them against a recorded
//! digest, and downloading certificates. Digests are computed in-process.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod error;

pub use api::{AppState, router, serve};
pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
