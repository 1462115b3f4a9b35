//! Server error types.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notary_certify::ExportError;
use notary_core::CoreError;
use serde_json::json;

/// Errors returned to API clients
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request carried no `file` part
    #[error("No file was sent")]
    MissingFile,
    /// The `file` part has no file name
    #[error("File has no name")]
    UnnamedFile,
    /// Verification request without an original digest
    #[error("Original digest not provided")]
    MissingDigest,
    /// Multipart body could not be read
    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),
    /// Certificate body is not a valid certification record
    #[error("Invalid certificate: {0}")]
    InvalidCertificate(#[source] serde_json::Error),
    /// Digest engine rejected the request
    #[error(transparent)]
    Core(#[from] CoreError),
    /// Certificate could not be exported
    #[error(transparent)]
    Export(#[from] ExportError),
    /// Digest task did not complete
    #[error("Processing failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile
            | Self::UnnamedFile
            | Self::MissingDigest
            | Self::InvalidCertificate(_) => StatusCode::BAD_REQUEST,
            Self::Core(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Multipart(err) => err.status(),
            Self::Export(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Errors starting the server
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Allowed origin is not a valid header value
    #[error("invalid allowed origin: {origin:?}")]
    InvalidOrigin {
        /// Configured origin
        origin: String,
    },
    /// Listener could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Configured address
        addr: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
