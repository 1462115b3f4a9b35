//! Server configuration.

use crate::error::ServerError;
use axum::http::HeaderValue;
use notary_certify::CertifierConfig;
use serde::{Deserialize, Serialize};

/// Default bind address
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default upload limit (64 MiB); files are digested in memory
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Configuration for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
    /// Single front-end origin allowed for cross-origin requests; `None`
    /// disables CORS headers entirely
    pub allowed_origin: Option<String>,
    /// Largest accepted request body
    pub max_upload_bytes: usize,
    /// Certification settings
    pub certifier: CertifierConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            allowed_origin: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            certifier: CertifierConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Allowed origin as a header value
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidOrigin`] if the origin is not a valid
    /// header value
    pub fn cors_origin(&self) -> Result<Option<HeaderValue>, ServerError> {
        self.allowed_origin
            .as_deref()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ServerError::InvalidOrigin {
                    origin: origin.to_string(),
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1:8080");
        assert_eq!(config.allowed_origin, None);
        assert_eq!(config.certifier.default_owner, "Usuario");
        assert!(config.cors_origin().unwrap().is_none());
    }

    #[test]
    fn test_server_config_partial_json() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"allowed_origin": "https://example.org"}"#).unwrap();
        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(
            config.cors_origin().unwrap(),
            Some(HeaderValue::from_static("https://example.org"))
        );
    }

    #[test]
    fn test_invalid_origin() {
        let config = ServerConfig {
            allowed_origin: Some("bad\norigin".to_string()),
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.cors_origin(),
            Err(ServerError::InvalidOrigin { .. })
        ));
    }
}
