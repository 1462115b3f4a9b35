//! Certification builder.

use crate::certificate::CertificationRecord;
use notary_core::{DigestAlgorithm, Timestamp, compute_digests};
use serde::{Deserialize, Serialize};

/// Owner label used when none is supplied
pub const DEFAULT_OWNER: &str = "Usuario";

/// Configuration for the certifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertifierConfig {
    /// Owner recorded when the caller supplies none (or only whitespace)
    pub default_owner: String,
}

impl Default for CertifierConfig {
    fn default() -> Self {
        Self {
            default_owner: DEFAULT_OWNER.to_string(),
        }
    }
}

/// Builds certification records from file bytes
///
/// Holds no state beyond its configuration, so one instance can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct Certifier {
    config: CertifierConfig,
}

impl Certifier {
    /// Create a new certifier
    #[must_use]
    pub fn new(config: CertifierConfig) -> Self {
        Self { config }
    }

    /// Certify `data` as of now.
    ///
    /// Digests are computed for every supported algorithm. Digesting cannot
    /// fail on in-memory bytes, so neither can certification.
    #[must_use]
    pub fn certify(&self, data: &[u8], file_name: &str, owner: Option<&str>) -> CertificationRecord {
        self.certify_at(data, file_name, owner, Timestamp::now())
    }

    /// Certify `data` with an explicit certification time
    #[must_use]
    pub fn certify_at(
        &self,
        data: &[u8],
        file_name: &str,
        owner: Option<&str>,
        certified_at: Timestamp,
    ) -> CertificationRecord {
        let owner = self.resolve_owner(owner);
        let digests = compute_digests(data, &DigestAlgorithm::ALL);
        let size_bytes = data.len() as u64;

        tracing::info!(
            file_name,
            owner = %owner,
            size_bytes,
            "certified file"
        );

        CertificationRecord::new(
            file_name.to_string(),
            owner,
            certified_at,
            size_bytes,
            digests,
        )
    }

    fn resolve_owner(&self, owner: Option<&str>) -> String {
        match owner.map(str::trim) {
            Some(owner) if !owner.is_empty() => owner.to_string(),
            _ => self.config.default_owner.clone(),
        }
    }
}
