//! Certification record.

use notary_core::{CoreError, CoreResult, DigestAlgorithm, DigestSet, Sha256Hex, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Reasons a deserialized record is not a complete certification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Digest set lacks one of the supported algorithms
    #[error(transparent)]
    Digest(#[from] CoreError),
    /// Owner is empty or whitespace
    #[error("owner must not be blank")]
    BlankOwner,
}

/// Immutable snapshot of a file's identity at certification time
///
/// Fields are private and there are no setters: re-certifying a file
/// produces a new record. Deserialization only yields fully populated
/// records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationRecord {
    file_name: String,
    owner: String,
    certified_at: Timestamp,
    size_bytes: u64,
    digests: DigestSet,
    status: CertificationStatus,
}

impl CertificationRecord {
    pub(crate) fn new(
        file_name: String,
        owner: String,
        certified_at: Timestamp,
        size_bytes: u64,
        digests: DigestSet,
    ) -> Self {
        Self {
            file_name,
            owner,
            certified_at,
            size_bytes,
            digests,
            status: CertificationStatus::Certified,
        }
    }

    /// Original file name
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Owner label
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// When the record was built
    #[must_use]
    pub const fn certified_at(&self) -> Timestamp {
        self.certified_at
    }

    /// Byte length of the certified content
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// All recorded digests
    #[must_use]
    pub const fn digests(&self) -> &DigestSet {
        &self.digests
    }

    /// Digest for a single algorithm
    #[must_use]
    pub fn digest(&self, algorithm: DigestAlgorithm) -> Option<&str> {
        self.digests.get(algorithm)
    }

    /// Record status
    #[must_use]
    pub const fn status(&self) -> CertificationStatus {
        self.status
    }

    /// SHA-256 digest used for integrity verification
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingDigest`] if the record has no SHA-256 entry.
    pub fn sha256(&self) -> CoreResult<Sha256Hex> {
        let hex = self
            .digests
            .get(DigestAlgorithm::Sha256)
            .ok_or(CoreError::MissingDigest {
                algorithm: DigestAlgorithm::Sha256,
            })?;
        Sha256Hex::parse(hex)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    file_name: String,
    owner: String,
    certified_at: Timestamp,
    size_bytes: u64,
    digests: DigestSet,
    status: CertificationStatus,
}

impl RawRecord {
    fn validate(self) -> Result<CertificationRecord, RecordError> {
        if self.owner.trim().is_empty() {
            return Err(RecordError::BlankOwner);
        }
        for algorithm in DigestAlgorithm::ALL {
            if !self.digests.contains(algorithm) {
                return Err(CoreError::MissingDigest { algorithm }.into());
            }
        }

        Ok(CertificationRecord {
            file_name: self.file_name,
            owner: self.owner,
            certified_at: self.certified_at,
            size_bytes: self.size_bytes,
            digests: self.digests,
            status: self.status,
        })
    }
}

impl<'de> Deserialize<'de> for CertificationRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawRecord::deserialize(deserializer)?
            .validate()
            .map_err(serde::de::Error::custom)
    }
}

/// Status of a certification record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificationStatus {
    /// Record has been built; this is the only state
    Certified,
}

impl fmt::Display for CertificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Certified => f.write_str("CERTIFIED"),
        }
    }
}
