//! Integrity verification against a previously recorded digest.

use crate::certificate::CertificationRecord;
use notary_core::{CoreResult, Sha256Hex, Timestamp};
use serde::{Deserialize, Serialize};

/// Outcome of comparing a file's current digest with a recorded one
///
/// A fresh record is produced by every verification and is never stored by
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    verified_at: Timestamp,
    original_digest: Sha256Hex,
    current_digest: Sha256Hex,
    is_intact: bool,
}

impl VerificationRecord {
    fn compare(original: Sha256Hex, current: Sha256Hex, verified_at: Timestamp) -> Self {
        let is_intact = original == current;
        Self {
            verified_at,
            original_digest: original,
            current_digest: current,
            is_intact,
        }
    }

    /// When the verification ran
    #[must_use]
    pub const fn verified_at(&self) -> Timestamp {
        self.verified_at
    }

    /// Digest checked against, normalized to lowercase
    #[must_use]
    pub fn original_digest(&self) -> &Sha256Hex {
        &self.original_digest
    }

    /// Digest of the candidate file
    #[must_use]
    pub fn current_digest(&self) -> &Sha256Hex {
        &self.current_digest
    }

    /// Whether both digests are equal
    #[must_use]
    pub const fn is_intact(&self) -> bool {
        self.is_intact
    }
}

/// Verify `data` against `original_digest` as of now.
///
/// The digest is validated before the file is hashed, so a malformed digest
/// costs nothing.
///
/// # Errors
///
/// Returns [`notary_core::CoreError::InvalidDigestFormat`] if
/// `original_digest` is not exactly 64 hex characters.
pub fn verify(data: &[u8], original_digest: &str) -> CoreResult<VerificationRecord> {
    verify_at(data, original_digest, Timestamp::now())
}

/// Verify `data` against `original_digest` with an explicit verification time
///
/// # Errors
///
/// Same as [`verify`].
pub fn verify_at(
    data: &[u8],
    original_digest: &str,
    verified_at: Timestamp,
) -> CoreResult<VerificationRecord> {
    let original = Sha256Hex::parse(original_digest)?;
    Ok(compare(data, original, verified_at))
}

/// Verify `data` against the SHA-256 digest of a caller-held certification
/// record. The record itself is left untouched.
///
/// # Errors
///
/// Returns [`notary_core::CoreError::MissingDigest`] if the record has no
/// SHA-256 entry.
pub fn verify_certificate(
    data: &[u8],
    record: &CertificationRecord,
) -> CoreResult<VerificationRecord> {
    verify_certificate_at(data, record, Timestamp::now())
}

/// Verify `data` against a certification record with an explicit
/// verification time
///
/// # Errors
///
/// Same as [`verify_certificate`].
pub fn verify_certificate_at(
    data: &[u8],
    record: &CertificationRecord,
    verified_at: Timestamp,
) -> CoreResult<VerificationRecord> {
    let original = record.sha256()?;
    Ok(compare(data, original, verified_at))
}

fn compare(data: &[u8], original: Sha256Hex, verified_at: Timestamp) -> VerificationRecord {
    let current = Sha256Hex::compute(data);
    let record = VerificationRecord::compare(original, current, verified_at);

    if record.is_intact() {
        tracing::info!(digest = %record.current_digest(), "integrity verified");
    } else {
        tracing::warn!(
            original = %record.original_digest(),
            current = %record.current_digest(),
            "integrity compromised"
        );
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certifier::Certifier;
    use notary_core::{CoreError, DigestAlgorithm, compute_digests};

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_verify_intact() {
        let digest = Sha256Hex::compute(b"contract v1");
        let record = verify(b"contract v1", digest.as_str()).unwrap();
        assert!(record.is_intact());
        assert_eq!(record.original_digest(), record.current_digest());
    }

    #[test]
    fn test_verify_compromised() {
        let digest = Sha256Hex::compute(b"contract v1");
        let record = verify(b"contract v2", digest.as_str()).unwrap();
        assert!(!record.is_intact());
        assert_eq!(record.original_digest(), &digest);
        assert_eq!(record.current_digest(), &Sha256Hex::compute(b"contract v2"));
    }

    #[test]
    fn test_verify_case_insensitive() {
        let record = verify(b"", &EMPTY_SHA256.to_uppercase()).unwrap();
        assert!(record.is_intact());
        assert_eq!(record.original_digest().as_str(), EMPTY_SHA256);
    }

    #[test]
    fn test_verify_empty_file() {
        let record = verify(b"", EMPTY_SHA256).unwrap();
        assert!(record.is_intact());
        assert_eq!(record.current_digest().as_str(), EMPTY_SHA256);
    }

    #[test]
    fn test_verify_rejects_malformed_digest() {
        let too_long = format!("{}00", EMPTY_SHA256);
        for bad in ["", "abc", &EMPTY_SHA256[..63], too_long.as_str()] {
            let result = verify(b"data", bad);
            assert!(matches!(result, Err(CoreError::InvalidDigestFormat { .. })));
        }

        let non_hex = format!("{}z", &EMPTY_SHA256[..63]);
        assert!(matches!(
            verify(b"data", &non_hex),
            Err(CoreError::InvalidDigestFormat { .. })
        ));
    }

    #[test]
    fn test_verify_at_timestamp() {
        let at = Timestamp::from_unix_seconds(1_704_067_200).unwrap();
        let record = verify_at(b"", EMPTY_SHA256, at).unwrap();
        assert_eq!(record.verified_at(), at);
    }

    #[test]
    fn test_verify_certificate_leaves_record_untouched() {
        let certification = Certifier::default().certify(b"original", "doc.txt", Some("Alice"));
        let snapshot = certification.clone();

        let intact = verify_certificate(b"original", &certification).unwrap();
        assert!(intact.is_intact());

        let tampered = verify_certificate(b"tampered", &certification).unwrap();
        assert!(!tampered.is_intact());

        assert_eq!(certification, snapshot);
    }

    #[test]
    fn test_verify_certificate_at_timestamp() {
        let certification = Certifier::default().certify(b"original", "doc.txt", None);
        let at = Timestamp::from_unix_seconds(1_704_067_200).unwrap();
        let record = verify_certificate_at(b"original", &certification, at).unwrap();
        assert_eq!(record.verified_at(), at);
        assert!(record.is_intact());
    }

    #[test]
    fn test_verify_certificate_missing_sha256() {
        let certification = CertificationRecord::new(
            "doc.txt".to_string(),
            "Alice".to_string(),
            Timestamp::from_unix_seconds(100).unwrap(),
            8,
            compute_digests(b"original", &[DigestAlgorithm::Sha1, DigestAlgorithm::Md5]),
        );
        assert_eq!(
            verify_certificate(b"original", &certification),
            Err(CoreError::MissingDigest {
                algorithm: DigestAlgorithm::Sha256
            })
        );
    }

    #[test]
    fn test_verification_record_json_fields() {
        let at = Timestamp::from_unix_seconds(1_704_067_200).unwrap();
        let record = verify_at(b"", EMPTY_SHA256, at).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["verifiedAt"], "2024-01-01T00:00:00Z");
        assert_eq!(value["originalDigest"], EMPTY_SHA256);
        assert_eq!(value["currentDigest"], EMPTY_SHA256);
        assert_eq!(value["isIntact"], true);
    }

    proptest::proptest! {
        #[test]
        fn prop_verify_own_digest_is_intact(data: Vec<u8>) {
            let digest = Sha256Hex::compute(&data);
            let record = verify(&data, digest.as_str()).unwrap();
            proptest::prop_assert!(record.is_intact());
        }

        #[test]
        fn prop_verify_other_content_is_not_intact(data: Vec<u8>, extra: u8) {
            let mut other = data.clone();
            other.push(extra);
            let digest = Sha256Hex::compute(&other);
            let record = verify(&data, digest.as_str()).unwrap();
            proptest::prop_assert!(!record.is_intact());
        }

        #[test]
        fn prop_verify_rejects_wrong_length(digest in "[0-9a-f]{0,63}|[0-9a-f]{65,80}") {
            let result = verify(b"data", &digest);
            let is_format_error = matches!(result, Err(CoreError::InvalidDigestFormat { .. }));
            proptest::prop_assert!(is_format_error);
        }
    }
}
