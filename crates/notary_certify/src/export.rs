//! Certificate export and import.
//!
//! A certificate is the JSON rendering of a [`CertificationRecord`]. Writing
//! the bytes somewhere is left to the caller.

use crate::certificate::CertificationRecord;

/// Default file name for a downloaded certificate
pub const CERTIFICATE_FILE_NAME: &str = "certificate.json";

/// Certificate export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Record could not be rendered
    #[error("failed to serialize certificate: {0}")]
    Serialize(#[source] serde_json::Error),
    /// Bytes are not a valid certificate
    #[error("failed to parse certificate: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Serialize a record to pretty-printed JSON bytes
///
/// # Errors
///
/// Returns [`ExportError::Serialize`] if serialization fails
pub fn export(record: &CertificationRecord) -> Result<Vec<u8>, ExportError> {
    let bytes = serde_json::to_vec_pretty(record).map_err(ExportError::Serialize)?;
    tracing::debug!(
        file_name = record.file_name(),
        bytes = bytes.len(),
        "exported certificate"
    );
    Ok(bytes)
}

/// Load a record from certificate bytes
///
/// Digests are re-validated while parsing.
///
/// # Errors
///
/// Returns [`ExportError::Parse`] if the bytes are not a well-formed certificate
pub fn import(bytes: &[u8]) -> Result<CertificationRecord, ExportError> {
    serde_json::from_slice(bytes).map_err(ExportError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certifier::Certifier;
    use notary_core::DigestAlgorithm;

    #[test]
    fn test_export_import_roundtrip() {
        let record = Certifier::default().certify(b"payload", "f.txt", Some("Alice"));
        let bytes = export(&record).unwrap();
        let restored = import(&bytes).unwrap();

        assert_eq!(restored.file_name(), "f.txt");
        assert_eq!(restored.owner(), "Alice");
        assert_eq!(restored.size_bytes(), record.size_bytes());
        assert_eq!(restored.digests(), record.digests());
        assert_eq!(restored, record);
    }

    #[test]
    fn test_export_field_names() {
        let record = Certifier::default().certify(b"payload", "f.txt", None);
        let bytes = export(&record).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let object = value.as_object().unwrap();
        for key in ["fileName", "owner", "certifiedAt", "sizeBytes", "digests", "status"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        let digests = value["digests"].as_object().unwrap();
        for alg in DigestAlgorithm::ALL {
            assert!(digests.contains_key(alg.as_str()));
        }
        assert_eq!(value["status"], "CERTIFIED");
    }

    #[test]
    fn test_import_rejects_tampered_digest() {
        let record = Certifier::default().certify(b"payload", "f.txt", None);
        let mut value = serde_json::to_value(&record).unwrap();
        value["digests"]["sha256"] = serde_json::Value::from("not-a-digest");
        let bytes = serde_json::to_vec(&value).unwrap();

        assert!(matches!(import(&bytes), Err(ExportError::Parse(_))));
    }

    #[test]
    fn test_import_rejects_incomplete_digests() {
        let record = Certifier::default().certify(b"payload", "f.txt", Some("Alice"));
        let mut value = serde_json::to_value(&record).unwrap();
        value["digests"].as_object_mut().unwrap().remove("md5");
        let bytes = serde_json::to_vec(&value).unwrap();
        assert!(matches!(import(&bytes), Err(ExportError::Parse(_))));

        let empty = br#"{"fileName":"f.txt","owner":"","certifiedAt":"2024-01-01T00:00:00Z","sizeBytes":5,"digests":{},"status":"CERTIFIED"}"#;
        assert!(matches!(import(empty), Err(ExportError::Parse(_))));
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(import(b"{"), Err(ExportError::Parse(_))));
        assert!(matches!(import(b"{}"), Err(ExportError::Parse(_))));
        assert!(import(b"").is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_export_preserves_identity(
            data in proptest::prelude::any::<Vec<u8>>(),
            name in "[a-z]{1,8}\\.txt",
            owner in "[A-Za-z]{1,12}"
        ) {
            let record = Certifier::default().certify(&data, &name, Some(&owner));
            let restored = import(&export(&record).unwrap()).unwrap();
            proptest::prop_assert_eq!(restored.file_name(), name.as_str());
            proptest::prop_assert_eq!(restored.owner(), owner.as_str());
            proptest::prop_assert_eq!(restored.size_bytes(), data.len() as u64);
            proptest::prop_assert_eq!(restored.digests(), record.digests());
        }
    }
}
