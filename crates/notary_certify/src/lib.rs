//! File certification for NOTARY.
//!
//! This crate turns raw file bytes into immutable certification records,
//! compares files against previously recorded digests, and exports records
//! to a portable JSON certificate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod certificate;
pub mod certifier;
pub mod export;
pub mod verifier;

pub use certificate::{CertificationRecord, CertificationStatus, RecordError};
pub use certifier::{Certifier, CertifierConfig, DEFAULT_OWNER};
pub use export::{CERTIFICATE_FILE_NAME, ExportError, export, import};
pub use verifier::{VerificationRecord, verify, verify_at, verify_certificate, verify_certificate_at};
