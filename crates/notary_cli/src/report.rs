//! Human-readable reports.

use notary_certify::{CertificationRecord, VerificationRecord};
use notary_core::{DigestAlgorithm, DigestSet};
use std::fmt::Write as _;

fn label(algorithm: DigestAlgorithm) -> &'static str {
    match algorithm {
        DigestAlgorithm::Sha256 => "SHA-256",
        DigestAlgorithm::Sha1 => "SHA-1",
        DigestAlgorithm::Md5 => "MD5",
    }
}

/// Renders a certification record.
pub fn certification(record: &CertificationRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "FILE:    {}", record.file_name());
    let _ = writeln!(out, "OWNER:   {}", record.owner());
    let _ = writeln!(out, "DATE:    {}", record.certified_at());
    let _ = writeln!(out, "SIZE:    {} bytes", record.size_bytes());
    let _ = writeln!(out);
    let _ = writeln!(out, "DIGESTS:");
    out.push_str(&digest_lines(record.digests(), "   - "));
    let _ = writeln!(out);
    let _ = write!(out, "STATUS:  {}", record.status());
    out
}

/// Renders a verification record.
pub fn verification(record: &VerificationRecord) -> String {
    let status = if record.is_intact() {
        "INTEGRITY VERIFIED"
    } else {
        "INTEGRITY COMPROMISED"
    };

    let mut out = String::new();
    let _ = writeln!(out, "=== VERIFICATION RESULT ===");
    let _ = writeln!(out, "Status: {}", status);
    let _ = writeln!(out, "Date:   {}", record.verified_at());
    let _ = writeln!(out);
    let _ = writeln!(out, "Original digest: {}", record.original_digest());
    let _ = write!(out, "Current digest:  {}", record.current_digest());
    out
}

/// Renders one `ALGORITHM: hex` line per digest.
pub fn digest_lines(digests: &DigestSet, indent: &str) -> String {
    let mut out = String::new();
    for (algorithm, hex) in digests.iter() {
        let _ = writeln!(out, "{}{:<8} {}", indent, format!("{}:", label(algorithm)), hex);
    }
    out
}
