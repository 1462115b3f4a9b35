//! Command implementations.
//!
//! Every command digests locally; file content never leaves the process.

use crate::report;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use notary_certify::{Certifier, VerificationRecord, export, import, verify, verify_certificate};
use notary_core::{DigestAlgorithm, compute_named_digests};
use std::fs;
use std::path::Path;

/// Where the digest to verify against comes from.
pub enum VerifyTarget<'a> {
    /// A SHA-256 hex digest typed by the user
    Digest(&'a str),
    /// An exported certificate file
    Certificate(&'a Path),
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).wrap_err_with(|| format!("Failed to read {}", path.display()))
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| eyre!("{} has no file name", path.display()))
}

/// Certifies a file, optionally writing the exported certificate.
pub fn certify(
    certifier: &Certifier,
    file: &Path,
    owner: Option<&str>,
    output: Option<&Path>,
    json: bool,
) -> Result<String> {
    let data = read_file(file)?;
    let record = certifier.certify(&data, &file_name(file)?, owner);

    if let Some(output) = output {
        let bytes = export(&record)?;
        fs::write(output, bytes)
            .wrap_err_with(|| format!("Failed to write certificate to {}", output.display()))?;
        tracing::info!(path = %output.display(), "wrote certificate");
    }

    if json {
        Ok(serde_json::to_string_pretty(&record)?)
    } else {
        Ok(report::certification(&record))
    }
}

/// Verifies a file. Returns the rendered output and whether the file is intact.
pub fn verify_file(file: &Path, target: VerifyTarget<'_>, json: bool) -> Result<(String, bool)> {
    let data = read_file(file)?;

    let record: VerificationRecord = match target {
        VerifyTarget::Digest(digest) => verify(&data, digest.trim())?,
        VerifyTarget::Certificate(path) => {
            let certificate = import(&read_file(path)?)
                .wrap_err_with(|| format!("Failed to load certificate {}", path.display()))?;
            verify_certificate(&data, &certificate)?
        }
    };

    let intact = record.is_intact();
    let output = if json {
        serde_json::to_string_pretty(&record)?
    } else {
        report::verification(&record)
    };
    Ok((output, intact))
}

/// Prints digests of a file for the requested algorithms (all by default).
pub fn digest(file: &Path, algorithms: &[String], json: bool) -> Result<String> {
    let data = read_file(file)?;
    let digests = if algorithms.is_empty() {
        let all: Vec<&str> = DigestAlgorithm::ALL.iter().map(|alg| alg.as_str()).collect();
        compute_named_digests(&data, &all)?
    } else {
        compute_named_digests(&data, algorithms)?
    };

    if json {
        Ok(serde_json::to_string_pretty(&digests)?)
    } else {
        Ok(report::digest_lines(&digests, "").trim_end().to_string())
    }
}

/// Renders an exported certificate.
pub fn inspect(certificate: &Path, json: bool) -> Result<String> {
    let record = import(&read_file(certificate)?)
        .wrap_err_with(|| format!("Failed to load certificate {}", certificate.display()))?;

    if json {
        Ok(serde_json::to_string_pretty(&record)?)
    } else {
        Ok(report::certification(&record))
    }
}
