//! Content digests for certification and integrity checks.
//!
//! Three algorithms are supported: SHA-256, SHA-1 and MD5. Every digest is
//! rendered as lowercase hexadecimal of a fixed length per algorithm.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use sha2::Digest as _;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Digest algorithm identifier
///
/// Variant order is the canonical order digests are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// SHA-256 (the algorithm integrity verification uses)
    Sha256,
    /// SHA-1
    Sha1,
    /// MD5
    Md5,
}

impl DigestAlgorithm {
    /// Every supported algorithm, in canonical order
    pub const ALL: [Self; 3] = [Self::Sha256, Self::Sha1, Self::Md5];

    /// Stable identifier used in records and requests
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
        }
    }

    /// Number of hex characters in a digest of this algorithm
    #[must_use]
    pub const fn hex_len(&self) -> usize {
        match self {
            Self::Sha256 => 64,
            Self::Sha1 => 40,
            Self::Md5 => 32,
        }
    }

    /// Compute the lowercase hex digest of `data`
    #[must_use]
    pub fn digest_hex(&self, data: &[u8]) -> String {
        match self {
            Self::Sha256 => hex::encode(sha2::Sha256::digest(data)),
            Self::Sha1 => hex::encode(sha1::Sha1::digest(data)),
            Self::Md5 => hex::encode(md5::Md5::digest(data)),
        }
    }

    /// Check a hex digest against this algorithm's format and normalize it
    /// to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDigestFormat`] if the length is wrong or a
    /// non-hex character is present.
    pub fn normalize_hex(&self, value: &str) -> CoreResult<String> {
        let expected = self.hex_len();
        if value.len() != expected {
            return Err(CoreError::InvalidDigestFormat {
                algorithm: *self,
                reason: format!("expected {} hex characters, got {}", expected, value.len()),
            });
        }
        if let Some(c) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidDigestFormat {
                algorithm: *self,
                reason: format!("non-hex character {:?}", c),
            });
        }
        Ok(value.to_ascii_lowercase())
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CoreError;

    /// Accepts `sha256`, `sha1`, `md5` in any case, plus the hyphenated
    /// spellings `sha-256` and `sha-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "md5" => Ok(Self::Md5),
            _ => Err(CoreError::UnsupportedAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// Mapping from algorithm to lowercase hex digest
///
/// Deserialization re-validates every entry, so a `DigestSet` only ever holds
/// well-formed digests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<DigestAlgorithm, String>",
    into = "BTreeMap<DigestAlgorithm, String>"
)]
pub struct DigestSet(BTreeMap<DigestAlgorithm, String>);

impl DigestSet {
    /// Digest for `algorithm`, if present
    #[must_use]
    pub fn get(&self, algorithm: DigestAlgorithm) -> Option<&str> {
        self.0.get(&algorithm).map(String::as_str)
    }

    /// Whether a digest for `algorithm` is present
    #[must_use]
    pub fn contains(&self, algorithm: DigestAlgorithm) -> bool {
        self.0.contains_key(&algorithm)
    }

    /// Number of digests
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no digest is held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate digests in canonical algorithm order
    pub fn iter(&self) -> impl Iterator<Item = (DigestAlgorithm, &str)> {
        self.0.iter().map(|(alg, hex)| (*alg, hex.as_str()))
    }
}

impl TryFrom<BTreeMap<DigestAlgorithm, String>> for DigestSet {
    type Error = CoreError;

    fn try_from(raw: BTreeMap<DigestAlgorithm, String>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(alg, hex)| alg.normalize_hex(&hex).map(|hex| (alg, hex)))
            .collect::<CoreResult<BTreeMap<_, _>>>()
            .map(Self)
    }
}

impl From<DigestSet> for BTreeMap<DigestAlgorithm, String> {
    fn from(set: DigestSet) -> Self {
        set.0
    }
}

/// Compute digests of `data` for each requested algorithm.
///
/// Repeated algorithms are computed once. An empty `data` slice is valid and
/// yields the canonical empty-input digest of each algorithm.
#[must_use]
pub fn compute_digests(data: &[u8], algorithms: &[DigestAlgorithm]) -> DigestSet {
    let mut digests = BTreeMap::new();
    for algorithm in algorithms {
        digests
            .entry(*algorithm)
            .or_insert_with(|| algorithm.digest_hex(data));
    }
    tracing::debug!(
        bytes = data.len(),
        algorithms = digests.len(),
        "computed content digests"
    );
    DigestSet(digests)
}

/// Compute digests for algorithms given by identifier.
///
/// Every name is parsed before any hashing happens.
///
/// # Errors
///
/// Returns [`CoreError::UnsupportedAlgorithm`] for the first unknown name.
pub fn compute_named_digests<S: AsRef<str>>(data: &[u8], names: &[S]) -> CoreResult<DigestSet> {
    let algorithms = names
        .iter()
        .map(|name| name.as_ref().parse())
        .collect::<CoreResult<Vec<DigestAlgorithm>>>()?;
    Ok(compute_digests(data, &algorithms))
}

/// A validated SHA-256 digest in lowercase hex
///
/// This is the typed form of a user-supplied "original digest": parsing
/// accepts exactly 64 hex characters in either case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sha256Hex(String);

impl Sha256Hex {
    /// Parse and normalize a SHA-256 hex digest
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDigestFormat`] if `value` is not exactly
    /// 64 hex characters.
    pub fn parse(value: &str) -> CoreResult<Self> {
        DigestAlgorithm::Sha256.normalize_hex(value).map(Self)
    }

    /// Compute the SHA-256 digest of `data`
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(DigestAlgorithm::Sha256.digest_hex(data))
    }

    /// Get as lowercase hex
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this digest matches `data`
    #[must_use]
    pub fn matches(&self, data: &[u8]) -> bool {
        Self::compute(data) == *self
    }
}

impl fmt::Display for Sha256Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Sha256Hex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Sha256Hex {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Sha256Hex> for String {
    fn from(hex: Sha256Hex) -> Self {
        hex.0
    }
}

impl AsRef<str> for Sha256Hex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
