use std::fmt;
use std::str::FromStr;

use digest::Digest;

use crate::errors::*;

/// Digest algorithms which can appear in repository metadata.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ChecksumKind {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl ChecksumKind {
    /// The canonical lowercase name of the algorithm
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumKind::Md5 => "md5",
            ChecksumKind::Sha1 => "sha1",
            ChecksumKind::Sha256 => "sha256",
            ChecksumKind::Sha512 => "sha512",
        }
    }

    /// Digest `data` and return the result as lowercase hex
    pub fn hex_digest(&self, data: &[u8]) -> String {
        match self {
            ChecksumKind::Md5 => hex::encode(md5::Md5::digest(data)),
            ChecksumKind::Sha1 => hex::encode(sha1::Sha1::digest(data)),
            ChecksumKind::Sha256 => hex::encode(sha2::Sha256::digest(data)),
            ChecksumKind::Sha512 => hex::encode(sha2::Sha512::digest(data)),
        }
    }
}

impl FromStr for ChecksumKind {
    type Err = Error;

    /// Older repositories spell sha1 as "sha" and sha256 as "sha2", both are accepted.
    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "md5" => Ok(ChecksumKind::Md5),
            "sha" | "sha1" => Ok(ChecksumKind::Sha1),
            "sha2" | "sha256" => Ok(ChecksumKind::Sha256),
            "sha512" => Ok(ChecksumKind::Sha512),
            "" => Err(Error::MissingChecksumKind),
            _ => Err(Error::UnsupportedChecksumKind(raw.to_string())),
        }
    }
}

impl fmt::Display for ChecksumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hex encoded digest together with the algorithm that produced it.
///
/// The kind is validated when the checksum is created, so holding a `Checksum` guarantees that
/// it can actually be verified. The kind is also kept as spelled in the metadata (`sha`, `sha2`,
/// ...) since fingerprints hash that text.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Checksum {
    kind: ChecksumKind,
    kind_name: String,
    digest: String,
}

impl Checksum {
    /// Create a checksum from the textual kind found in metadata.
    ///
    /// An empty or unknown kind is a configuration error rather than a mismatch.
    pub fn new(kind: &str, digest: impl Into<String>) -> Result<Self> {
        Ok(Checksum {
            kind: kind.parse()?,
            kind_name: kind.to_string(),
            digest: digest.into(),
        })
    }

    pub fn with_kind(kind: ChecksumKind, digest: impl Into<String>) -> Self {
        Checksum {
            kind,
            kind_name: kind.as_str().to_string(),
            digest: digest.into(),
        }
    }

    /// Compute the checksum of `data`
    pub fn compute(kind: ChecksumKind, data: &[u8]) -> Self {
        Self::with_kind(kind, kind.hex_digest(data))
    }

    pub fn kind(&self) -> ChecksumKind {
        self.kind
    }

    /// The kind exactly as it was given to [`Checksum::new`]
    pub fn kind_name(&self) -> &str {
        &self.kind_name
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Check whether `data` hashes to this digest. The digest has to be lowercase hex.
    pub fn verify(&self, data: &[u8]) -> bool {
        let actual = self.kind.hex_digest(data);
        let matched = actual == self.digest;
        if !matched {
            log::trace!(
                "{} mismatch: expected {}, got {}",
                self.kind,
                self.digest,
                actual
            );
        }
        matched
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind_name, self.digest)
    }
}

/// Check `data` against every checksum in the list. All of them have to match.
pub fn verify_all(data: &[u8], checksums: &[Checksum]) -> bool {
    checksums.iter().all(|checksum| checksum.verify(data))
}
