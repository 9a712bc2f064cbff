//! Self-describing content identifiers
//!
//! A [`ContentId`] names a blob by the hash of its canonical bytes and carries
//! enough framing to be interpreted without outside context:
//!
//! ```text
//! binary: [version 0x01][codec 0x55 raw][hash code][digest len 0x20][digest]
//! text:   'f' + lowercase hex(binary)
//! ```
//!
//! The layout matches a version-1 CID in base16 multibase, so tools that speak
//! CIDs can read the identifiers directly.

use crate::error::StorageError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 32-byte digest
pub type Hash = [u8; 32];

/// Identifier format version
pub const CID_VERSION: u8 = 0x01;

/// Multicodec tag for raw bytes
pub const RAW_CODEC: u8 = 0x55;

/// Multibase prefix for lowercase base16
const MULTIBASE_BASE16: char = 'f';

const DIGEST_LEN: usize = 32;
const HEADER_LEN: usize = 4;

/// Hash function used to derive a digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashAlgorithm {
    Blake3,
}

impl HashAlgorithm {
    /// Multihash code for this function
    pub fn code(self) -> u8 {
        match self {
            HashAlgorithm::Blake3 => 0x1e,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x1e => Some(HashAlgorithm::Blake3),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// Digest arbitrary bytes
    pub fn digest(self, data: &[u8]) -> Hash {
        match self {
            HashAlgorithm::Blake3 => *blake3::hash(data).as_bytes(),
        }
    }
}

/// Content identifier: {format version, hash function, digest}
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId {
    version: u8,
    algorithm: HashAlgorithm,
    digest: Hash,
}

impl ContentId {
    /// Compute the identifier of `data`
    pub fn compute(algorithm: HashAlgorithm, data: &[u8]) -> Self {
        Self {
            version: CID_VERSION,
            algorithm,
            digest: algorithm.digest(data),
        }
    }

    pub fn from_digest(algorithm: HashAlgorithm, digest: Hash) -> Self {
        Self {
            version: CID_VERSION,
            algorithm,
            digest,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn digest(&self) -> &Hash {
        &self.digest
    }

    /// Recompute the identifier of `data` with this identifier's hash function
    /// and compare.
    pub fn matches(&self, data: &[u8]) -> bool {
        Self::compute(self.algorithm, data) == *self
    }

    /// Binary framing of the identifier
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + DIGEST_LEN);
        bytes.push(self.version);
        bytes.push(RAW_CODEC);
        bytes.push(self.algorithm.code());
        bytes.push(DIGEST_LEN as u8);
        bytes.extend_from_slice(&self.digest);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        if bytes.len() != HEADER_LEN + DIGEST_LEN {
            return Err(StorageError::InvalidContentId(format!(
                "expected {} bytes, got {}",
                HEADER_LEN + DIGEST_LEN,
                bytes.len()
            )));
        }
        if bytes[0] != CID_VERSION {
            return Err(StorageError::InvalidContentId(format!(
                "unsupported version {:#04x}",
                bytes[0]
            )));
        }
        if bytes[1] != RAW_CODEC {
            return Err(StorageError::InvalidContentId(format!(
                "unsupported codec {:#04x}",
                bytes[1]
            )));
        }
        let algorithm = HashAlgorithm::from_code(bytes[2]).ok_or_else(|| {
            StorageError::InvalidContentId(format!("unknown hash function {:#04x}", bytes[2]))
        })?;
        if bytes[3] as usize != DIGEST_LEN {
            return Err(StorageError::InvalidContentId(format!(
                "unexpected digest length {}",
                bytes[3]
            )));
        }
        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(&bytes[HEADER_LEN..]);
        Ok(Self {
            version: CID_VERSION,
            algorithm,
            digest,
        })
    }

    /// Short hex form of the digest, for logs
    pub fn short(&self) -> String {
        hex::encode(&self.digest[..6])
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", MULTIBASE_BASE16, hex::encode(self.to_bytes()))
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({}:{})", self.algorithm.name(), self.short())
    }
}

impl FromStr for ContentId {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix(MULTIBASE_BASE16).ok_or_else(|| {
            StorageError::InvalidContentId(format!("missing base16 multibase prefix: {}", s))
        })?;
        // Uppercase hex belongs to a different multibase ('F'); keep the text form unique.
        if body.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(StorageError::InvalidContentId(format!(
                "uppercase hex not allowed: {}",
                s
            )));
        }
        let bytes = hex::decode(body)
            .map_err(|e| StorageError::InvalidContentId(format!("{}: {}", s, e)))?;
        Self::from_bytes(&bytes)
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
