//! Content identifiers
//!
//! Two wire formats exist and are not interchangeable:
//! - CIDv0: the 34-byte sha2-256 multihash on its own, always written as
//!   unprefixed base58btc (the familiar `Qm...` strings). The content type is
//!   implicitly dag-pb.
//! - CIDv1: `varint(1) ++ varint(content type) ++ multihash`, written as a
//!   multibase string (base32 by default).
//!
//! See: <https://github.com/multiformats/cid>

use std::fmt;
use std::str::FromStr;

use multiformat_encoding::multicodec::{self, CodecTable};
use multiformat_encoding::{Base, Case, RadixAlphabet, multibase};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use tracing::debug;

use crate::error::{CidError, Result};
use crate::multihash::{Multihash, read_varint, write_varint};

/// Length of a binary CIDv0 (sha2-256 multihash)
pub const CIDV0_LEN: usize = 34;

/// Length of a CIDv0 in text form
pub const CIDV0_TEXT_LEN: usize = 46;

/// Every CIDv0 string starts with this marker
pub const CIDV0_TEXT_PREFIX: &str = "Qm";

const SHA2_256_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    V0,
    V1,
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        match version {
            Version::V0 => 0,
            Version::V1 => 1,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", u64::from(*self))
    }
}

/// A content identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cid {
    /// dag-pb content addressed by a sha2-256 digest
    V0 { digest: [u8; SHA2_256_LEN] },
    V1 { codec: u64, hash: Multihash },
}

impl Cid {
    /// Builds a CIDv0, which only exists for 32-byte sha2-256 multihashes
    pub fn new_v0(hash: &Multihash) -> Result<Self> {
        if hash.code() != multicodec::SHA2_256 {
            return Err(CidError::InvalidFormat(format!(
                "CIDv0 requires a sha2-256 multihash, got code 0x{:x}",
                hash.code()
            )));
        }
        let digest = hash.digest().try_into().map_err(|_| {
            CidError::InvalidFormat(format!(
                "CIDv0 requires a {SHA2_256_LEN}-byte digest, got {}",
                hash.size()
            ))
        })?;
        Ok(Cid::V0 { digest })
    }

    pub fn new_v1(codec: u64, hash: Multihash) -> Self {
        Cid::V1 { codec, hash }
    }

    /// Hashes `data` with `hash_code` and wraps the result in a CIDv1
    pub fn from_data(codec: u64, hash_code: u64, data: &[u8]) -> Result<Self> {
        Ok(Cid::new_v1(codec, Multihash::compute(hash_code, data)?))
    }

    pub fn version(&self) -> Version {
        match self {
            Cid::V0 { .. } => Version::V0,
            Cid::V1 { .. } => Version::V1,
        }
    }

    /// Multicodec content type
    pub fn codec(&self) -> u64 {
        match self {
            Cid::V0 { .. } => multicodec::DAG_PB,
            Cid::V1 { codec, .. } => *codec,
        }
    }

    pub fn hash(&self) -> Multihash {
        match self {
            Cid::V0 { digest } => Multihash::wrap(multicodec::SHA2_256, digest.to_vec()),
            Cid::V1 { hash, .. } => hash.clone(),
        }
    }

    /// Parses a binary CID against the bundled multicodec table
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, multicodec::default_table())
    }

    pub fn from_bytes_with(bytes: &[u8], table: &dyn CodecTable) -> Result<Self> {
        if bytes.len() == CIDV0_LEN && bytes[..2] == [multicodec::SHA2_256 as u8, 0x20] {
            debug!("detected CIDv0");
            let mut digest = [0u8; SHA2_256_LEN];
            digest.copy_from_slice(&bytes[2..]);
            return Ok(Cid::V0 { digest });
        }

        let (version, rest) = read_varint(bytes)?;
        if version != u64::from(Version::V1) {
            return Err(CidError::InvalidFormat(format!(
                "unsupported CID version {version}"
            )));
        }

        let (codec, rest) = read_varint(rest)?;
        if table.by_code(codec).is_none() {
            return Err(CidError::UnknownMulticodec(codec));
        }
        debug!(codec = table.name(codec), "detected CIDv1");

        let hash = Multihash::from_bytes_with(rest, table)?;
        Ok(Cid::V1 { codec, hash })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Cid::V0 { digest } => {
                let mut bytes = Vec::with_capacity(CIDV0_LEN);
                bytes.extend_from_slice(&[multicodec::SHA2_256 as u8, SHA2_256_LEN as u8]);
                bytes.extend_from_slice(digest);
                bytes
            }
            Cid::V1 { codec, hash } => {
                let mut bytes = Vec::new();
                write_varint(Version::V1.into(), &mut bytes);
                write_varint(*codec, &mut bytes);
                bytes.extend(hash.to_bytes());
                bytes
            }
        }
    }

    /// Text form in the requested encoding
    ///
    /// CIDv0 accepts only base58btc and is written without a multibase prefix.
    /// CIDv1 is always written with its prefix.
    pub fn to_string_of_base(&self, base: Base) -> Result<String> {
        match self {
            Cid::V0 { .. } if base != Base::Base58Btc => {
                Err(CidError::InvalidEncodingForCidV0(base))
            }
            Cid::V0 { .. } => Ok(multibase::encode(base, &self.to_bytes(), false)?),
            Cid::V1 { .. } => Ok(multibase::encode(base, &self.to_bytes(), true)?),
        }
    }

    /// Parses the text form against the bundled multicodec table
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, multicodec::default_table())
    }

    pub fn parse_with(text: &str, table: &dyn CodecTable) -> Result<Self> {
        let bytes = if text.len() == CIDV0_TEXT_LEN && text.starts_with(CIDV0_TEXT_PREFIX) {
            Base::Base58Btc.decode(text)?
        } else {
            let (base, bytes) = multibase::decode(text)?;
            debug!(base = base.name(), "decoded CID text");
            bytes
        };
        Self::from_bytes_with(&bytes, table)
    }

    /// Converts to CIDv1, keeping the content type and hash
    pub fn into_v1(self) -> Self {
        match self {
            Cid::V0 { digest } => Cid::V1 {
                codec: multicodec::DAG_PB,
                hash: Multihash::wrap(multicodec::SHA2_256, digest.to_vec()),
            },
            v1 => v1,
        }
    }

    pub fn to_v1(&self) -> Self {
        self.clone().into_v1()
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cid::V0 { .. } => {
                f.write_str(&RadixAlphabet::Base58Btc.encode(&self.to_bytes(), Case::Lower))
            }
            Cid::V1 { .. } => {
                let text = multibase::encode(Base::Base32, &self.to_bytes(), true)
                    .map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

impl FromStr for Cid {
    type Err = CidError;

    fn from_str(s: &str) -> Result<Self> {
        Cid::parse(s)
    }
}

impl TryFrom<&[u8]> for Cid {
    type Error = CidError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Cid::from_bytes(bytes)
    }
}

impl Serialize for Cid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
