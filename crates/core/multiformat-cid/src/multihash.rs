//! Multihash digest container
//!
//! A multihash is `varint(code) ++ varint(length) ++ digest`, where `code`
//! names the hash function in the multicodec table.
//!
//! See: <https://github.com/multiformats/multihash>

use multiformat_encoding::multicodec::{self, CodecTable};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::error::{CidError, Result};

/// Decodes one unsigned varint from the front of `bytes`
pub(crate) fn read_varint(bytes: &[u8]) -> Result<(u64, &[u8])> {
    unsigned_varint::decode::u64(bytes)
        .map_err(|e| CidError::InvalidFormat(format!("varint decode: {e}")))
}

pub(crate) fn write_varint(value: u64, out: &mut Vec<u8>) {
    let mut buffer = unsigned_varint::encode::u64_buffer();
    out.extend_from_slice(unsigned_varint::encode::u64(value, &mut buffer));
}

/// A hash function code paired with the digest it produced
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Multihash {
    code: u64,
    digest: Vec<u8>,
}

impl Multihash {
    /// Wraps an existing digest. The code is not checked against any table.
    pub fn wrap(code: u64, digest: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            digest: digest.into(),
        }
    }

    /// Hashes `data` with the hash function named by `code`
    ///
    /// Only sha2-256 and sha2-512 are wired to an implementation.
    pub fn compute(code: u64, data: &[u8]) -> Result<Self> {
        match code {
            multicodec::SHA2_256 => Ok(Self::sha2_256(data)),
            multicodec::SHA2_512 => Ok(Self::wrap(code, Sha512::digest(data).to_vec())),
            _ => Err(CidError::NotImplemented(format!(
                "hashing with multihash code 0x{code:x}"
            ))),
        }
    }

    pub fn sha2_256(data: &[u8]) -> Self {
        Self::wrap(multicodec::SHA2_256, Sha256::digest(data).to_vec())
    }

    pub fn code(&self) -> u64 {
        self.code
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Digest length in bytes
    pub fn size(&self) -> usize {
        self.digest.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.digest.len() + 4);
        write_varint(self.code, &mut bytes);
        write_varint(self.digest.len() as u64, &mut bytes);
        bytes.extend_from_slice(&self.digest);
        bytes
    }

    /// Parses a multihash against the bundled multicodec table
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, multicodec::default_table())
    }

    /// Parses a multihash, resolving the hash function code with `table`
    ///
    /// The declared length must match the remaining bytes exactly.
    pub fn from_bytes_with(bytes: &[u8], table: &dyn CodecTable) -> Result<Self> {
        if bytes.len() < 2 {
            return Err(CidError::InvalidFormat(format!(
                "multihash needs at least 2 bytes, got {}",
                bytes.len()
            )));
        }

        let (code, rest) = read_varint(bytes)?;
        if !table.is_multihash(code) {
            return Err(CidError::UnknownMultihash(code));
        }

        let (declared, digest) = read_varint(rest)?;
        if declared != digest.len() as u64 {
            return Err(CidError::InvalidDigestLength {
                declared,
                actual: digest.len(),
            });
        }

        Ok(Self::wrap(code, digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiformat_encoding::{CodecEntry, StaticCodecTable, Tag};

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn test_to_bytes() {
        let hash = Multihash::wrap(0x12, hex::decode(HELLO_SHA256).unwrap());
        let bytes = hash.to_bytes();
        assert_eq!(&bytes[..2], &[0x12, 0x20]);
        assert_eq!(&bytes[2..], hash.digest());
        assert_eq!(hash.size(), 32);
    }

    #[test]
    fn test_multi_byte_varints() {
        // blake2b-256 code 0xb220 takes three varint bytes
        let hash = Multihash::wrap(multicodec::BLAKE2B_256, vec![7u8; 200]);
        let bytes = hash.to_bytes();
        assert_eq!(&bytes[..5], &[0xa0, 0xe4, 0x02, 0xc8, 0x01]);
        assert_eq!(Multihash::from_bytes(&bytes).unwrap(), hash);
    }

    #[test]
    fn test_from_bytes() {
        let mut bytes = vec![0x12, 0x20];
        bytes.extend(hex::decode(HELLO_SHA256).unwrap());
        let hash = Multihash::from_bytes(&bytes).unwrap();
        assert_eq!(hash.code(), multicodec::SHA2_256);
        assert_eq!(hex::encode(hash.digest()), HELLO_SHA256);
    }

    #[test]
    fn test_empty_identity_digest() {
        let hash = Multihash::from_bytes(&[0x00, 0x00]).unwrap();
        assert_eq!(hash.code(), multicodec::IDENTITY);
        assert_eq!(hash.size(), 0);
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            Multihash::from_bytes(&[0x12]),
            Err(CidError::InvalidFormat(_))
        ));
        assert!(matches!(
            Multihash::from_bytes(&[]),
            Err(CidError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_truncated_varint() {
        assert!(matches!(
            Multihash::from_bytes(&[0x12, 0x80]),
            Err(CidError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            Multihash::from_bytes(&[0x12, 0x03, 1, 2]),
            Err(CidError::InvalidDigestLength {
                declared: 3,
                actual: 2
            })
        );
        assert_eq!(
            Multihash::from_bytes(&[0x12, 0x01, 1, 2]),
            Err(CidError::InvalidDigestLength {
                declared: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_unknown_hash_function() {
        assert_eq!(
            Multihash::from_bytes(&[0x55, 0x01, 0xff]),
            Err(CidError::UnknownMultihash(0x55))
        );
        assert_eq!(
            Multihash::from_bytes(&[0x7f, 0x01, 0xff]),
            Err(CidError::UnknownMultihash(0x7f))
        );
    }

    #[test]
    fn test_injected_table() {
        static ENTRIES: &[CodecEntry] = &[CodecEntry::new("sha2-512", Tag::Multihash, 0x13)];
        let table = StaticCodecTable::new(ENTRIES);
        assert_eq!(
            Multihash::from_bytes_with(&[0x12, 0x01, 0xff], &table),
            Err(CidError::UnknownMultihash(0x12))
        );
        assert!(Multihash::from_bytes_with(&[0x13, 0x01, 0xff], &table).is_ok());
    }

    #[test]
    fn test_compute() {
        let hash = Multihash::compute(multicodec::SHA2_256, b"hello").unwrap();
        assert_eq!(hex::encode(hash.digest()), HELLO_SHA256);
        assert_eq!(hash, Multihash::sha2_256(b"hello"));

        let hash = Multihash::compute(multicodec::SHA2_512, b"").unwrap();
        assert_eq!(hash.size(), 64);
        assert_eq!(hex::encode(&hash.digest()[..8]), "cf83e1357eefb8bd");

        assert!(matches!(
            Multihash::compute(multicodec::BLAKE3, b"hello"),
            Err(CidError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_serde() {
        let hash = Multihash::wrap(0x12, vec![1, 2, 3]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, r#"{"code":18,"digest":[1,2,3]}"#);
        let back: Multihash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
