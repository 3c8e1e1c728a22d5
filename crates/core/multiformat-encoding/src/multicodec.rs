//! Multicodec code table
//!
//! Multicodec assigns small integer codes to content types, hash functions
//! and key types. The table is static data: callers that parse multihashes
//! and CIDs take a [`CodecTable`] so that the set of known codes can be
//! swapped or versioned independently of the codecs themselves.
//!
//! See: <https://github.com/multiformats/multicodec>

use serde::{Deserialize, Serialize};

// ****************************************************************************
// Codec Magic Numbers
// See: https://github.com/multiformats/multicodec/blob/master/table.csv
// ****************************************************************************
pub const IDENTITY: u64 = 0x00;
pub const SHA1: u64 = 0x11;
pub const SHA2_256: u64 = 0x12;
pub const SHA2_512: u64 = 0x13;
pub const SHA3_512: u64 = 0x14;
pub const SHA3_384: u64 = 0x15;
pub const SHA3_256: u64 = 0x16;
pub const SHA3_224: u64 = 0x17;
pub const KECCAK_256: u64 = 0x1b;
pub const BLAKE3: u64 = 0x1e;
pub const SHA2_384: u64 = 0x20;
pub const BLAKE2B_256: u64 = 0xb220;
pub const BLAKE2B_512: u64 = 0xb240;

pub const CBOR: u64 = 0x51;
pub const RAW: u64 = 0x55;
pub const DAG_PB: u64 = 0x70;
pub const DAG_CBOR: u64 = 0x71;
pub const LIBP2P_KEY: u64 = 0x72;
pub const GIT_RAW: u64 = 0x78;
pub const DAG_JOSE: u64 = 0x85;
pub const DAG_JSON: u64 = 0x0129;
pub const JSON: u64 = 0x0200;

pub const ED25519_PUB: u64 = 0xed;
pub const ED25519_PRIV: u64 = 0x1300;
pub const X25519_PUB: u64 = 0xec;
pub const X25519_PRIV: u64 = 0x1302;
pub const SECP256K1_PUB: u64 = 0xe7;
pub const SECP256K1_PRIV: u64 = 0x1301;
pub const P256_PUB: u64 = 0x1200;
pub const P256_PRIV: u64 = 0x1306;
pub const P384_PUB: u64 = 0x1201;
pub const P384_PRIV: u64 = 0x1307;

/// Table column grouping codes by what they name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Multihash,
    Ipld,
    Serialization,
    Key,
}

/// One row of the multicodec table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodecEntry {
    pub name: &'static str,
    pub tag: Tag,
    pub code: u64,
}

impl CodecEntry {
    pub const fn new(name: &'static str, tag: Tag, code: u64) -> Self {
        Self { name, tag, code }
    }
}

/// Read-only lookup between multicodec codes and names
pub trait CodecTable: Send + Sync {
    fn by_code(&self, code: u64) -> Option<&CodecEntry>;

    fn by_name(&self, name: &str) -> Option<&CodecEntry>;

    fn name(&self, code: u64) -> Option<&str> {
        self.by_code(code).map(|entry| entry.name)
    }

    fn code(&self, name: &str) -> Option<u64> {
        self.by_name(name).map(|entry| entry.code)
    }

    /// Returns true if `code` names a hash function usable in a multihash
    fn is_multihash(&self, code: u64) -> bool {
        self.by_code(code)
            .is_some_and(|entry| entry.tag == Tag::Multihash)
    }
}

/// A [`CodecTable`] backed by a static slice of entries
#[derive(Debug, Clone, Copy)]
pub struct StaticCodecTable {
    entries: &'static [CodecEntry],
}

impl StaticCodecTable {
    pub const fn new(entries: &'static [CodecEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [CodecEntry] {
        self.entries
    }
}

impl CodecTable for StaticCodecTable {
    fn by_code(&self, code: u64) -> Option<&CodecEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    fn by_name(&self, name: &str) -> Option<&CodecEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

static DEFAULT_ENTRIES: &[CodecEntry] = &[
    CodecEntry::new("identity", Tag::Multihash, IDENTITY),
    CodecEntry::new("sha1", Tag::Multihash, SHA1),
    CodecEntry::new("sha2-256", Tag::Multihash, SHA2_256),
    CodecEntry::new("sha2-512", Tag::Multihash, SHA2_512),
    CodecEntry::new("sha3-512", Tag::Multihash, SHA3_512),
    CodecEntry::new("sha3-384", Tag::Multihash, SHA3_384),
    CodecEntry::new("sha3-256", Tag::Multihash, SHA3_256),
    CodecEntry::new("sha3-224", Tag::Multihash, SHA3_224),
    CodecEntry::new("keccak-256", Tag::Multihash, KECCAK_256),
    CodecEntry::new("blake3", Tag::Multihash, BLAKE3),
    CodecEntry::new("sha2-384", Tag::Multihash, SHA2_384),
    CodecEntry::new("blake2b-256", Tag::Multihash, BLAKE2B_256),
    CodecEntry::new("blake2b-512", Tag::Multihash, BLAKE2B_512),
    CodecEntry::new("cbor", Tag::Serialization, CBOR),
    CodecEntry::new("raw", Tag::Ipld, RAW),
    CodecEntry::new("dag-pb", Tag::Ipld, DAG_PB),
    CodecEntry::new("dag-cbor", Tag::Ipld, DAG_CBOR),
    CodecEntry::new("libp2p-key", Tag::Ipld, LIBP2P_KEY),
    CodecEntry::new("git-raw", Tag::Ipld, GIT_RAW),
    CodecEntry::new("dag-jose", Tag::Ipld, DAG_JOSE),
    CodecEntry::new("dag-json", Tag::Ipld, DAG_JSON),
    CodecEntry::new("json", Tag::Ipld, JSON),
    CodecEntry::new("ed25519-pub", Tag::Key, ED25519_PUB),
    CodecEntry::new("ed25519-priv", Tag::Key, ED25519_PRIV),
    CodecEntry::new("x25519-pub", Tag::Key, X25519_PUB),
    CodecEntry::new("x25519-priv", Tag::Key, X25519_PRIV),
    CodecEntry::new("secp256k1-pub", Tag::Key, SECP256K1_PUB),
    CodecEntry::new("secp256k1-priv", Tag::Key, SECP256K1_PRIV),
    CodecEntry::new("p256-pub", Tag::Key, P256_PUB),
    CodecEntry::new("p256-priv", Tag::Key, P256_PRIV),
    CodecEntry::new("p384-pub", Tag::Key, P384_PUB),
    CodecEntry::new("p384-priv", Tag::Key, P384_PRIV),
];

static DEFAULT_TABLE: StaticCodecTable = StaticCodecTable::new(DEFAULT_ENTRIES);

/// The bundled subset of the public multicodec table
pub fn default_table() -> &'static StaticCodecTable {
    &DEFAULT_TABLE
}
