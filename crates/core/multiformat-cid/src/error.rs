use multiformat_encoding::{Base, EncodingError};
use thiserror::Error;

/// Errors that can occur when parsing or building multihashes and CIDs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Unknown multicodec content type: 0x{0:x}")]
    UnknownMulticodec(u64),

    #[error("Unknown multihash function: 0x{0:x}")]
    UnknownMultihash(u64),

    #[error("Invalid digest length: declared {declared} bytes, found {actual}")]
    InvalidDigestLength { declared: u64, actual: usize },

    #[error("CIDv0 can only be encoded as base58btc, not {0}")]
    InvalidEncodingForCidV0(Base),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
}

pub type Result<T> = std::result::Result<T, CidError>;
