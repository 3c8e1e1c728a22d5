use multiformat_cid::CidError;
use multiformat_encoding::EncodingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("CID error: {0}")]
    Cid(#[from] CidError),

    #[error("Invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown multicodec name: {0}")]
    UnknownCodec(String),

    #[error("Unrecognised multibase prefix: {0}")]
    UnknownEncoding(String),

    #[error("Decoded bytes are not valid UTF-8 (use --hex)")]
    NotUtf8,
}

pub type Result<T> = std::result::Result<T, CliError>;
