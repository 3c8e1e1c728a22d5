//! Encoding errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Character '{0}' is not part of the alphabet")]
    OutOfAlphabetCharacter(char),

    #[error("No alphabet character for value {0}")]
    NoCorrespondingAlphabetCharacter(u8),

    #[error("Invalid group size: {size} (maximum {max})")]
    InvalidGroupSize { size: usize, max: usize },

    #[error("Invalid bit width: {0} (must be between 1 and 8)")]
    InvalidN(u32),

    #[error("Symbol {symbol} does not fit in {n} bits")]
    InvalidNTet { symbol: u8, n: u32 },

    #[error("Input is not in canonical form")]
    NotCanonicalInput,
}

pub type Result<T> = std::result::Result<T, EncodingError>;
