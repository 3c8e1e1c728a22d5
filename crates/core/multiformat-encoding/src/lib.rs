//! Multibase, base-N and multicodec encoding primitives
//!
//! This crate provides the text layer of the multiformats stack:
//! - Bit packing for power-of-two bases ([`nbit`]) and their alphabets ([`alphabet`])
//! - Arbitrary-precision radix conversion for base10/36/58 ([`radix`])
//! - Proquint pronounceable words ([`proquint`])
//! - Multibase prefix dispatch ([`multibase`])
//! - The multicodec code table ([`multicodec`])

pub mod alphabet;
pub mod multibase;
pub mod multicodec;
pub mod nbit;
pub mod proquint;
pub mod radix;

pub use alphabet::{Alphabet, Case};
pub use multibase::{
    BASE32_PREFIX, BASE58BTC_PREFIX, Base, Multibase, decode, decode_base58btc, encode,
    encode_base58btc, identify_encoding,
};
pub use multicodec::{CodecEntry, CodecTable, StaticCodecTable, Tag, default_table};
pub use radix::RadixAlphabet;

mod error;
pub use error::{EncodingError, Result};
