//! Multibase encoding/decoding
//!
//! Multibase is a protocol for self-describing base encodings.
//! The first character indicates the encoding used.
//!
//! See: <https://github.com/multiformats/multibase>

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use tracing::trace;

use crate::alphabet::{Alphabet, Case};
use crate::error::{EncodingError, Result};
use crate::proquint;
use crate::radix::RadixAlphabet;

/// Multibase prefix for base58btc (Bitcoin alphabet)
pub const BASE58BTC_PREFIX: char = 'z';

/// Multibase prefix for lower-case, unpadded base32
pub const BASE32_PREFIX: char = 'b';

/// Known multibase encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    Identity,
    Base2,
    Base8,
    Base10,
    Base16,
    Base16Upper,
    Base32Hex,
    Base32HexUpper,
    Base32HexPad,
    Base32HexPadUpper,
    Base32,
    Base32Upper,
    Base32Pad,
    Base32PadUpper,
    Base32Z,
    Base36,
    Base36Upper,
    Base58Btc,
    Base58Flickr,
    Base64,
    Base64Pad,
    Base64Url,
    Base64UrlPad,
    Proquint,
}

/// How the body of a multibase string is produced
#[derive(Debug, Clone, Copy)]
enum Scheme {
    /// Raw bytes, which must be valid UTF-8 to live in a string
    Identity,
    Bits {
        alphabet: Alphabet,
        case: Case,
        pad: bool,
    },
    Radix {
        alphabet: RadixAlphabet,
        case: Case,
    },
    Proquint,
}

struct Descriptor {
    base: Base,
    prefix: char,
    name: &'static str,
    scheme: Scheme,
}

const fn bits(alphabet: Alphabet, case: Case, pad: bool) -> Scheme {
    Scheme::Bits {
        alphabet,
        case,
        pad,
    }
}

const fn radix(alphabet: RadixAlphabet, case: Case) -> Scheme {
    Scheme::Radix { alphabet, case }
}

// Indexed by `Base as usize`
#[rustfmt::skip]
static DESCRIPTORS: [Descriptor; 24] = [
    Descriptor { base: Base::Identity, prefix: '\0', name: "identity", scheme: Scheme::Identity },
    Descriptor { base: Base::Base2, prefix: '0', name: "base2", scheme: bits(Alphabet::Binary, Case::Lower, false) },
    Descriptor { base: Base::Base8, prefix: '7', name: "base8", scheme: bits(Alphabet::Octal, Case::Lower, false) },
    Descriptor { base: Base::Base10, prefix: '9', name: "base10", scheme: radix(RadixAlphabet::Base10, Case::Lower) },
    Descriptor { base: Base::Base16, prefix: 'f', name: "base16", scheme: bits(Alphabet::Base16, Case::Lower, false) },
    Descriptor { base: Base::Base16Upper, prefix: 'F', name: "base16upper", scheme: bits(Alphabet::Base16, Case::Upper, false) },
    Descriptor { base: Base::Base32Hex, prefix: 'v', name: "base32hex", scheme: bits(Alphabet::Base32Hex, Case::Lower, false) },
    Descriptor { base: Base::Base32HexUpper, prefix: 'V', name: "base32hexupper", scheme: bits(Alphabet::Base32Hex, Case::Upper, false) },
    Descriptor { base: Base::Base32HexPad, prefix: 't', name: "base32hexpad", scheme: bits(Alphabet::Base32Hex, Case::Lower, true) },
    Descriptor { base: Base::Base32HexPadUpper, prefix: 'T', name: "base32hexpadupper", scheme: bits(Alphabet::Base32Hex, Case::Upper, true) },
    Descriptor { base: Base::Base32, prefix: 'b', name: "base32", scheme: bits(Alphabet::Base32, Case::Lower, false) },
    Descriptor { base: Base::Base32Upper, prefix: 'B', name: "base32upper", scheme: bits(Alphabet::Base32, Case::Upper, false) },
    Descriptor { base: Base::Base32Pad, prefix: 'c', name: "base32pad", scheme: bits(Alphabet::Base32, Case::Lower, true) },
    Descriptor { base: Base::Base32PadUpper, prefix: 'C', name: "base32padupper", scheme: bits(Alphabet::Base32, Case::Upper, true) },
    Descriptor { base: Base::Base32Z, prefix: 'h', name: "base32z", scheme: bits(Alphabet::Base32Z, Case::Lower, false) },
    Descriptor { base: Base::Base36, prefix: 'k', name: "base36", scheme: radix(RadixAlphabet::Base36, Case::Lower) },
    Descriptor { base: Base::Base36Upper, prefix: 'K', name: "base36upper", scheme: radix(RadixAlphabet::Base36, Case::Upper) },
    Descriptor { base: Base::Base58Btc, prefix: 'z', name: "base58btc", scheme: radix(RadixAlphabet::Base58Btc, Case::Lower) },
    Descriptor { base: Base::Base58Flickr, prefix: 'Z', name: "base58flickr", scheme: radix(RadixAlphabet::Base58Flickr, Case::Lower) },
    Descriptor { base: Base::Base64, prefix: 'm', name: "base64", scheme: bits(Alphabet::Base64, Case::Lower, false) },
    Descriptor { base: Base::Base64Pad, prefix: 'M', name: "base64pad", scheme: bits(Alphabet::Base64, Case::Lower, true) },
    Descriptor { base: Base::Base64Url, prefix: 'u', name: "base64url", scheme: bits(Alphabet::Base64Url, Case::Lower, false) },
    Descriptor { base: Base::Base64UrlPad, prefix: 'U', name: "base64urlpad", scheme: bits(Alphabet::Base64Url, Case::Lower, true) },
    Descriptor { base: Base::Proquint, prefix: 'p', name: "proquint", scheme: Scheme::Proquint },
];

impl Base {
    fn descriptor(self) -> &'static Descriptor {
        &DESCRIPTORS[self as usize]
    }

    /// Every known encoding, in table order
    pub fn all() -> impl Iterator<Item = Base> {
        DESCRIPTORS.iter().map(|d| d.base)
    }

    /// The single character that identifies this encoding
    pub fn prefix(self) -> char {
        self.descriptor().prefix
    }

    /// Canonical multibase name, e.g. `base58btc`
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn from_prefix(prefix: char) -> Option<Base> {
        DESCRIPTORS
            .iter()
            .find(|d| d.prefix == prefix)
            .map(|d| d.base)
    }

    pub fn from_name(name: &str) -> Option<Base> {
        DESCRIPTORS.iter().find(|d| d.name == name).map(|d| d.base)
    }

    /// Encodes `bytes` without the multibase prefix
    pub fn encode(self, bytes: &[u8]) -> Result<String> {
        match self.descriptor().scheme {
            Scheme::Identity => String::from_utf8(bytes.to_vec()).map_err(|e| {
                let at = e.utf8_error().valid_up_to();
                EncodingError::NoCorrespondingAlphabetCharacter(bytes[at])
            }),
            Scheme::Bits {
                alphabet,
                case,
                pad,
            } => alphabet.encode(bytes, case, pad),
            Scheme::Radix { alphabet, case } => Ok(alphabet.encode(bytes, case)),
            Scheme::Proquint => Ok(format!(
                "{}{}",
                &proquint::PREFIX[1..],
                proquint::encode(bytes, proquint::DEFAULT_SEPARATOR)
            )),
        }
    }

    /// Decodes a body that has already had its multibase prefix removed
    ///
    /// Letter case and padding are not part of the check: `b` and `B` bodies
    /// decode alike, as do padded and unpadded base64.
    pub fn decode(self, body: &str) -> Result<Vec<u8>> {
        match self.descriptor().scheme {
            Scheme::Identity => Ok(body.as_bytes().to_vec()),
            Scheme::Bits { alphabet, .. } => alphabet.decode(body),
            Scheme::Radix { alphabet, .. } => alphabet.decode(body),
            Scheme::Proquint => proquint::decode(body, Some(proquint::DEFAULT_SEPARATOR)),
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Base {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        Base::from_name(s)
            .ok_or_else(|| EncodingError::InvalidFormat(format!("unknown multibase encoding: {s}")))
    }
}

/// Identifies the encoding of a multibase string from its first character
pub fn identify_encoding(text: &str) -> Option<Base> {
    text.chars().next().and_then(Base::from_prefix)
}

/// Decodes a multibase string, returning the encoding it used and the bytes
pub fn decode(text: &str) -> Result<(Base, Vec<u8>)> {
    let mut chars = text.chars();
    let Some(prefix) = chars.next() else {
        return Err(EncodingError::InvalidFormat(
            "empty multibase string".into(),
        ));
    };
    let Some(base) = Base::from_prefix(prefix) else {
        return Err(EncodingError::InvalidFormat(format!(
            "unknown multibase prefix '{}'",
            prefix.escape_default()
        )));
    };

    trace!(base = base.name(), len = text.len(), "decoding multibase");
    let bytes = base.decode(chars.as_str())?;
    Ok((base, bytes))
}

/// Encodes `bytes` with `base`, prepending the multibase prefix when `with_prefix` is set
pub fn encode(base: Base, bytes: &[u8], with_prefix: bool) -> Result<String> {
    trace!(base = base.name(), len = bytes.len(), with_prefix, "encoding multibase");
    let body = base.encode(bytes)?;
    if !with_prefix {
        return Ok(body);
    }

    let mut encoded = String::with_capacity(body.len() + 1);
    encoded.push(base.prefix());
    encoded.push_str(&body);
    Ok(encoded)
}

/// Encode bytes as base58btc with multibase prefix 'z'
pub fn encode_base58btc(bytes: &[u8]) -> String {
    let mut encoded = String::from(BASE58BTC_PREFIX);
    encoded.push_str(&RadixAlphabet::Base58Btc.encode(bytes, Case::Lower));
    encoded
}

/// Decode a base58btc multibase string (must start with 'z')
///
/// Returns the decoded bytes without the prefix.
pub fn decode_base58btc(s: &str) -> Result<Vec<u8>> {
    let Some(encoded) = s.strip_prefix(BASE58BTC_PREFIX) else {
        let prefix = s.chars().next().unwrap_or('\0');
        return Err(EncodingError::InvalidFormat(format!(
            "expected base58btc prefix 'z', got '{}'",
            prefix.escape_default()
        )));
    };
    Base::Base58Btc.decode(encoded)
}

/// Bytes tagged with the multibase encoding they travel in
///
/// Serializes as the prefixed multibase string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Multibase {
    base: Base,
    data: Vec<u8>,
}

impl Multibase {
    pub fn new(base: Base, data: impl Into<Vec<u8>>) -> Self {
        Self {
            base,
            data: data.into(),
        }
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Prefixed string form
    pub fn encode(&self) -> Result<String> {
        encode(self.base, &self.data, true)
    }
}

impl FromStr for Multibase {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        let (base, data) = decode(s)?;
        Ok(Self { base, data })
    }
}

impl Serialize for Multibase {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let encoded = self.encode().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }
}

impl<'de> Deserialize<'de> for Multibase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order() {
        for (i, descriptor) in DESCRIPTORS.iter().enumerate() {
            assert_eq!(descriptor.base as usize, i, "{}", descriptor.name);
        }
    }

    #[test]
    fn test_prefixes_unique() {
        for a in Base::all() {
            for b in Base::all() {
                if a != b {
                    assert_ne!(a.prefix(), b.prefix());
                    assert_ne!(a.name(), b.name());
                }
            }
        }
    }

    #[test]
    fn test_identify_encoding() {
        assert_eq!(
            identify_encoding("bafykbzacedlxaeuckppk5sxhk4bkriewnf3zcojvaklwgzvwaghykrmuyzi3u"),
            Some(Base::Base32)
        );
        assert_eq!(identify_encoding("zfffs"), Some(Base::Base58Btc));
        assert_eq!(identify_encoding("asdfasdf"), None);
        assert_eq!(identify_encoding(""), None);
    }

    #[test]
    fn test_decode_base58btc() {
        // "z" + base58btc("hello") = "zCn8eVZg"
        let result = decode_base58btc("zCn8eVZg").unwrap();
        assert_eq!(result, b"hello");
    }

    #[test]
    fn test_encode_base58btc() {
        let encoded = encode_base58btc(b"hello");
        assert_eq!(encoded, "zCn8eVZg");
    }

    #[test]
    fn test_invalid_prefix() {
        assert!(matches!(
            decode_base58btc("fABCDEF"),
            Err(EncodingError::InvalidFormat(_))
        ));
        assert!(matches!(decode("!abc"), Err(EncodingError::InvalidFormat(_))));
        assert!(matches!(decode(""), Err(EncodingError::InvalidFormat(_))));
    }

    #[test]
    fn test_invalid_base58() {
        // '0', 'O', 'I', 'l' are not valid base58 characters
        let result = decode_base58btc("z0OIl");
        assert_eq!(result, Err(EncodingError::OutOfAlphabetCharacter('0')));
    }

    #[test]
    fn test_did_key_identifier() {
        // Real did:key identifier (ed25519)
        let id = "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";
        let (base, bytes) = decode(id).unwrap();
        assert_eq!(base, Base::Base58Btc);
        // First byte should be 0xed (ed25519 multicodec prefix)
        assert_eq!(bytes[0], 0xed);
    }

    #[test]
    fn test_proquint() {
        assert_eq!(
            encode(Base::Proquint, &[127, 0, 0, 1], true).unwrap(),
            "pro-lusab-babad"
        );
        assert_eq!(
            decode("pro-lusab-babad").unwrap(),
            (Base::Proquint, vec![127, 0, 0, 1])
        );
        assert_eq!(encode(Base::Proquint, b"", true).unwrap(), "pro-");
    }

    #[test]
    fn test_identity() {
        assert_eq!(encode(Base::Identity, b"hi", true).unwrap(), "\0hi");
        assert_eq!(decode("\0hi").unwrap(), (Base::Identity, b"hi".to_vec()));
        assert_eq!(
            encode(Base::Identity, &[b'a', 0xff], true),
            Err(EncodingError::NoCorrespondingAlphabetCharacter(0xff))
        );
    }

    #[test]
    fn test_without_prefix() {
        assert_eq!(
            encode(Base::Base16, b"foobar", false).unwrap(),
            "666f6f626172"
        );
        assert_eq!(
            encode(Base::Base16, b"foobar", true).unwrap(),
            "f666f6f626172"
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(
            "base32hexpadupper".parse::<Base>().unwrap(),
            Base::Base32HexPadUpper
        );
        assert_eq!(Base::Base58Btc.to_string(), "base58btc");
        assert!("base99".parse::<Base>().is_err());
        assert_eq!(
            serde_json::to_string(&Base::Base64UrlPad).unwrap(),
            "\"base64urlpad\""
        );
    }

    #[test]
    fn test_multibase_value() {
        let value: Multibase = "MZm9vYg==".parse().unwrap();
        assert_eq!(value.base(), Base::Base64Pad);
        assert_eq!(value.data(), b"foob");

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"MZm9vYg==\"");
        let back: Multibase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);

        assert_eq!(value.into_data(), b"foob");
    }
}
