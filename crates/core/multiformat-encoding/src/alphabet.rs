//! Power-of-two alphabets (RFC 4648 and friends)
//!
//! An alphabet maps `n`-bit symbols produced by [`crate::nbit`] to characters.
//! Alphabets are stored in their canonical lower-case form; upper-case
//! variants are a case-folded view of the same table.

use crate::error::{EncodingError, Result};
use crate::nbit;

/// Padding character used by the padded RFC 4648 variants
pub const PADDING: char = '=';

/// Letter case applied on top of an alphabet
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    /// The alphabet exactly as written
    #[default]
    Lower,
    /// ASCII letters of the alphabet folded to upper case
    Upper,
}

impl Case {
    pub(crate) fn apply(self, c: u8) -> char {
        match self {
            Case::Lower => c as char,
            Case::Upper => c.to_ascii_uppercase() as char,
        }
    }
}

/// Looks `c` up in `chars`. Tables without upper-case letters match either
/// case of the input, so case only matters when encoding.
pub(crate) fn position_folded(chars: &[u8], c: char) -> Option<usize> {
    let c = if chars.iter().any(u8::is_ascii_uppercase) {
        c
    } else {
        c.to_ascii_lowercase()
    };
    chars.iter().position(|&a| a as char == c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alphabet {
    Binary,
    Octal,
    Base16,
    Base32,
    Base32Hex,
    Base32Z,
    Base64,
    Base64Url,
}

impl Alphabet {
    pub fn chars(self) -> &'static [u8] {
        match self {
            Alphabet::Binary => b"01",
            Alphabet::Octal => b"01234567",
            Alphabet::Base16 => b"0123456789abcdef",
            Alphabet::Base32 => b"abcdefghijklmnopqrstuvwxyz234567",
            Alphabet::Base32Hex => b"0123456789abcdefghijklmnopqrstuv",
            Alphabet::Base32Z => b"ybndrfg8ejkmcpqxot1uwisza345h769",
            Alphabet::Base64 => {
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/"
            }
            Alphabet::Base64Url => {
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_"
            }
        }
    }

    /// log2 of the alphabet size
    pub fn bits_per_character(self) -> u32 {
        self.chars().len().trailing_zeros()
    }

    /// Number of characters in one whole group, the unit padding fills up to
    pub fn group_chars(self) -> usize {
        let n = self.bits_per_character() as usize;
        nbit::lcm(8, n) / n
    }

    fn character(self, symbol: u8, case: Case) -> Result<char> {
        self.chars()
            .get(symbol as usize)
            .map(|&c| case.apply(c))
            .ok_or(EncodingError::NoCorrespondingAlphabetCharacter(symbol))
    }

    fn symbol(self, c: char) -> Result<u8> {
        position_folded(self.chars(), c)
            .map(|i| i as u8)
            .ok_or(EncodingError::OutOfAlphabetCharacter(c))
    }

    /// Encodes `bytes`, right-padding with [`PADDING`] to a whole group when `pad` is set
    pub fn encode(self, bytes: &[u8], case: Case, pad: bool) -> Result<String> {
        let symbols = nbit::pack(bytes, self.bits_per_character())?;
        let group = self.group_chars();

        let mut encoded = String::with_capacity(symbols.len().next_multiple_of(group));
        for symbol in symbols {
            encoded.push(self.character(symbol, case)?);
        }

        if pad {
            let partial = encoded.len() % group;
            if partial != 0 {
                encoded.extend(std::iter::repeat_n(PADDING, group - partial));
            }
        }
        Ok(encoded)
    }

    /// Decodes `text`, with or without trailing padding.
    ///
    /// Padding, when present, must run to the end and be shorter than a group.
    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        let body = match text.find(PADDING) {
            None => text,
            Some(at) => {
                let padding = &text[at..];
                if padding.chars().any(|c| c != PADDING) || padding.len() >= self.group_chars() {
                    return Err(EncodingError::NotCanonicalInput);
                }
                &text[..at]
            }
        };

        let symbols = body
            .chars()
            .map(|c| self.symbol(c))
            .collect::<Result<Vec<u8>>>()?;
        nbit::unpack(&symbols, self.bits_per_character())
    }
}
