//! Proquint: pronounceable 16-bit words
//!
//! Each pair of bytes becomes a five letter consonant-vowel-consonant-vowel-
//! consonant token carrying 4+2+4+2+4 bits. A trailing odd byte is written as
//! the first three letters of its zero-padded word, which hold exactly its 8
//! bits.
//!
//! See: <https://arxiv.org/html/0901.4016>

use crate::error::{EncodingError, Result};

pub const CONSONANTS: &[u8; 16] = b"bdfghjklmnprstvz";
pub const VOWELS: &[u8; 4] = b"aiou";

pub const DEFAULT_SEPARATOR: char = '-';

/// Marker that opens a proquint string; the multibase form drops its `p`
pub const PREFIX: &str = "pro-";

const WORD_LEN: usize = 5;
const SHORT_WORD_LEN: usize = 3;

/// Converts a 16-bit word (big-endian) into its five letter token
pub fn word_to_quint(word: [u8; 2]) -> String {
    let [high, low] = word;

    let (c1, rest) = (high / 16, high % 16);
    let (v1, c2_high) = (rest / 4, rest % 4);
    let (c2_low, rest) = (low / 64, low % 64);
    let (v2, c3) = (rest / 16, rest % 16);
    let c2 = c2_high * 4 + c2_low;

    [
        CONSONANTS[c1 as usize],
        VOWELS[v1 as usize],
        CONSONANTS[c2 as usize],
        VOWELS[v2 as usize],
        CONSONANTS[c3 as usize],
    ]
    .iter()
    .map(|&c| c as char)
    .collect()
}

/// Converts a five letter token back into its 16-bit word
pub fn quint_to_word(quint: &str) -> Result<[u8; 2]> {
    let letters: Vec<char> = quint.chars().collect();
    if letters.len() != WORD_LEN {
        return Err(EncodingError::InvalidGroupSize {
            size: letters.len(),
            max: WORD_LEN,
        });
    }

    let mut fields = [0u8; WORD_LEN];
    for (i, (&c, field)) in letters.iter().zip(fields.iter_mut()).enumerate() {
        let table: &[u8] = if i % 2 == 0 { CONSONANTS } else { VOWELS };
        *field = table
            .iter()
            .position(|&t| t as char == c)
            .ok_or(EncodingError::OutOfAlphabetCharacter(c))? as u8;
    }

    let [c1, v1, c2, v2, c3] = fields;
    Ok([c1 * 16 + v1 * 4 + c2 / 4, (c2 % 4) * 64 + v2 * 16 + c3])
}

/// Encodes `bytes` as proquint tokens joined by `separator`
pub fn encode(bytes: &[u8], separator: char) -> String {
    bytes
        .chunks(2)
        .map(|pair| {
            let quint = word_to_quint([pair[0], pair.get(1).copied().unwrap_or(0)]);
            if pair.len() == 1 {
                quint[..SHORT_WORD_LEN].to_string()
            } else {
                quint
            }
        })
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

/// Decodes proquint text, splitting on `separator` or, when `None`, on
/// fixed five letter boundaries. A leading `pro-` or `ro-` is ignored.
pub fn decode(text: &str, separator: Option<char>) -> Result<Vec<u8>> {
    let body = text
        .strip_prefix(PREFIX)
        .or_else(|| text.strip_prefix(&PREFIX[1..]))
        .unwrap_or(text);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let tokens: Vec<String> = match separator {
        Some(separator) => body.split(separator).map(str::to_string).collect(),
        None => body
            .chars()
            .collect::<Vec<_>>()
            .chunks(WORD_LEN)
            .map(|chunk| chunk.iter().collect())
            .collect(),
    };

    let mut bytes = Vec::with_capacity(tokens.len() * 2);
    for (i, token) in tokens.iter().enumerate() {
        match token.chars().count() {
            WORD_LEN => bytes.extend(quint_to_word(token)?),
            SHORT_WORD_LEN if i + 1 == tokens.len() => {
                let [high, low] = quint_to_word(&pad(token))?;
                if low != 0 {
                    return Err(EncodingError::NotCanonicalInput);
                }
                bytes.push(high);
            }
            SHORT_WORD_LEN => return Err(EncodingError::NotCanonicalInput),
            size => {
                return Err(EncodingError::InvalidGroupSize {
                    size,
                    max: WORD_LEN,
                });
            }
        }
    }
    Ok(bytes)
}

/// Fills a short token up to a whole word with the first vowel and consonant
fn pad(token: &str) -> String {
    let mut padded = token.to_string();
    for i in token.chars().count()..WORD_LEN {
        let table: &[u8] = if i % 2 == 0 { CONSONANTS } else { VOWELS };
        padded.push(table[0] as char);
    }
    padded
}
