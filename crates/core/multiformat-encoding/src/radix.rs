//! Arbitrary-precision radix conversion for non power-of-two bases
//!
//! The input bytes are read as one big-endian unsigned integer and rewritten
//! in the target radix. Leading zero bytes carry no value, so each one is
//! kept as a leading zero character (and vice versa when decoding).

use crate::alphabet::{Case, position_folded};
use crate::error::{EncodingError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadixAlphabet {
    Base10,
    Base36,
    Base58Btc,
    Base58Flickr,
}

impl RadixAlphabet {
    pub fn chars(self) -> &'static [u8] {
        match self {
            RadixAlphabet::Base10 => b"0123456789",
            RadixAlphabet::Base36 => b"0123456789abcdefghijklmnopqrstuvwxyz",
            RadixAlphabet::Base58Btc => {
                b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz"
            }
            RadixAlphabet::Base58Flickr => {
                b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ"
            }
        }
    }

    pub fn radix(self) -> u32 {
        self.chars().len() as u32
    }

    pub fn encode(self, bytes: &[u8], case: Case) -> String {
        let chars = self.chars();
        let zeros = bytes.iter().take_while(|&&b| b == 0).count();

        let mut number = bytes[zeros..].to_vec();
        let mut start = 0;
        // least significant digit first
        let mut digits = Vec::with_capacity(number.len() * 138 / 100 + 1);
        while start < number.len() {
            digits.push(div_rem(&mut number[start..], self.radix()));
            while start < number.len() && number[start] == 0 {
                start += 1;
            }
        }

        let mut encoded = String::with_capacity(zeros + digits.len());
        encoded.extend(std::iter::repeat_n(case.apply(chars[0]), zeros));
        encoded.extend(digits.iter().rev().map(|&d| case.apply(chars[d as usize])));
        encoded
    }

    /// Decodes `text`. Alphabets without upper-case letters accept either case.
    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        let mut zeros = 0;
        let mut number: Vec<u8> = Vec::with_capacity(text.len());

        for c in text.chars() {
            let digit = self.digit(c)?;
            if number.is_empty() && digit == 0 {
                zeros += 1;
                continue;
            }
            mul_add(&mut number, self.radix(), digit);
        }

        let mut bytes = vec![0; zeros];
        bytes.extend(number);
        Ok(bytes)
    }

    fn digit(self, c: char) -> Result<u32> {
        position_folded(self.chars(), c)
            .map(|i| i as u32)
            .ok_or(EncodingError::OutOfAlphabetCharacter(c))
    }
}

/// Divides the big-endian integer in `number` by `divisor` in place, returning the remainder
fn div_rem(number: &mut [u8], divisor: u32) -> u8 {
    let mut remainder = 0u32;
    for byte in number.iter_mut() {
        let acc = (remainder << 8) | u32::from(*byte);
        *byte = (acc / divisor) as u8;
        remainder = acc % divisor;
    }
    remainder as u8
}

/// `number = number * multiplier + addend`, keeping `number` minimal big-endian
fn mul_add(number: &mut Vec<u8>, multiplier: u32, addend: u32) {
    let mut carry = addend;
    for byte in number.iter_mut().rev() {
        let acc = u32::from(*byte) * multiplier + carry;
        *byte = (acc & 0xff) as u8;
        carry = acc >> 8;
    }
    while carry > 0 {
        number.insert(0, (carry & 0xff) as u8);
        carry >>= 8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE58_VECTORS: &[(&str, &str)] = &[
        ("", ""),
        (" ", "Z"),
        ("-", "n"),
        ("0", "q"),
        ("1", "r"),
        ("-1", "4SU"),
        ("11", "4k8"),
        ("abc", "ZiCa"),
        ("1234598760", "3mJr7AoUXx2Wqd"),
        (
            "abcdefghijklmnopqrstuvwxyz",
            "3yxU3u1igY8WkgtjK92fbJQCd4BZiiT1v25f",
        ),
        (
            "00000000000000000000000000000000000000000000000000000000000000",
            "3sN2THZeE9Eh9eYrwkvZqNstbHGvrxSAM7gXUXvyFQP8XvQLUqNCS27icwUeDT7ckHm4FUHM2mTVh1vbLmk7y",
        ),
    ];

    #[test]
    fn test_base58_vectors() {
        for (input, output) in BASE58_VECTORS {
            assert_eq!(
                RadixAlphabet::Base58Btc.encode(input.as_bytes(), Case::Lower),
                *output
            );
            assert_eq!(
                RadixAlphabet::Base58Btc.decode(output).unwrap(),
                input.as_bytes()
            );
        }
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(
            RadixAlphabet::Base58Btc.encode(&[0, 0, 0], Case::Lower),
            "111"
        );
        assert_eq!(RadixAlphabet::Base58Btc.decode("111").unwrap(), [0, 0, 0]);
        assert_eq!(
            RadixAlphabet::Base58Btc.encode(&[0, 0, 1], Case::Lower),
            "112"
        );
        assert_eq!(RadixAlphabet::Base10.encode(&[0, 1], Case::Lower), "01");
        assert_eq!(RadixAlphabet::Base10.decode("0001").unwrap(), [0, 0, 0, 1]);
    }

    #[test]
    fn test_zero_digits_after_value() {
        // 256 = "256" in base 10: zero digit that is not leading
        assert_eq!(RadixAlphabet::Base10.encode(&[1, 0], Case::Lower), "256");
        assert_eq!(RadixAlphabet::Base10.decode("100").unwrap(), [100]);
    }

    #[test]
    fn test_base36_case() {
        let lower = RadixAlphabet::Base36.encode(b"yes mani !", Case::Lower);
        let upper = RadixAlphabet::Base36.encode(b"yes mani !", Case::Upper);
        assert_eq!(lower, "2lcpzo5yikidynfl");
        assert_eq!(upper, "2LCPZO5YIKIDYNFL");
        for text in [lower.as_str(), upper.as_str(), "2lCpZo5YikIdYnFl"] {
            assert_eq!(RadixAlphabet::Base36.decode(text).unwrap(), b"yes mani !");
        }
    }

    #[test]
    fn test_out_of_alphabet() {
        for bad in ["0", "O", "I", "l"] {
            assert!(matches!(
                RadixAlphabet::Base58Btc.decode(bad),
                Err(EncodingError::OutOfAlphabetCharacter(_))
            ));
        }
    }

    #[test]
    fn test_flickr() {
        let encoded = RadixAlphabet::Base58Flickr.encode(b"yes mani !", Case::Lower);
        assert_eq!(encoded, "7Pznk19XTTzBtx");
        assert_eq!(
            RadixAlphabet::Base58Flickr.decode(&encoded).unwrap(),
            b"yes mani !"
        );
        // base58 letters differ by case, so no folding
        assert_ne!(
            RadixAlphabet::Base58Flickr.decode(&encoded.to_lowercase()).unwrap(),
            b"yes mani !"
        );
    }
}
