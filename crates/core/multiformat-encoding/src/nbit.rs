//! Conversion between bytes and fixed-width symbols
//!
//! Every power-of-two base (2, 8, 16, 32, 64) reads its input as an MSB-first
//! bit stream cut into `n`-bit symbols. Input is processed in groups of
//! `lcm(8, n)` bits so that no symbol ever straddles a group boundary, which
//! keeps the conversion invertible group by group.
//!
//! ```text
//!   +--first octet--+-second octet--+--third octet--+
//!   |7 6 5 4 3 2 1 0|7 6 5 4 3 2 1 0|7 6 5 4 3 2 1 0|
//!   +-----------+---+-------+-------+---+-----------+
//!   |5 4 3 2 1 0|5 4 3 2 1 0|5 4 3 2 1 0|5 4 3 2 1 0|
//!   +--1.symbol-+--2.symbol-+--3.symbol-+--4.symbol-+
//! ```

use crate::error::{EncodingError, Result};

/// Smallest supported symbol width in bits
pub const MIN_BITS: u32 = 1;

/// Largest supported symbol width in bits
pub const MAX_BITS: u32 = 8;

pub fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

pub fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}

/// Returns `(bytes, symbols)` held by one whole group of `n`-bit symbols
pub fn group_sizes(n: u32) -> Result<(usize, usize)> {
    if !(MIN_BITS..=MAX_BITS).contains(&n) {
        return Err(EncodingError::InvalidN(n));
    }
    let bits = lcm(8, n as usize);
    Ok((bits / 8, bits / n as usize))
}

/// Packs at most one group of bytes into `n`-bit symbols.
///
/// The final symbol is zero-padded on the right when the bit count is not a
/// multiple of `n`.
pub fn pack_group(bytes: &[u8], n: u32) -> Result<Vec<u8>> {
    let (max, _) = group_sizes(n)?;
    if bytes.len() > max {
        return Err(EncodingError::InvalidGroupSize {
            size: bytes.len(),
            max,
        });
    }

    let mask: u16 = (1 << n) - 1;
    let mut symbols = Vec::with_capacity((bytes.len() * 8).div_ceil(n as usize));

    // Bits read from the input that have not been emitted yet
    let mut carry: u16 = 0;
    let mut carry_bits: u32 = 0;

    for &byte in bytes {
        carry = (carry << 8) | u16::from(byte);
        carry_bits += 8;
        while carry_bits >= n {
            carry_bits -= n;
            symbols.push(((carry >> carry_bits) & mask) as u8);
        }
        carry &= (1 << carry_bits) - 1;
    }

    if carry_bits > 0 {
        symbols.push(((carry << (n - carry_bits)) & mask) as u8);
    }

    Ok(symbols)
}

/// Unpacks at most one group of `n`-bit symbols back into bytes.
///
/// Rejects any symbol sequence `pack_group` could not have produced: bits
/// left over after the last whole byte must be zero, and the group must not
/// carry symbols that contribute no byte at all.
pub fn unpack_group(symbols: &[u8], n: u32) -> Result<Vec<u8>> {
    let (_, max) = group_sizes(n)?;
    if symbols.len() > max {
        return Err(EncodingError::InvalidGroupSize {
            size: symbols.len(),
            max,
        });
    }

    let mut bytes = Vec::with_capacity(symbols.len() * n as usize / 8);
    let mut carry: u16 = 0;
    let mut carry_bits: u32 = 0;

    for &symbol in symbols {
        if u16::from(symbol) >> n != 0 {
            return Err(EncodingError::InvalidNTet { symbol, n });
        }
        carry = (carry << n) | u16::from(symbol);
        carry_bits += n;
        if carry_bits >= 8 {
            carry_bits -= 8;
            bytes.push((carry >> carry_bits) as u8);
            carry &= (1 << carry_bits) - 1;
        }
    }

    if carry != 0 || (bytes.len() * 8).div_ceil(n as usize) != symbols.len() {
        return Err(EncodingError::NotCanonicalInput);
    }

    Ok(bytes)
}

/// Packs a byte string of any length into `n`-bit symbols.
///
/// Produces `ceil(8 * bytes.len() / n)` symbols.
pub fn pack(bytes: &[u8], n: u32) -> Result<Vec<u8>> {
    let (group, _) = group_sizes(n)?;
    let mut symbols = Vec::with_capacity((bytes.len() * 8).div_ceil(n as usize));
    for chunk in bytes.chunks(group) {
        symbols.extend(pack_group(chunk, n)?);
    }
    Ok(symbols)
}

/// Unpacks a sequence of `n`-bit symbols of any length into bytes.
///
/// Produces `floor(n * symbols.len() / 8)` bytes.
pub fn unpack(symbols: &[u8], n: u32) -> Result<Vec<u8>> {
    let (_, group) = group_sizes(n)?;
    let mut bytes = Vec::with_capacity(symbols.len() * n as usize / 8);
    for chunk in symbols.chunks(group) {
        bytes.extend(unpack_group(chunk, n)?);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sextets() {
        assert_eq!(pack_group(&[77, 97, 110], 6).unwrap(), [19, 22, 5, 46]);
        assert_eq!(pack_group(&[77, 97], 6).unwrap(), [19, 22, 4]);
        assert_eq!(pack_group(&[77], 6).unwrap(), [19, 16]);

        assert_eq!(unpack_group(&[19, 22, 5, 46], 6).unwrap(), [77, 97, 110]);
        assert_eq!(unpack_group(&[19, 22, 4], 6).unwrap(), [77, 97]);
        assert_eq!(unpack_group(&[19, 16], 6).unwrap(), [77]);
    }

    #[test]
    fn test_other_widths() {
        // 01100110 01101111 01101111 -> 01100 11001 10111 10110 1111(0)
        assert_eq!(pack(&[102, 111, 111], 5).unwrap(), [12, 25, 23, 22, 30]);
        assert_eq!(unpack(&[12, 25, 23, 22, 30], 5).unwrap(), [102, 111, 111]);

        assert_eq!(pack(&[102], 4).unwrap(), [6, 6]);
        assert_eq!(unpack(&[6, 6], 4).unwrap(), [102]);

        assert_eq!(pack(&[23], 3).unwrap(), [0, 5, 6]);
        assert_eq!(unpack(&[0, 5, 6], 3).unwrap(), [23]);

        assert_eq!(pack(&[201], 1).unwrap(), [1, 1, 0, 0, 1, 0, 0, 1]);
        assert_eq!(unpack(&[1, 1, 0, 0, 1, 0, 0, 1], 1).unwrap(), [201]);

        assert_eq!(pack(&[0xab, 0xcd], 8).unwrap(), [0xab, 0xcd]);
    }

    #[test]
    fn test_non_canonical() {
        // trailing bits set
        assert_eq!(
            unpack_group(&[19, 22, 5], 6),
            Err(EncodingError::NotCanonicalInput)
        );
        assert_eq!(
            unpack_group(&[19, 22], 6),
            Err(EncodingError::NotCanonicalInput)
        );
        // a single sextet never holds a whole byte
        assert_eq!(
            unpack_group(&[19], 6),
            Err(EncodingError::NotCanonicalInput)
        );
        assert_eq!(unpack_group(&[0], 6), Err(EncodingError::NotCanonicalInput));
        assert_eq!(unpack_group(&[1], 1), Err(EncodingError::NotCanonicalInput));
        // a full trailing group after whole groups
        assert_eq!(
            unpack(&[19, 22, 5, 46, 19], 6),
            Err(EncodingError::NotCanonicalInput)
        );
    }

    #[test]
    fn test_invalid_n() {
        assert_eq!(unpack_group(&[19], 12), Err(EncodingError::InvalidN(12)));
        assert_eq!(unpack_group(&[200], 9), Err(EncodingError::InvalidN(9)));
        assert_eq!(unpack_group(&[12], 0), Err(EncodingError::InvalidN(0)));
        assert_eq!(pack(&[1], 0), Err(EncodingError::InvalidN(0)));
    }

    #[test]
    fn test_invalid_symbol() {
        assert_eq!(
            unpack_group(&[64, 0], 6),
            Err(EncodingError::InvalidNTet { symbol: 64, n: 6 })
        );
        assert_eq!(
            unpack(&[2], 1),
            Err(EncodingError::InvalidNTet { symbol: 2, n: 1 })
        );
    }

    #[test]
    fn test_group_size() {
        assert_eq!(
            pack_group(&[1, 2, 3, 4], 6),
            Err(EncodingError::InvalidGroupSize { size: 4, max: 3 })
        );
        assert_eq!(
            unpack_group(&[0; 9], 5),
            Err(EncodingError::InvalidGroupSize { size: 9, max: 8 })
        );
    }

    #[test]
    fn test_empty() {
        for n in MIN_BITS..=MAX_BITS {
            assert!(pack(&[], n).unwrap().is_empty());
            assert!(unpack(&[], n).unwrap().is_empty());
        }
    }

    #[test]
    fn test_roundtrip_every_width() {
        let input: Vec<u8> = (0..=255u8).rev().collect();
        for n in MIN_BITS..=MAX_BITS {
            let (group, _) = group_sizes(n).unwrap();
            for len in 0..=group {
                let symbols = pack(&input[..len], n).unwrap();
                assert_eq!(symbols.len(), (len * 8).div_ceil(n as usize));
                assert_eq!(unpack(&symbols, n).unwrap(), &input[..len]);
            }
            let symbols = pack(&input, n).unwrap();
            assert_eq!(unpack(&symbols, n).unwrap(), input);
        }
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(8, 6), 24);
        assert_eq!(lcm(8, 5), 40);
        assert_eq!(lcm(8, 3), 24);
        assert_eq!(lcm(8, 4), 8);
        assert_eq!(gcd(8, 6), 2);
    }
}
