//! Bit packing for code tables and payloads.
//!
//! Bits go eight to a byte, first bit in the most significant position. A
//! final group shorter than eight bits is written as the number it spells,
//! so it lands in the low bits of the last byte with zeros above it. The
//! bit count travels next to the bytes and tells [`unpack`] how many bits
//! of the last byte are real.

use crate::code::Bits;
use crate::error::{Error, Result};
use bitvec::prelude::*;

/// Number of bytes [`pack`] produces for `bit_count` bits.
pub fn packed_len(bit_count: usize) -> usize {
    (bit_count + 7) / 8
}

pub fn pack(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .by_vals()
                .fold(0u8, |acc, bit| (acc << 1) | bit as u8)
        })
        .collect()
}

/// Recovers exactly `bit_count` bits from `bytes`.
///
/// Bytes past `packed_len(bit_count)` are not read. Fewer bytes than that
/// is a [`Error::TruncatedStream`].
pub fn unpack(bytes: &[u8], bit_count: usize) -> Result<Bits> {
    let needed = packed_len(bit_count);
    if bytes.len() < needed {
        return Err(Error::TruncatedStream(format!(
            "{bit_count} bits need {needed} bytes, only {} available",
            bytes.len()
        )));
    }

    let tail = bit_count % 8;
    let mut bits = Bits::with_capacity(bit_count);
    for (i, byte) in bytes[..needed].iter().enumerate() {
        let view = byte.view_bits::<Msb0>();
        if tail != 0 && i + 1 == needed {
            bits.extend_from_bitslice(&view[8 - tail..]);
        } else {
            bits.extend_from_bitslice(view);
        }
    }

    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Bits {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn pack_full_bytes() {
        assert_eq!(pack(&bits("1000000100000011")), vec![0x81, 0x03]);
    }

    #[test]
    fn pack_partial_last_byte_is_right_aligned() {
        assert_eq!(pack(&bits("11111111101")), vec![0xff, 0b101]);
    }

    #[test]
    fn pack_empty() {
        assert!(pack(&Bits::new()).is_empty());
        assert!(unpack(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn unpack_partial_last_byte() {
        assert_eq!(unpack(&[0xff, 0b101], 11).unwrap(), bits("11111111101"));
    }

    #[test]
    fn unpack_ignores_excess_bytes() {
        assert_eq!(unpack(&[0x80, 0xaa], 8).unwrap(), bits("10000000"));
    }

    #[test]
    fn unpack_short_buffer_is_truncated() {
        assert!(matches!(
            unpack(&[0xff], 9),
            Err(Error::TruncatedStream(_))
        ));
    }

    #[test]
    fn bit_accounting_every_length() {
        // simple LCG so the patterns vary with length
        let mut state = 0x2545_f491u32;
        for len in 0..=70 {
            let b: Bits = (0..len)
                .map(|_| {
                    state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                    state & 0x8000 != 0
                })
                .collect();

            let packed = pack(&b);
            assert_eq!(packed.len(), packed_len(len));
            assert_eq!(unpack(&packed, len).unwrap(), b);
        }
    }
}
