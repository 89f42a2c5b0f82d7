//! VLSB bitmap to packed transmission format
//!
//! The controllers receive pixels in tiles of 2 columns by 24 rows. Each tile
//! takes three VLSB bytes from each of its two columns and sends them as six
//! bytes, one per 4-row group, with the two columns' bits interleaved:
//!
//! ```text
//! bit:     7    6    5    4    3    2    1    0
//! pixel:  a0   b0   a1   b1   a2   b2   a3   b3
//! ```
//!
//! where `a` is the left column, `b` the right column and the digit the row
//! within the 4-row group. Tiles are sent column pair by column pair, and
//! within a column pair from the top band group down.

use crate::config::{Dimensions, TILE_COLUMNS};
use crate::error::BuilderError;

/// Low nibble spread onto the odd bit positions: bit n -> bit 7 - 2n
const SPREAD: [u8; 16] = spread_table();

const fn spread_table() -> [u8; 16] {
    let mut table = [0u8; 16];
    let mut nibble = 0;
    while nibble < 16 {
        let mut spread = 0u8;
        let mut bit = 0;
        while bit < 4 {
            if nibble & (1 << bit) != 0 {
                spread |= 1 << (7 - 2 * bit);
            }
            bit += 1;
        }
        table[nibble] = spread;
        nibble += 1;
    }
    table
}

/// Interleave the low nibbles of two column bytes
///
/// Bit n of `left` lands on bit `7 - 2n`, bit n of `right` on bit `6 - 2n`.
#[inline]
pub fn interleave(left: u8, right: u8) -> u8 {
    SPREAD[(left & 0x0F) as usize] | (SPREAD[(right & 0x0F) as usize] >> 1)
}

/// Repack a VLSB bitmap into the controller's transmission format
///
/// `bitmap` must hold at least `dimensions.bitmap_size()` bytes and `packed`
/// at least `dimensions.packed_size()` bytes; bytes beyond those are left
/// untouched. Every packed byte in range is overwritten.
///
/// Band groups of a column pair are consecutive, so walking the bands of a
/// pair top to bottom visits the tiles in transmission order.
///
/// # Errors
///
/// Returns `BuilderError::BufferTooSmall` if either buffer is shorter than
/// required. Nothing is written in that case.
pub fn convert(
    bitmap: &[u8],
    dimensions: &Dimensions,
    packed: &mut [u8],
) -> Result<(), BuilderError> {
    for (required, provided) in [
        (dimensions.bitmap_size(), bitmap.len()),
        (dimensions.packed_size(), packed.len()),
    ] {
        if provided < required {
            return Err(BuilderError::BufferTooSmall { required, provided });
        }
    }

    let width = dimensions.width as usize;
    let bands = dimensions.bands();
    let sources = (0..width)
        .step_by(TILE_COLUMNS as usize)
        .flat_map(|column| (0..bands).map(move |band| band * width + column));
    let pairs = packed[..dimensions.packed_size()].chunks_exact_mut(2);

    for (pair, index) in pairs.zip(sources) {
        let (left, right) = (bitmap[index], bitmap[index + 1]);
        pair[0] = interleave(left, right);
        pair[1] = interleave(left >> 4, right >> 4);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Bit-by-bit reference of the interleave
    fn interleave_reference(b1: u8, b2: u8) -> u8 {
        let mut mix = 0u8;
        mix |= (b1 & 0x01) << 7;
        mix |= (b2 & 0x01) << 6;
        mix |= (b1 & 0x02) << 4;
        mix |= (b2 & 0x02) << 3;
        mix |= (b1 & 0x04) << 1;
        mix |= b2 & 0x04;
        mix |= (b1 & 0x08) >> 2;
        mix |= (b2 & 0x08) >> 3;
        mix
    }

    #[test]
    fn test_interleave_bit_positions() {
        assert_eq!(interleave(0b0000_0001, 0b0000_0000), 0b1000_0000);
        assert_eq!(interleave(0b0001_0000 >> 4, 0b0000_0000), 0b1000_0000);
        assert_eq!(interleave(0b0000_0000, 0b0000_0001), 0b0100_0000);
        assert_eq!(interleave(0b0000_1000, 0b0000_0000), 0b0000_0010);
        assert_eq!(interleave(0b0000_0000, 0b0000_1000), 0b0000_0001);
        assert_eq!(interleave(0x0F, 0x0F), 0xFF);
        assert_eq!(interleave(0xF0, 0xF0), 0x00);
    }

    #[test]
    fn test_interleave_matches_reference_for_all_inputs() {
        for b1 in 0..=255u8 {
            for b2 in 0..=255u8 {
                assert_eq!(interleave(b1, b2), interleave_reference(b1, b2));
            }
        }
    }

    #[test]
    fn test_first_tile_low_and_high_bytes() {
        let dims = Dimensions::new(2, 24).unwrap();
        let mut bitmap = [0u8; 6];
        let mut packed = [0u8; 6];

        // top band: column 0 row 0 and column 0 row 4
        bitmap[0] = 0b0001_0001;
        convert(&bitmap, &dims, &mut packed).unwrap();
        assert_eq!(packed, [0x80, 0x80, 0, 0, 0, 0]);

        // third band, right column, row 23
        bitmap = [0, 0, 0, 0, 0, 0b1000_0000];
        convert(&bitmap, &dims, &mut packed).unwrap();
        assert_eq!(packed, [0, 0, 0, 0, 0, 0b0000_0001]);
    }

    #[test]
    fn test_tile_order_is_column_pair_major() {
        // 4 columns x 48 rows: two column pairs, two band groups
        let dims = Dimensions::new(4, 48).unwrap();
        let mut bitmap = vec![0u8; dims.bitmap_size()];
        // band 3 (second group), column 2 (second pair) -> pair 1, group 1, band 0
        bitmap[3 * 4 + 2] = 0x01;
        let mut packed = vec![0u8; dims.packed_size()];
        convert(&bitmap, &dims, &mut packed).unwrap();

        // pair 1, group 1
        let index = 3 * 6;
        for (i, byte) in packed.iter().enumerate() {
            if i == index {
                assert_eq!(*byte, 0x80);
            } else {
                assert_eq!(*byte, 0, "byte {i}");
            }
        }
    }

    #[test]
    fn test_convert_matches_reference_loop() {
        let dims = Dimensions::new(250, 120).unwrap();
        let bitmap: alloc::vec::Vec<u8> = (0..dims.bitmap_size())
            .map(|i| (i as u32).wrapping_mul(2_654_435_761).rotate_left(7) as u8)
            .collect();
        let mut packed = vec![0u8; dims.packed_size()];
        convert(&bitmap, &dims, &mut packed).unwrap();

        let mut expected = vec![0u8; dims.packed_size()];
        let mut k = 0;
        for i in (0..250).step_by(2) {
            for j in (0..15).step_by(3) {
                for y in 0..3 {
                    let b1 = bitmap[(j + y) * 250 + i];
                    let b2 = bitmap[(j + y) * 250 + i + 1];
                    expected[k] = interleave_reference(b1, b2);
                    expected[k + 1] = interleave_reference(b1 >> 4, b2 >> 4);
                    k += 2;
                }
            }
        }
        assert_eq!(k, 125 * 10 * 3);
        assert_eq!(packed, expected);
    }

    #[test]
    fn test_convert_is_deterministic_and_overwrites() {
        let dims = Dimensions::new(384, 168).unwrap();
        let bitmap: alloc::vec::Vec<u8> = (0..dims.bitmap_size()).map(|i| (i % 251) as u8).collect();

        let mut first = vec![0xAAu8; dims.packed_size()];
        let mut second = vec![0x55u8; dims.packed_size()];
        convert(&bitmap, &dims, &mut first).unwrap();
        convert(&bitmap, &dims, &mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 192 * 14 * 3);
    }

    #[test]
    fn test_convert_leaves_trailing_bytes() {
        let dims = Dimensions::new(2, 24).unwrap();
        let bitmap = [0xFFu8; 6];
        let mut packed = [0x5Au8; 8];
        convert(&bitmap, &dims, &mut packed).unwrap();
        assert_eq!(packed, [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x5A, 0x5A]);
    }

    #[test]
    fn test_convert_rejects_short_buffers() {
        let dims = Dimensions::new(4, 48).unwrap();
        let mut packed = [0x5Au8; 24];

        assert_eq!(
            convert(&[0u8; 23], &dims, &mut packed),
            Err(BuilderError::BufferTooSmall {
                required: 24,
                provided: 23
            })
        );
        assert_eq!(
            convert(&[0u8; 24], &dims, &mut packed[..20]),
            Err(BuilderError::BufferTooSmall {
                required: 24,
                provided: 20
            })
        );
        assert!(packed.iter().all(|&b| b == 0x5A));
    }
}
