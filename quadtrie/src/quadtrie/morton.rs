//! Z-order keys for points in the world square.
//!
//! Each axis is normalized into `[1, 2]` so every in-world value shares the
//! same f32 exponent, and the 23 mantissa bits then form an order-preserving
//! integer. The two axes are bit-dilated and interleaved, x in the even bits
//! and y in the odd bits, so the most significant bit pair of a key selects
//! the top-level quadrant.

use common::shapes::Point;

pub const MANTISSA_BITS: u32 = 23;
pub const MORTON_BITS: u32 = 2 * MANTISSA_BITS;
/// Trie levels available before a key is exhausted; each level consumes one bit pair.
pub const MAX_DEPTH: u32 = MANTISSA_BITS;

const MANTISSA_MASK: u32 = (1 << MANTISSA_BITS) - 1;
const ONE_BITS: u32 = 0x3F80_0000;
const KEY_SHIFT: u32 = u64::BITS - MORTON_BITS;

/// Spreads the bits of `bits` so bit `i` lands on bit `2 * i`.
#[inline(always)]
pub fn dilate(bits: u32) -> u64 {
    let mut n = bits as u64;
    n = (n | (n << 16)) & 0x0000_ffff_0000_ffff;
    n = (n | (n << 8)) & 0x00ff_00ff_00ff_00ff;
    n = (n | (n << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    n = (n | (n << 2)) & 0x3333_3333_3333_3333;
    n = (n | (n << 1)) & 0x5555_5555_5555_5555;
    n
}

/// Inverse of [`dilate`]; odd bits of the input are ignored.
#[inline(always)]
pub fn compact(dilated: u64) -> u32 {
    let mut n = dilated & 0x5555_5555_5555_5555;
    n = (n | (n >> 1)) & 0x3333_3333_3333_3333;
    n = (n | (n >> 2)) & 0x0f0f_0f0f_0f0f_0f0f;
    n = (n | (n >> 4)) & 0x00ff_00ff_00ff_00ff;
    n = (n | (n >> 8)) & 0x0000_ffff_0000_ffff;
    n = (n | (n >> 16)) & 0x0000_0000_ffff_ffff;
    n as u32
}

/// Maps one coordinate to its 23-bit mantissa rank. Values outside the world
/// are clamped to its edge first; `half_extent` must be finite and positive.
#[inline(always)]
pub fn quantize(coordinate: f32, half_extent: f32) -> u32 {
    let clamped = coordinate.clamp(-half_extent, half_extent);
    let normalized = 1.0 + (clamped + half_extent) / (2.0 * half_extent);
    // The far edge normalizes to exactly 2.0, which would roll the exponent.
    if normalized >= 2.0 {
        return MANTISSA_MASK;
    }
    normalized.to_bits() & MANTISSA_MASK
}

#[inline(always)]
pub fn encode(point: Point, half_extent: f32) -> u64 {
    dilate(quantize(point.x, half_extent)) | (dilate(quantize(point.y, half_extent)) << 1)
}

/// Lower corner of the smallest cell addressed by `code`.
pub fn decode(code: u64, half_extent: f32) -> Point {
    let unquantize = |bits: u32| {
        let normalized = f32::from_bits(ONE_BITS | (bits & MANTISSA_MASK));
        (normalized - 1.0) * 2.0 * half_extent - half_extent
    };
    Point::new(unquantize(compact(code)), unquantize(compact(code >> 1)))
}

/// Left-aligns a code so the trie can peel quadrants off the top.
#[inline(always)]
pub(crate) fn quadrant_key(code: u64) -> u64 {
    code << KEY_SHIFT
}

/// Quadrant selected by the top bit pair of a left-aligned key: bit 0 is the
/// x half, bit 1 the y half.
#[inline(always)]
pub(crate) fn quadrant(key: u64) -> usize {
    (key >> (u64::BITS - 2)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: f32 = 1024.0;

    #[test]
    fn dilate_spreads_bits() {
        assert_eq!(dilate(0), 0);
        assert_eq!(dilate(0b1011), 0b1000101);
        assert_eq!(dilate(u32::MAX), 0x5555_5555_5555_5555);
        assert_eq!(dilate(MANTISSA_MASK).count_ones(), MANTISSA_BITS);
    }

    #[test]
    fn compact_inverts_dilate() {
        for bits in [0u32, 1, 0b1011, 0x40_0000, MANTISSA_MASK, 0xdead_beef] {
            assert_eq!(compact(dilate(bits)), bits);
        }
    }

    #[test]
    fn quantize_covers_world_edges() {
        assert_eq!(quantize(-HALF, HALF), 0);
        assert_eq!(quantize(HALF, HALF), MANTISSA_MASK);
        assert_eq!(quantize(0.0, HALF), 1 << (MANTISSA_BITS - 1));
    }

    #[test]
    fn quantize_clamps_outside_world() {
        assert_eq!(quantize(-5000.0, HALF), 0);
        assert_eq!(quantize(5000.0, HALF), MANTISSA_MASK);
        assert_eq!(quantize(f32::NEG_INFINITY, HALF), 0);
        assert_eq!(quantize(f32::INFINITY, HALF), MANTISSA_MASK);
    }

    #[test]
    fn quantize_is_monotonic() {
        let mut prev = 0;
        let mut x = -HALF;
        while x <= HALF {
            let q = quantize(x, HALF);
            assert!(q >= prev, "quantize({}) = {} < {}", x, q, prev);
            prev = q;
            x += 0.37;
        }
    }

    #[test]
    fn encode_interleaves_x_low_y_high() {
        let code = encode(Point::new(0.0, 0.0), HALF);
        assert_eq!(code, 0b11 << (MORTON_BITS - 2));
        assert_eq!(quadrant(quadrant_key(code)), 3);

        let code = encode(Point::new(500.0, -500.0), HALF);
        assert_eq!(quadrant(quadrant_key(code)), 1);
        let code = encode(Point::new(-500.0, 500.0), HALF);
        assert_eq!(quadrant(quadrant_key(code)), 2);
        let code = encode(Point::new(-500.0, -500.0), HALF);
        assert_eq!(quadrant(quadrant_key(code)), 0);
    }

    #[test]
    fn encode_fits_in_morton_bits() {
        let code = encode(Point::new(HALF, HALF), HALF);
        assert_eq!(code, (1u64 << MORTON_BITS) - 1);
    }

    #[test]
    fn decode_lands_near_encoded_point() {
        let cell = 2.0 * HALF / (1u32 << MANTISSA_BITS) as f32;
        for p in [
            Point::new(0.0, 0.0),
            Point::new(500.0, 500.0),
            Point::new(-999.0, -999.0),
            Point::new(123.25, -876.5),
        ] {
            let back = decode(encode(p, HALF), HALF);
            assert!((back.x - p.x).abs() <= 2.0 * cell, "{:?} -> {:?}", p, back);
            assert!((back.y - p.y).abs() <= 2.0 * cell, "{:?} -> {:?}", p, back);
        }
    }

    #[test]
    fn shared_prefix_means_shared_cell() {
        let a = encode(Point::new(100.0, 100.0), HALF);
        let b = encode(Point::new(100.5, 100.5), HALF);
        let c = encode(Point::new(-100.0, 100.0), HALF);
        let prefix_ab = (a ^ b).leading_zeros();
        let prefix_ac = (a ^ c).leading_zeros();
        assert!(prefix_ab > prefix_ac);
    }
}
