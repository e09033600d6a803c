//! Seeded spatial hash for the effects that need pseudo-random patterns.
//!
//! Values depend only on the seed and integer coordinates (block, band, or
//! row index), never on a global RNG or the clock, so the same input always
//! yields the same pattern.

/// SplitMix64 finalizer.
#[inline(always)]
pub fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Hash a seed and a 2D integer coordinate.
#[inline(always)]
pub fn spatial_hash(seed: u64, a: u64, b: u64) -> u64 {
    mix64(mix64(seed ^ mix64(a)).wrapping_add(b))
}

/// Map a hash to `[0, 1)` using its top 24 bits.
#[inline(always)]
pub fn unit_f32(hash: u64) -> f32 {
    (hash >> 40) as f32 / (1u64 << 24) as f32
}

/// Map a hash to `[-1, 1)`.
#[inline(always)]
pub fn signed_unit_f32(hash: u64) -> f32 {
    unit_f32(hash) * 2.0 - 1.0
}

/// First three bytes of a hash as an RGB triple.
#[inline(always)]
pub fn rgb_bytes(hash: u64) -> [u8; 3] {
    let b = hash.to_le_bytes();
    [b[0], b[1], b[2]]
}
