//! Seeded FNV-1a style hash family

/// FNV-1a 32-bit basis, substituted when the seed is zero.
pub const FNV_BASIS: u32 = 0x01000193;

/// Hash `key` with the family member selected by `seed`.
///
/// A `seed` of zero selects the default basis, so `fnv_hash(0, key)` is the
/// base hash every key is bucketed by. Non-zero seeds produce different
/// placements of the same keys, which is what the displacement search
/// exploits.
///
/// The per-byte step is multiply-then-xor (`state * basis ^ byte`), all
/// wrapping 32-bit arithmetic.
pub fn fnv_hash(seed: u32, key: &[u8]) -> u32 {
    let mut state = if seed == 0 { FNV_BASIS } else { seed };
    for &byte in key {
        state = state.wrapping_mul(FNV_BASIS) ^ u32::from(byte);
    }
    state
}
