//! Hash functions for the membership filter
//!
//! One MurmurHash3 function parameterised by seed `i` stands in for
//! `k` independent hash functions.

use std::io::Cursor;

/// Hash an item with MurmurHash3 (x64, 128-bit) under `seed`, keeping the low 64 bits
pub fn seeded_hash(item: &[u8], seed: u32) -> u64 {
    let mut cursor = Cursor::new(item);

    // Reading from an in-memory cursor cannot fail.
    let hash = murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0);
    hash as u64
}

/// Position of hash function `i` for `item` in a filter of `m` bits
#[inline]
pub fn hash_position(item: &[u8], seed: u32, m: usize) -> usize {
    (seeded_hash(item, seed) % m as u64) as usize
}

/// Compute the `k` bit positions for an item, one per seed in `0..k`
pub fn compute_hash_positions(item: &[u8], k: usize, m: usize) -> Vec<usize> {
    (0..k as u32).map(|seed| hash_position(item, seed, m)).collect()
}
