//! Deterministic unit source.
//!
//! The piece order of a game is fixed by its seed through a linear
//! congruential generator; replaying a seed must give the same units.

const MODULUS: u64 = 1 << 31;
const MULTIPLIER: u64 = 1_103_515_245;
const INCREMENT: u64 = 12_345;

/// Produces `length` values from `seed`.
///
/// Each value is bits 16..31 of the state *before* it advances, so the first
/// value always comes from the untouched seed.
pub fn calc_random(seed: u32, length: usize) -> Vec<u32> {
    let mut state = u64::from(seed);
    (0..length)
        .map(|_| {
            let value = (state >> 16) & 0x7fff;
            state = (MULTIPLIER * state + INCREMENT) % MODULUS;
            value as u32
        })
        .collect()
}

/// Maps random values onto catalog indexes.
///
/// `catalog_length` must be non-zero.
pub fn calc_unit_indexes(randoms: &[u32], catalog_length: usize) -> Vec<usize> {
    randoms
        .iter()
        .map(|&random| random as usize % catalog_length)
        .collect()
}
