//! Message schedule expansion: 16 block words → 64 schedule words.

#![forbid(unsafe_code)]

use crate::block::Block;
use crate::consts::ROUNDS;

/// The 64-word message schedule W[0..63] of one block.
pub type Schedule = [u32; ROUNDS];

/// σ0
#[inline(always)]
pub fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

/// σ1
#[inline(always)]
pub fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Expand one block into its message schedule.
pub fn expand(block: &Block) -> Schedule {
    let mut w = [0u32; ROUNDS];

    // First 16 words from block
    for (word, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    // Extend to 64 words
    for i in 16..ROUNDS {
        w[i] = w[i - 16]
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma1(w[i - 2]));
    }

    w
}
