//! Single-bit-flip avalanche statistics.
//!
//! A sanity check for obviously broken mixing, not a security argument.

#![forbid(unsafe_code)]

use rayon::prelude::*;
use sha_lab_core::DIGEST_LEN;
use sha_lab_hash::digest;

/// Output bits per digest.
pub const DIGEST_BITS: u32 = (DIGEST_LEN * 8) as u32;

/// Hamming distances between the digest of a message and the digests of
/// its single-bit-flipped variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvalancheStats {
    /// Number of flipped variants hashed.
    pub flips: usize,
    pub min: u32,
    pub max: u32,
    pub mean: f64,
}

impl AvalancheStats {
    /// Mean fraction of output bits changed (ideal: 0.5).
    pub fn mean_fraction(&self) -> f64 {
        self.mean / DIGEST_BITS as f64
    }
}

/// Flip each of the first `max_bits` bits of `message` (MSB first) in turn.
pub fn avalanche(message: &[u8], max_bits: usize) -> AvalancheStats {
    let flips = (message.len() * 8).min(max_bits);
    if flips == 0 {
        return AvalancheStats {
            flips: 0,
            min: 0,
            max: 0,
            mean: 0.0,
        };
    }

    let base = digest(message);
    let distances: Vec<u32> = (0..flips)
        .into_par_iter()
        .map(|bit| {
            let mut flipped = message.to_vec();
            flipped[bit / 8] ^= 0x80 >> (bit % 8);
            digest(&flipped).hamming_distance(&base)
        })
        .collect();

    let total: u64 = distances.iter().map(|&d| d as u64).sum();
    AvalancheStats {
        flips,
        min: distances.iter().copied().min().unwrap_or(0),
        max: distances.iter().copied().max().unwrap_or(0),
        mean: total as f64 / flips as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abc_all_bits() {
        let stats = avalanche(b"abc", usize::MAX);
        assert_eq!(stats.flips, 24);
        assert_eq!(stats.min, 112);
        assert_eq!(stats.max, 148);
        assert_eq!(stats.mean, 128.25);
    }

    #[test]
    fn test_zero_block() {
        let stats = avalanche(&[0u8; 64], usize::MAX);
        assert_eq!(stats.flips, 512);
        assert_eq!(stats.min, 106);
        assert_eq!(stats.max, 152);
        assert!((stats.mean_fraction() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_max_bits_limits_flips() {
        let stats = avalanche(b"hello world", 10);
        assert_eq!(stats.flips, 10);
        assert!(stats.min >= 64);
    }

    #[test]
    fn test_empty_message_has_no_flips() {
        let stats = avalanche(b"", 100);
        assert_eq!(stats.flips, 0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(avalanche(b"abc", 0).flips, 0);
    }
}
