//! SHA-256 implementation (FIPS 180-4).
//!
//! The hash runs as a strict pipeline per message:
//! [`pad`] → [`block`] iteration → [`schedule`] expansion →
//! [`compress`] rounds → [`accumulate`] into the running state.
//! [`Sha256`] wraps the same pipeline behind an incremental interface.

#![forbid(unsafe_code)]

pub mod accumulate;
pub mod block;
pub mod compress;
pub mod consts;
pub mod hasher;
pub mod pad;
pub mod schedule;

pub use hasher::{Phase, Sha256};
pub use sha_lab_core::{Digest, Error, Result, DIGEST_LEN};

use accumulate::process_block;
use consts::H0;

/// Compute the SHA-256 digest of `data`.
pub fn digest(data: &[u8]) -> Digest {
    let padded = pad::pad(data);
    let mut state = H0;

    for block in padded.blocks() {
        process_block(&mut state, block);
    }

    Digest::from_words(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        // FIPS 180-4 example: SHA-256("")
        assert_eq!(
            digest(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_abc() {
        // FIPS 180-4 example: SHA-256("abc")
        assert_eq!(
            digest(b"abc").to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_448_bits() {
        // FIPS 180-4 example: 448-bit message (56 bytes), padding spills into a second block
        let result = digest(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq");
        assert_eq!(
            result.to_hex(),
            "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
        );
    }

    #[test]
    fn test_896_bits() {
        // FIPS 180-4 example: 896-bit message (112 bytes)
        let result = digest(
            b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu",
        );
        assert_eq!(
            result.to_hex(),
            "cf5b16a778af8380036ce59e7b0492370b249b11e8f07a51afac45037afee9d1"
        );
    }

    #[test]
    fn test_hello_world() {
        assert_eq!(
            digest(b"hello world").to_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_quick_brown_fox() {
        assert_eq!(
            digest(b"The quick brown fox jumps over the lazy dog").to_hex(),
            "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592"
        );
        // One trailing byte changes everything
        assert_eq!(
            digest(b"The quick brown fox jumps over the lazy dog.").to_hex(),
            "ef537f25c895bfa782526529a9b63d97aa631564d5d789c2b765448c8635fb6c"
        );
    }

    #[test]
    fn test_padding_boundaries() {
        // 'a' repeated n times; 55/56/57 straddle the single-block padding limit
        let cases: &[(usize, &str)] = &[
            (1, "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb"),
            (55, "9f4390f8d30c2dd92ec9f095b65e2b9ae9b0a925a5258e241c9f1e910f734318"),
            (56, "b35439a4ac6f0948b6d6f9e3c6af0f5f590ce20f1bde7090ef7970686ec6738a"),
            (57, "f13b2d724659eb3bf47f2dd6af1accc87b81f09f59f2b75e5c0bed6589dfe8c6"),
            (63, "7d3e74a05d7db15bce4ad9ec0658ea98e3f06eeecf16b4c6fff2da457ddc2f34"),
            (64, "ffe054fe7ae0cb6dc65c3af9b61d5209f439851db43d0ba5997337df154668eb"),
            (65, "635361c48bb9eab14198e76ea8ab7f1a41685d6ad62aa9146d301d4f17eb0ae0"),
            (119, "31eba51c313a5c08226adf18d4a359cfdfd8d2e816b13f4af952f7ea6584dcfb"),
            (120, "2f3d335432c70b580af0e8e1b3674a7c020d683aa5f73aaaedfdc55af904c21c"),
            (128, "6836cf13bac400e9105071cd6af47084dfacad4e5e302c94bfed24e013afb73e"),
        ];

        for (len, expected) in cases {
            let data = vec![b'a'; *len];
            assert_eq!(digest(&data).to_hex(), *expected, "mismatch for len {}", len);
        }
    }

    #[test]
    fn test_one_million_a() {
        // FIPS 180-4 long message: 1,000,000 repetitions of 'a'
        let data = vec![b'a'; 1_000_000];
        assert_eq!(
            digest(&data).to_hex(),
            "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0"
        );
    }

    #[test]
    fn test_binary_inputs() {
        assert_eq!(
            digest(&[0u8; 64]).to_hex(),
            "f5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a92759fb4b"
        );
        let all_bytes: Vec<u8> = (0..=255u8).collect();
        assert_eq!(
            digest(&all_bytes).to_hex(),
            "40aff2e9d2d8922e47afd4648e6967497158785fbd1da870e7110266bf944880"
        );
    }

    #[test]
    fn test_deterministic_and_fixed_size() {
        for data in [&b""[..], &b"abc"[..], &[0xffu8; 200][..]] {
            let first = digest(data);
            let second = digest(data);
            assert_eq!(first, second);
            assert_eq!(first.as_bytes().len(), DIGEST_LEN);
            assert_eq!(first.to_hex().len(), 64);
        }
    }

    #[test]
    fn test_single_bit_flip_avalanche() {
        // Smoke test only: a one-bit change should disturb roughly half the output
        let zeros = [0u8; 64];
        let mut flipped = zeros;
        flipped[63] ^= 1;
        let distance = digest(&zeros).hamming_distance(&digest(&flipped));
        assert!((64..=192).contains(&distance), "distance {}", distance);

        let distance = digest(b"abc").hamming_distance(&digest(b"abb"));
        assert!((64..=192).contains(&distance), "distance {}", distance);
    }

    #[test]
    fn test_padding_edges_match_sha2() {
        use sha2::{Digest as _, Sha256 as RefSha256};

        // 55 is the longest single-block message, 56..=63 spill into a second block
        for len in [55usize, 56, 57, 63, 119, 120, 183] {
            let data: Vec<u8> = (0..len).map(|i| (i * 31) as u8).collect();
            let reference: [u8; 32] = RefSha256::digest(&data).into();
            assert_eq!(digest(&data).into_bytes(), reference, "len {}", len);
            assert_eq!(pad::pad(&data).block_count(), (len + 9).div_ceil(64), "len {}", len);
        }
    }
}
