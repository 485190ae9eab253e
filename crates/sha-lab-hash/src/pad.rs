//! Message padding according to FIPS 180-4 Section 5.1.1.
//!
//! The encoded length is the message bit length modulo 2^64. Messages of
//! 2^61 bytes or more wrap silently; FIPS 180-4 leaves such inputs undefined
//! and this module does not try to reject them.

#![forbid(unsafe_code)]

use crate::block::Blocks;
use crate::consts::{BLOCK_LEN, LENGTH_OFFSET};

/// A padded message. Its length is always a non-zero multiple of [`BLOCK_LEN`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaddedMessage {
    bytes: Vec<u8>,
}

impl PaddedMessage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of 64-byte blocks.
    pub fn block_count(&self) -> usize {
        self.bytes.len() / BLOCK_LEN
    }

    /// Fresh iterator over the blocks. May be called any number of times.
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks::aligned(&self.bytes)
    }
}

/// Pad a complete message.
pub fn pad(data: &[u8]) -> PaddedMessage {
    pad_with_length(data, data.len() as u64)
}

/// Pad `tail` as the end of a message that is `total_len` bytes long overall.
///
/// Streaming hashers keep only the unprocessed tail of the message; the
/// length field must still describe the whole message. `tail.len()` and
/// `total_len` must agree modulo 64.
pub fn pad_with_length(tail: &[u8], total_len: u64) -> PaddedMessage {
    let bit_len = total_len.wrapping_mul(8);
    let padded_len = padded_len(tail.len());

    let mut bytes = Vec::with_capacity(padded_len);
    bytes.extend_from_slice(tail);

    // Append bit '1' (0x80 byte)
    bytes.push(0x80);

    // Append zeros until length ≡ 448 (mod 512), i.e., 56 bytes (mod 64)
    bytes.resize(bytes.len() + zero_fill_len(tail.len()), 0x00);

    // Append 64-bit big-endian length
    bytes.extend_from_slice(&bit_len.to_be_bytes());

    debug_assert_eq!(bytes.len() % BLOCK_LEN, 0);
    PaddedMessage { bytes }
}

/// Total padded length for a message of `len` bytes.
pub fn padded_len(len: usize) -> usize {
    // Room for the 0x80 marker plus the 8-byte length
    let min = len + 9;
    min.div_ceil(BLOCK_LEN) * BLOCK_LEN
}

/// Number of zero bytes between the 0x80 marker and the length field.
pub fn zero_fill_len(len: usize) -> usize {
    (LENGTH_OFFSET + BLOCK_LEN - (len + 1) % BLOCK_LEN) % BLOCK_LEN
}
