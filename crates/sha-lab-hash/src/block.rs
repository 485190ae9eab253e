//! Iteration over the 64-byte blocks of a padded message.

#![forbid(unsafe_code)]

use crate::consts::BLOCK_LEN;
use sha_lab_core::{Error, Result};
use std::iter::FusedIterator;

/// One 512-bit block.
pub type Block = [u8; BLOCK_LEN];

/// Lazy iterator over consecutive blocks.
///
/// Cloning yields an independent iterator from the current position, so a
/// clone taken before iteration restarts from the first block.
#[derive(Clone, Debug)]
pub struct Blocks<'a> {
    remaining: &'a [u8],
}

impl<'a> Blocks<'a> {
    /// Iterate over `bytes`, which must be a multiple of [`BLOCK_LEN`] long.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() % BLOCK_LEN != 0 {
            return Err(Error::UnalignedBlocks { len: bytes.len() });
        }
        Ok(Self::aligned(bytes))
    }

    /// Caller guarantees alignment (padded messages).
    pub(crate) fn aligned(bytes: &'a [u8]) -> Self {
        debug_assert_eq!(bytes.len() % BLOCK_LEN, 0);
        Self { remaining: bytes }
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        let (block, rest) = self.remaining.split_first_chunk::<BLOCK_LEN>()?;
        self.remaining = rest;
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.len() / BLOCK_LEN;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Blocks<'_> {}

impl FusedIterator for Blocks<'_> {}
