//! Incremental SHA-256.

#![forbid(unsafe_code)]

use crate::accumulate::process_block;
use crate::consts::{State, BLOCK_LEN, H0};
use crate::pad::pad_with_length;
use sha_lab_core::{Digest, Error, Result};
use std::io;

/// Lifecycle of a streaming computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Fresh hasher, nothing fed yet
    Idle,
    /// At least one non-empty `update` accepted
    Absorbing,
    /// `finalize` returned the digest; further input is rejected until `reset`
    Finalized,
}

/// Streaming SHA-256 hasher.
///
/// Complete blocks are compressed as soon as they arrive; at most 63 bytes
/// are held back for the next `update` or for `finalize`.
#[derive(Clone, Debug)]
pub struct Sha256 {
    state: State,
    buffer: [u8; BLOCK_LEN],
    buffered: usize,
    total_len: u64,
    phase: Phase,
}

impl Default for Sha256 {
    fn default() -> Self {
        Self {
            state: H0,
            buffer: [0u8; BLOCK_LEN],
            buffered: 0,
            total_len: 0,
            phase: Phase::Idle,
        }
    }
}

impl Sha256 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Total bytes fed so far (wrapping at 2^64).
    pub fn len(&self) -> u64 {
        self.total_len
    }

    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// Feed more message bytes.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.phase == Phase::Finalized {
            return Err(Error::AlreadyFinalized);
        }
        if data.is_empty() {
            return Ok(());
        }
        self.phase = Phase::Absorbing;
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        let mut data = data;

        // Top up a partial block first
        if self.buffered > 0 {
            let take = (BLOCK_LEN - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_LEN {
                return Ok(());
            }
            let block = self.buffer;
            process_block(&mut self.state, &block);
            self.buffered = 0;
        }

        while let Some((block, rest)) = data.split_first_chunk::<BLOCK_LEN>() {
            process_block(&mut self.state, block);
            data = rest;
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();
        Ok(())
    }

    /// Pad the buffered tail, process the final block(s) and return the digest.
    ///
    /// The hasher then rejects `update` and `finalize` until [`Sha256::reset`].
    pub fn finalize(&mut self) -> Result<Digest> {
        if self.phase == Phase::Finalized {
            return Err(Error::AlreadyFinalized);
        }

        let padded = pad_with_length(&self.buffer[..self.buffered], self.total_len);
        for block in padded.blocks() {
            process_block(&mut self.state, block);
        }

        self.buffered = 0;
        self.phase = Phase::Finalized;
        Ok(Digest::from_words(self.state))
    }

    /// Return to the initial state, discarding any input.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl io::Write for Sha256 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
