//! Parallel hashing of independent messages.

#![forbid(unsafe_code)]

use crate::error::BatchError;
use rayon::prelude::*;
use sha_lab_core::Digest;
use sha_lab_hash::digest;
use tracing::debug;

/// Batch hashing configuration.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Dedicated pool size; `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Batches smaller than this are hashed on the calling thread.
    pub min_parallel: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threads: None,
            min_parallel: 8,
        }
    }
}

/// Hash every message on the global rayon pool.
///
/// Results are in input order.
pub fn hash_batch<M: AsRef<[u8]> + Sync>(messages: &[M]) -> Vec<Digest> {
    messages.par_iter().map(|m| digest(m.as_ref())).collect()
}

/// Hash every message according to `cfg`.
pub fn hash_batch_with<M: AsRef<[u8]> + Sync>(
    messages: &[M],
    cfg: &BatchConfig,
) -> Result<Vec<Digest>, BatchError> {
    if cfg.threads == Some(0) {
        return Err(BatchError::ZeroThreads);
    }

    if messages.len() < cfg.min_parallel {
        debug!(count = messages.len(), "hashing batch sequentially");
        return Ok(messages.iter().map(|m| digest(m.as_ref())).collect());
    }

    match cfg.threads {
        Some(threads) => {
            debug!(count = messages.len(), threads, "hashing batch on dedicated pool");
            let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
            Ok(pool.install(|| hash_batch(messages)))
        }
        None => {
            debug!(count = messages.len(), "hashing batch on global pool");
            Ok(hash_batch(messages))
        }
    }
}
