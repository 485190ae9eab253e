//! Single-core throughput benchmark.
//!
//! Measures one-shot hashing and, optionally, streaming in fixed-size chunks
//! over a deterministic pseudo-random buffer.

#![forbid(unsafe_code)]

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha_lab_core::{Digest, Result};
use sha_lab_hash::{digest, Sha256};
use std::time::Instant;
use tracing::debug;

/// Benchmark configuration.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Size of the hashed buffer in bytes.
    pub message_len: usize,
    /// Number of timed iterations.
    pub iters: u32,
    /// Number of warmup iterations before timing.
    pub warmup: u32,
    /// Also time streaming updates of this many bytes (0 or `None` skips it).
    pub chunk_len: Option<usize>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            message_len: 1 << 20, // 1 MiB
            iters: 64,
            warmup: 4,
            chunk_len: None,
        }
    }
}

/// How the buffer was fed to the hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BenchMode {
    OneShot,
    Streaming { chunk_len: usize },
}

/// Timing for one mode.
#[derive(Clone, Debug)]
pub struct BenchStats {
    pub mode: BenchMode,
    /// Total time in nanoseconds across all timed iterations.
    pub total_ns: u64,
    /// Total bytes hashed across all timed iterations.
    pub bytes: u64,
    /// Digest of the buffer; keeps the work observable.
    pub digest: Digest,
}

impl BenchStats {
    pub fn mib_per_sec(&self) -> f64 {
        if self.total_ns == 0 {
            return 0.0;
        }
        let secs = self.total_ns as f64 / 1e9;
        self.bytes as f64 / (1024.0 * 1024.0) / secs
    }

    pub fn ns_per_byte(&self) -> f64 {
        if self.bytes == 0 {
            return 0.0;
        }
        self.total_ns as f64 / self.bytes as f64
    }
}

/// Run the benchmark. One-shot stats come first.
pub fn run_bench(cfg: &BenchConfig) -> Result<Vec<BenchStats>> {
    let mut buffer = vec![0u8; cfg.message_len];
    ChaCha8Rng::seed_from_u64(0xbe7c).fill_bytes(&mut buffer);

    let mut results = vec![time_mode(cfg, BenchMode::OneShot, || Ok(digest(&buffer)))?];

    if let Some(chunk_len) = cfg.chunk_len.filter(|&n| n > 0) {
        let stats = time_mode(cfg, BenchMode::Streaming { chunk_len }, || {
            let mut hasher = Sha256::new();
            for chunk in buffer.chunks(chunk_len) {
                hasher.update(chunk)?;
            }
            hasher.finalize()
        })?;
        results.push(stats);
    }

    Ok(results)
}

fn time_mode<F>(cfg: &BenchConfig, mode: BenchMode, mut run: F) -> Result<BenchStats>
where
    F: FnMut() -> Result<Digest>,
{
    debug!(?mode, warmup = cfg.warmup, "warming up");
    let mut last = run()?;
    for _ in 1..cfg.warmup {
        last = run()?;
    }

    debug!(?mode, iters = cfg.iters, "timing");
    let start = Instant::now();
    for _ in 0..cfg.iters {
        last = run()?;
    }
    let total_ns = start.elapsed().as_nanos() as u64;

    Ok(BenchStats {
        mode,
        total_ns,
        bytes: cfg.message_len as u64 * cfg.iters as u64,
        digest: last,
    })
}

/// Print results as a table.
pub fn print_bench_results(results: &[BenchStats], cfg: &BenchConfig) {
    println!(
        "\nSHA-256 throughput, message={} bytes, iters={}, warmup={}\n",
        cfg.message_len, cfg.iters, cfg.warmup
    );
    println!("{:<22} {:>12} {:>12} {:>10}", "Mode", "Total (ms)", "MiB/s", "ns/byte");

    for stats in results {
        let label = match stats.mode {
            BenchMode::OneShot => "one-shot".to_string(),
            BenchMode::Streaming { chunk_len } => format!("streaming ({} B)", chunk_len),
        };
        println!(
            "{:<22} {:>12.2} {:>12.1} {:>10.2}",
            label,
            stats.total_ns as f64 / 1e6,
            stats.mib_per_sec(),
            stats.ns_per_byte()
        );
    }

    if let Some(first) = results.first() {
        println!("\nDigest: {}", first.digest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_cfg(chunk_len: Option<usize>) -> BenchConfig {
        BenchConfig {
            message_len: 4096,
            iters: 3,
            warmup: 1,
            chunk_len,
        }
    }

    #[test]
    fn test_one_shot_only_by_default() {
        let results = run_bench(&small_cfg(None)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].mode, BenchMode::OneShot);
        assert_eq!(results[0].bytes, 4096 * 3);
    }

    #[test]
    fn test_streaming_mode_agrees_with_one_shot() {
        let results = run_bench(&small_cfg(Some(100))).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].mode, BenchMode::Streaming { chunk_len: 100 });
        assert_eq!(results[0].digest, results[1].digest);
    }

    #[test]
    fn test_zero_chunk_skips_streaming() {
        let results = run_bench(&small_cfg(Some(0))).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_rates_handle_zero() {
        let stats = BenchStats {
            mode: BenchMode::OneShot,
            total_ns: 0,
            bytes: 0,
            digest: digest(b""),
        };
        assert_eq!(stats.mib_per_sec(), 0.0);
        assert_eq!(stats.ns_per_byte(), 0.0);
    }
}
