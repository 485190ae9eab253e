//! Randomized cross-check against an independent SHA-256.
//!
//! Each case derives its message from `(seed, case)` alone, so any failing
//! case can be replayed on its own.

#![forbid(unsafe_code)]

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use sha_lab_core::{Digest, Error};
use sha_lab_hash::{digest, Sha256};
use tracing::{debug, warn};

/// Lengths where padding changes shape.
pub const BOUNDARY_LENGTHS: [usize; 11] = [0, 1, 55, 56, 57, 63, 64, 65, 119, 120, 128];

/// Self-test configuration.
#[derive(Debug, Clone)]
pub struct SelfTestConfig {
    /// Number of random messages to check.
    pub cases: u64,
    /// Upper bound for random (non-boundary) message lengths.
    pub max_len: usize,
    /// Seed for the per-case ChaCha streams.
    pub seed: u64,
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        Self {
            cases: 10_000,
            max_len: 4096,
            seed: 0,
        }
    }
}

/// Which comparison failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    /// Streaming over random chunks vs. one-shot
    Streaming,
    /// One-shot vs. the reference implementation
    Reference,
}

/// A single failed comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub case: u64,
    pub len: usize,
    pub check: Check,
    pub expected: Digest,
    pub got: Result<Digest, Error>,
}

/// Outcome of a self-test run.
#[derive(Clone, Debug, Default)]
pub struct SelfTestReport {
    pub cases_checked: u64,
    pub bytes_hashed: u64,
    /// Sorted by case number.
    pub mismatches: Vec<Mismatch>,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Run `cfg.cases` checks in parallel.
///
/// `reference` is an independent SHA-256; `on_case` is called once per
/// finished case (progress reporting).
pub fn run_selftest<R, P>(cfg: &SelfTestConfig, reference: R, on_case: P) -> SelfTestReport
where
    R: Fn(&[u8]) -> [u8; 32] + Sync,
    P: Fn() + Sync,
{
    debug!(cases = cfg.cases, max_len = cfg.max_len, seed = cfg.seed, "starting self-test");

    let (bytes_hashed, mut mismatches) = (0..cfg.cases)
        .into_par_iter()
        .map(|case| {
            let result = check_case(cfg, case, &reference);
            on_case();
            result
        })
        .reduce(
            || (0u64, Vec::new()),
            |(bytes_a, mut found_a), (bytes_b, found_b)| {
                found_a.extend(found_b);
                (bytes_a + bytes_b, found_a)
            },
        );

    mismatches.sort_by_key(|m| m.case);

    SelfTestReport {
        cases_checked: cfg.cases,
        bytes_hashed,
        mismatches,
    }
}

/// The message checked by `case`.
pub fn case_message(seed: u64, case: u64, max_len: usize) -> Vec<u8> {
    let mut rng = case_rng(seed, case);
    message_from(&mut rng, max_len)
}

fn case_rng(seed: u64, case: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(case);
    rng
}

fn message_from(rng: &mut ChaCha8Rng, max_len: usize) -> Vec<u8> {
    let len = if rng.gen_ratio(1, 4) {
        BOUNDARY_LENGTHS[rng.gen_range(0..BOUNDARY_LENGTHS.len())]
    } else {
        rng.gen_range(0..=max_len)
    };

    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

fn check_case<R>(cfg: &SelfTestConfig, case: u64, reference: &R) -> (u64, Vec<Mismatch>)
where
    R: Fn(&[u8]) -> [u8; 32],
{
    let mut rng = case_rng(cfg.seed, case);
    let data = message_from(&mut rng, cfg.max_len);
    let mut mismatches = Vec::new();

    let one_shot = digest(&data);
    let expected = Digest::from(reference(&data));

    if one_shot != expected {
        warn!(case, len = data.len(), "one-shot digest differs from reference");
        mismatches.push(Mismatch {
            case,
            len: data.len(),
            check: Check::Reference,
            expected,
            got: Ok(one_shot),
        });
    }

    let streamed = digest_in_random_chunks(&data, &mut rng);
    if streamed.as_ref() != Ok(&one_shot) {
        warn!(case, len = data.len(), "streaming digest differs from one-shot");
        mismatches.push(Mismatch {
            case,
            len: data.len(),
            check: Check::Streaming,
            expected: one_shot,
            got: streamed,
        });
    }

    (data.len() as u64, mismatches)
}

fn digest_in_random_chunks(data: &[u8], rng: &mut ChaCha8Rng) -> Result<Digest, Error> {
    let mut hasher = Sha256::new();
    let mut rest = data;

    while !rest.is_empty() {
        let take = rng.gen_range(1..=rest.len().min(3 * 64));
        let (chunk, tail) = rest.split_at(take);
        hasher.update(chunk)?;
        rest = tail;
    }

    hasher.finalize()
}
