//! Multi-core tooling built on the single-message hash.
//!
//! Every message owns its own hash state, so independent messages are
//! spread across cores with rayon. A single message is never split.

#![forbid(unsafe_code)]

pub mod avalanche;
pub mod bench;
mod error;
pub mod parallel;
pub mod selftest;

pub use avalanche::{avalanche, AvalancheStats};
pub use error::BatchError;
pub use parallel::{hash_batch, hash_batch_with, BatchConfig};
pub use selftest::{run_selftest, SelfTestConfig, SelfTestReport};
