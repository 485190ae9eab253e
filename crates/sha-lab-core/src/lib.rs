//! Core types shared across sha-lab crates.

#![forbid(unsafe_code)]

mod digest;
mod error;
pub mod input;

pub use digest::{Digest, DIGEST_LEN};
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
