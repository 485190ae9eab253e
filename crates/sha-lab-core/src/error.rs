use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("hasher already finalized: call reset() before feeding more data")]
    AlreadyFinalized,

    #[error("padded message length {len} is not a multiple of 64 bytes")]
    UnalignedBlocks { len: usize },

    #[error("invalid digest: {0}")]
    InvalidDigest(String),
}
