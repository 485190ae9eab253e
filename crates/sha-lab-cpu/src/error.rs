use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("thread count must be at least 1")]
    ZeroThreads,

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
