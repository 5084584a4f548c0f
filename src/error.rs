//! Error types for the aggregation engine

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a run before the summary is written.
#[derive(Debug, Error)]
pub enum BrcError {
    #[error("could not open {}: {source}", path.display())]
    Open { path: PathBuf, source: std::io::Error },

    #[error("could not stat {}: {source}", path.display())]
    Stat { path: PathBuf, source: std::io::Error },

    #[error("could not map {}: {source}", path.display())]
    Map { path: PathBuf, source: std::io::Error },

    #[error("line at byte {offset} has no ';' separator")]
    MissingSeparator { offset: usize },

    #[error("key at byte {offset} is {len} bytes long, limit is {}", crate::config::MAX_KEY_LEN)]
    KeyTooLong { offset: usize, len: usize },

    #[error("malformed value on line at byte {offset}")]
    MalformedValue { offset: usize },

    #[error("more than {max_keys} distinct keys in input")]
    CapacityExceeded { max_keys: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("could not write summary: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BrcError>;
