//! Error types for ls-stats.

use std::path::PathBuf;

use ls_store::StoreError;
use thiserror::Error;

use crate::AccumulatorMode;

/// Errors raised while filling or serialising a [`StatsAccumulator`](crate::StatsAccumulator).
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("operation needs a {expected:?} accumulator, this one is {actual:?}")]
    ModeMismatch {
        expected: AccumulatorMode,
        actual:   AccumulatorMode,
    },

    #[error("got {got} link values, accumulator holds {expected} links")]
    LinkCountMismatch { expected: usize, got: usize },

    #[error("mean/sd export needs at least one run")]
    NoRuns,

    #[error(
        "negative variance: ({commodity}) link {link}: {variance}\n\tmean: {mean}\n\tsum(x): {sum}\n\tsum(x^2): {sum_sq}"
    )]
    NegativeVariance {
        commodity: String,
        link:      usize,
        variance:  f64,
        mean:      f64,
        sum:       f64,
        sum_sq:    f64,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, StatsError>`.
pub type StatsResult<T> = Result<T, StatsError>;
