//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors produced by `ls-core`: input-shape and configuration problems that
/// are detected before any routing work starts.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{what} length {got} does not match trip count {expected}")]
    LengthMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ls-core`.
pub type CoreResult<T> = Result<T, CoreError>;
