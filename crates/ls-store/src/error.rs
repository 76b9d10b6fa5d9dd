//! Error types for ls-store.

use std::path::PathBuf;

use thiserror::Error;

use crate::Layout;

/// Errors that can occur while creating, writing, or reading simulation files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("{0} already exists")]
    FileAlreadyExists(PathBuf),

    #[error("slot index must be non-negative, got {0}")]
    NegativeSlot(i64),

    #[error("link id must be non-negative, got {0}")]
    NegativeLinkId(i64),

    #[error("slot {slot} is outside a file of {n_simulations} simulations")]
    SlotOutOfRange { slot: i64, n_simulations: usize },

    #[error("link {link} is outside a file of {n_links} links")]
    LinkOutOfRange { link: i64, n_links: usize },

    #[error("row of {got} values does not fit a file of {expected} links")]
    RowLengthMismatch { expected: usize, got: usize },

    #[error("row {index} of {row_len} values lies beyond the addressable file size")]
    OffsetOverflow { index: i64, row_len: usize },

    #[error("{path}: expected {expected} bytes for the given shape, file has {actual}")]
    ShapeMismatch {
        path:     PathBuf,
        expected: u64,
        actual:   u64,
    },

    #[error("{path}: wrote {written} of {expected} bytes at offset {offset}")]
    ShortWrite {
        path:     PathBuf,
        offset:   u64,
        expected: usize,
        written:  usize,
    },

    #[error("{path}: read {read} of {expected} bytes at offset {offset}")]
    ShortRead {
        path:     PathBuf,
        offset:   u64,
        expected: usize,
        read:     usize,
    },

    #[error("operation needs a {expected:?} file, handle is {actual:?}")]
    WrongLayout { expected: Layout, actual: Layout },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
