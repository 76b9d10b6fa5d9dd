//! `ls-store` — the simulation statistics store.
//!
//! One file per commodity, `<dir>/<commodity>.dat`, holding an
//! `n_simulations × n_links` matrix of native-endian `f32` with no header.
//! Freshly written files are **simulation-major** (one row per simulation,
//! i.e. per job); [`transpose`] rewrites them **link-major** so that
//! [`extract_rows`] can pull all simulations of one link with a single read.
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`shape`]     | `SimulationShape`, `SlotRef`, `Layout`                    |
//! | [`store`]     | `SimulationStore` — preallocate / write / accumulate slot |
//! | [`matrix`]    | `transpose`, `extract_rows`, `SimulationFile`             |
//! | [`error`]     | `StoreError`, `StoreResult<T>`                            |
//!
//! # Concurrency
//!
//! Every slot is a fixed, disjoint byte range and all slot I/O is positional
//! (no shared cursor).  Independent processes may therefore write
//! **different** slots of the same file at the same time without locking.
//! Two writers on the **same** slot are not coordinated in any way; in
//! particular [`SimulationStore::accumulate_slot`] is a read-modify-write and
//! loses updates under contention.  Give every run its own slot or serialise
//! access externally.
//!
//! # Orientation
//!
//! The file does not record whether it is simulation-major or link-major.
//! Callers track it, either by hand or with a [`SimulationFile`] handle.

pub mod error;
pub mod matrix;
pub mod shape;
pub mod store;

mod raw;


pub use error::{StoreError, StoreResult};
pub use matrix::{SimulationFile, extract_rows, transpose};
pub use shape::{FLOAT_BYTES, Layout, SimulationShape, SlotRef};
pub use store::{SimulationStore, commodity_file_name};
