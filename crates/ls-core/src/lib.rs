//! `ls-core` — foundational types for the linkstats workspace.
//!
//! This crate is a dependency of every other `ls-*` crate.  It has no
//! `ls-*` dependencies and only `thiserror` (plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `NodeId`, `EdgeId`, `TripId`, `WorkerId`, `LinkId`        |
//! | [`config`]  | `EngineConfig`, `LinkWeighting`                           |
//! | [`trips`]   | `TripSet` — parallel trip sequences, length-checked       |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and `EngineConfig`.  |

pub mod config;
pub mod error;
pub mod ids;
pub mod trips;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DEFAULT_BATCH_SIZE, EngineConfig, LinkWeighting};
pub use error::{CoreError, CoreResult};
pub use ids::{EdgeId, LinkId, NodeId, TripId, WorkerId};
pub use trips::TripSet;
