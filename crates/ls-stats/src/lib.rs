//! `ls-stats` — per-link statistics for one process's session.
//!
//! A [`StatsAccumulator`] is created with a fixed link count and a mode:
//!
//! | Mode                          | Entry             | Serialised as                     |
//! |-------------------------------|-------------------|-----------------------------------|
//! | [`AccumulatorMode::SingleValue`] | `f32` per link | one slot of `<commodity>.dat`     |
//! | [`AccumulatorMode::Moments`]  | `(Σx, Σx²)` per link | `<commodity>_<job>.csv` (legacy) |
//!
//! Commodities are added lazily on first access.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ls_stats::{AccumulatorMode, StatsAccumulator};
//! use ls_store::SimulationStore;
//!
//! let mut stats = StatsAccumulator::new(n_links, AccumulatorMode::SingleValue);
//! ctx.route_stats(0, &sources, &targets, &tonnes, "grain", &mut stats)?;
//! stats.write_slot(&SimulationStore::open(out_dir)?, n_jobs, job_id)?;
//! ```

pub mod accumulator;
pub mod error;
pub mod export;
pub mod moments;

#[cfg(test)]
mod tests;

pub use accumulator::{AccumulatorMode, LinkStats, StatsAccumulator};
pub use error::{StatsError, StatsResult};
pub use moments::{MeanSd, Moments};
