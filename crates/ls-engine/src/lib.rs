//! `ls-engine` — batched route computation and link statistics.
//!
//! # Batch loop
//!
//! ```text
//! for batch in trips.chunks(config.batch_size):
//!   ① Route    — each trip routed on the context's Rayon pool; the engine
//!                is told which worker is calling.  Node paths are resolved
//!                to (edge, link) traversals, or tallied per worker.
//!   ② Drain    — sequential, in trip order: append records to the CSV
//!                stream / push in-memory routes, or sum the per-worker
//!                tallies into the running total.
//! ```
//!
//! Because ② runs in trip order, output order equals input order whatever
//! order ① finished in.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ls_core::EngineConfig;
//! use ls_engine::ContextBuilder;
//! use ls_routing::{DijkstraEngine, LinkTable};
//! use ls_stats::{AccumulatorMode, StatsAccumulator};
//!
//! let config = EngineConfig { num_threads: Some(8), has_link_ids: true, ..Default::default() };
//! let links = LinkTable::from_network(&network);
//! let n_links = network.n_links();
//! let ctx = ContextBuilder::new(links)
//!     .graph(DijkstraEngine::new(network, 8))
//!     .config(config)
//!     .build()?;
//!
//! let mut stats = StatsAccumulator::new(n_links, AccumulatorMode::SingleValue);
//! ctx.route_stats(0, &sources, &targets, &tonnes, "grain", &mut stats)?;
//! ```

pub mod aggregator;
pub mod arena;
pub mod context;
pub mod error;
pub mod executor;


pub use arena::WorkerArenas;
pub use context::{ContextBuilder, RoutingContext};
pub use error::{EngineError, EngineResult};
