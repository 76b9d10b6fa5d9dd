//! Engine configuration.

use crate::{CoreError, CoreResult};

/// Upper bound on trips routed per batch.  Bounds peak memory and sets the
/// flush granularity of the traversal record stream.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// How a trip's tonnage is credited to a link it crosses more than once.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkWeighting {
    /// Every physical crossing adds the trip's tonnage.  No per-trip marker.
    #[default]
    CountEveryCrossing,
    /// A trip adds its tonnage to a link at most once, however many times it
    /// crosses it.
    CountOncePerTrip,
}

/// Top-level configuration for a routing context.
///
/// Typically built by the application and handed to
/// `ls_engine::ContextBuilder`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Maximum trips per batch.  Default: [`DEFAULT_BATCH_SIZE`].
    pub batch_size: usize,

    /// Worker thread count for the context's Rayon pool.  `None` uses all
    /// logical cores.
    pub num_threads: Option<usize>,

    /// Crediting policy for repeated crossings in link statistics.
    pub weighting: LinkWeighting,

    /// Whether the link lookup carries real link ids.  Required for any
    /// per-link statistics call.
    pub has_link_ids: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_size:   DEFAULT_BATCH_SIZE,
            num_threads:  None,
            weighting:    LinkWeighting::default(),
            has_link_ids: false,
        }
    }
}

impl EngineConfig {
    /// Reject values no context can run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.batch_size == 0 {
            return Err(CoreError::Config("batch_size must be at least 1".into()));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
