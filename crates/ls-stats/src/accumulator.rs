//! The per-commodity link statistics accumulator.

use std::collections::BTreeMap;

use log::debug;
use ls_store::{SimulationShape, SimulationStore};

use crate::{Moments, StatsError, StatsResult};

/// Which kind of entry an accumulator holds.  Fixed at construction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum AccumulatorMode {
    /// One value per link for the current simulation.  Each recorded total
    /// replaces the previous one.
    SingleValue,
    /// Running `(Σx, Σx²)` per link across any number of runs.
    Moments,
}

/// One commodity's per-link vector.  The variant always matches the owning
/// accumulator's mode and the length always equals its `n_links`.
#[derive(Clone, Debug, PartialEq)]
pub enum LinkStats {
    Values(Vec<f32>),
    Moments(Vec<Moments>),
}

impl LinkStats {
    fn zeroed(mode: AccumulatorMode, n_links: usize) -> Self {
        match mode {
            AccumulatorMode::SingleValue => LinkStats::Values(vec![0.0; n_links]),
            AccumulatorMode::Moments     => LinkStats::Moments(vec![Moments::default(); n_links]),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LinkStats::Values(v)  => v.len(),
            LinkStats::Moments(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> AccumulatorMode {
        match self {
            LinkStats::Values(_)  => AccumulatorMode::SingleValue,
            LinkStats::Moments(_) => AccumulatorMode::Moments,
        }
    }
}

/// Per-commodity link statistics with a link count fixed for its lifetime.
///
/// Commodities are iterated in name order, so exports are deterministic.
#[derive(Clone, Debug)]
pub struct StatsAccumulator {
    n_links: usize,
    mode:    AccumulatorMode,
    stats:   BTreeMap<String, LinkStats>,
}

impl StatsAccumulator {
    pub fn new(n_links: usize, mode: AccumulatorMode) -> Self {
        Self { n_links, mode, stats: BTreeMap::new() }
    }

    pub fn n_links(&self) -> usize {
        self.n_links
    }

    pub fn mode(&self) -> AccumulatorMode {
        self.mode
    }

    /// Commodity names seen so far, in order.
    pub fn commodities(&self) -> impl Iterator<Item = &str> + '_ {
        self.stats.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LinkStats)> + '_ {
        self.stats.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, commodity: &str) -> Option<&LinkStats> {
        self.stats.get(commodity)
    }

    /// The commodity's vector, created zeroed with `n_links` entries on first
    /// access.
    pub fn entry(&mut self, commodity: &str) -> &mut LinkStats {
        let (mode, n_links) = (self.mode, self.n_links);
        self.stats
            .entry(commodity.to_owned())
            .or_insert_with(|| LinkStats::zeroed(mode, n_links))
    }

    /// Single-value view of a commodity.
    pub fn values_mut(&mut self, commodity: &str) -> StatsResult<&mut [f32]> {
        let actual = self.mode;
        match self.entry(commodity) {
            LinkStats::Values(v) => Ok(v.as_mut_slice()),
            LinkStats::Moments(_) => Err(StatsError::ModeMismatch {
                expected: AccumulatorMode::SingleValue,
                actual,
            }),
        }
    }

    /// Moments view of a commodity.
    pub fn moments_mut(&mut self, commodity: &str) -> StatsResult<&mut [Moments]> {
        let actual = self.mode;
        match self.entry(commodity) {
            LinkStats::Moments(m) => Ok(m.as_mut_slice()),
            LinkStats::Values(_) => Err(StatsError::ModeMismatch {
                expected: AccumulatorMode::Moments,
                actual,
            }),
        }
    }

    /// Apply one run's per-link totals to `commodity`.
    ///
    /// Single-value mode stores each total as the link's value; moments mode
    /// adds `(total, total²)`.
    pub fn record(&mut self, commodity: &str, totals: &[f64]) -> StatsResult<()> {
        if totals.len() != self.n_links {
            return Err(StatsError::LinkCountMismatch { expected: self.n_links, got: totals.len() });
        }
        match self.entry(commodity) {
            LinkStats::Values(v) => {
                for (slot, &t) in v.iter_mut().zip(totals) {
                    *slot = t as f32;
                }
            }
            LinkStats::Moments(m) => {
                for (slot, &t) in m.iter_mut().zip(totals) {
                    slot.add(t);
                }
            }
        }
        debug!("recorded {} link totals for {commodity}", totals.len());
        Ok(())
    }

    // ── Binary store ──────────────────────────────────────────────────────

    /// Write every commodity's values into slot `slot` of its file in
    /// `store`.  Each file holds `n_simulations` slots of this
    /// accumulator's `n_links`; a file of another size is rejected before
    /// anything is written to it.  Single-value mode only.
    pub fn write_slot(&self, store: &SimulationStore, n_simulations: usize, slot: i64) -> StatsResult<()> {
        let shape = SimulationShape::new(n_simulations, self.n_links);
        for (commodity, values) in self.single_values()? {
            store.write_slot(commodity, shape, slot, values)?;
        }
        Ok(())
    }

    /// Add every commodity's values onto slot `slot` of its existing file.
    /// Same shape rules as [`write_slot`](Self::write_slot), and the same
    /// single-writer rule as [`SimulationStore::accumulate_slot`].
    pub fn accumulate_slot(&self, store: &SimulationStore, n_simulations: usize, slot: i64) -> StatsResult<()> {
        let shape = SimulationShape::new(n_simulations, self.n_links);
        for (commodity, values) in self.single_values()? {
            store.accumulate_slot(commodity, shape, slot, values)?;
        }
        Ok(())
    }

    pub(crate) fn single_values(&self) -> StatsResult<Vec<(&str, &[f32])>> {
        self.require(AccumulatorMode::SingleValue)?;
        Ok(self
            .stats
            .iter()
            .filter_map(|(k, v)| match v {
                LinkStats::Values(v) => Some((k.as_str(), v.as_slice())),
                LinkStats::Moments(_) => None,
            })
            .collect())
    }

    pub(crate) fn moment_vectors(&self) -> StatsResult<Vec<(&str, &[Moments])>> {
        self.require(AccumulatorMode::Moments)?;
        Ok(self
            .stats
            .iter()
            .filter_map(|(k, v)| match v {
                LinkStats::Moments(m) => Some((k.as_str(), m.as_slice())),
                LinkStats::Values(_) => None,
            })
            .collect())
    }

    fn require(&self, expected: AccumulatorMode) -> StatsResult<()> {
        if self.mode != expected {
            return Err(StatsError::ModeMismatch { expected, actual: self.mode });
        }
        Ok(())
    }
}
