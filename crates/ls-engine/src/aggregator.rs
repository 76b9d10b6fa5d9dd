//! Tonnage-weighted link statistics.

use log::{debug, info};
use rayon::prelude::*;

use ls_core::{LinkWeighting, NodeId, TripSet};
use ls_routing::{LinkLookup, RouteEngine};
use ls_stats::StatsAccumulator;

use crate::arena::current_worker;
use crate::{EngineError, EngineResult, RoutingContext, WorkerArenas};

/// One worker's partial link totals.
///
/// Totals are `f64` even though single-value accumulators store `f32`;
/// conversion happens once, after the last batch.
struct LinkTally {
    totals:  Vec<f64>,
    /// Per-trip "already credited" marks; only for `CountOncePerTrip`.
    seen:    Option<Vec<bool>>,
    touched: Vec<usize>,
}

impl LinkTally {
    fn new(n_links: usize, weighting: LinkWeighting) -> Self {
        let seen = match weighting {
            LinkWeighting::CountEveryCrossing => None,
            LinkWeighting::CountOncePerTrip   => Some(vec![false; n_links]),
        };
        Self { totals: vec![0.0; n_links], seen, touched: Vec::new() }
    }

    /// Credit `tonnes` to every countable link along `path`.
    fn add_trip<L: LinkLookup>(&mut self, links: &L, path: &[NodeId], tonnes: f64) -> EngineResult<()> {
        let Self { totals, seen, touched } = self;
        let n_links = totals.len();

        for pair in path.windows(2) {
            let link = links.lookup(pair[0], pair[1])?.link;
            let Some(i) = link.index() else {
                continue;
            };
            if i >= n_links {
                return Err(EngineError::LinkIdOutOfBounds { link, n_links });
            }
            match seen.as_mut() {
                None => totals[i] += tonnes,
                Some(seen) if !seen[i] => {
                    seen[i] = true;
                    touched.push(i);
                }
                Some(_) => {}
            }
        }

        if let Some(seen) = seen.as_mut() {
            for i in touched.drain(..) {
                seen[i] = false;
                totals[i] += tonnes;
            }
        }
        Ok(())
    }

    /// Move this tally into `into` and zero it for the next batch.
    fn drain_into(&mut self, into: &mut [f64]) {
        for (acc, t) in into.iter_mut().zip(self.totals.iter_mut()) {
            *acc += *t;
            *t = 0.0;
        }
    }
}

impl<R: RouteEngine, L: LinkLookup> RoutingContext<R, L> {
    /// Route every trip on `graph` and credit its `tonnes` to each link it
    /// crosses, then record the per-link totals for `commodity` in `stats`.
    ///
    /// Links with a negative id are skipped; a link id `>= stats.n_links()`
    /// aborts the call.  Crossing the same link twice in one trip counts
    /// once or twice depending on [`EngineConfig::weighting`].  On any
    /// error `stats` is left untouched.
    ///
    /// [`EngineConfig::weighting`]: ls_core::EngineConfig::weighting
    pub fn route_stats(
        &self,
        graph:     usize,
        sources:   &[NodeId],
        targets:   &[NodeId],
        tonnes:    &[f64],
        commodity: &str,
        stats:     &mut StatsAccumulator,
    ) -> EngineResult<()> {
        let trips = TripSet::new(sources, targets)?.with_tonnes(tonnes)?;
        if !self.config.has_link_ids {
            return Err(EngineError::LinkIdsUnavailable);
        }
        let engine = self.engine(graph)?;
        let n_links = stats.n_links();
        let weighting = self.config.weighting;
        info!("aggregating {} trips of {commodity} over {n_links} links ({weighting:?})", trips.len());

        let mut arenas = WorkerArenas::new(self.workers(), || LinkTally::new(n_links, weighting));
        let mut batch_total = vec![0.0f64; n_links];
        let mut total = vec![0.0f64; n_links];

        for batch in trips.batches(self.config.batch_size) {
            self.pool.install(|| {
                batch.clone().into_par_iter().try_for_each(|trip| -> EngineResult<()> {
                    let path = engine.route(trips.source(trip), trips.target(trip), current_worker())?;
                    if path.len() <= 1 {
                        return Ok(());
                    }
                    arenas.lock(current_worker())?.add_trip(&self.links, &path, trips.tonnes(trip))
                })
            })?;

            batch_total.fill(0.0);
            for tally in arenas.iter_mut() {
                tally.drain_into(&mut batch_total);
            }
            for (t, b) in total.iter_mut().zip(&batch_total) {
                *t += *b;
            }
            debug!("aggregated trips {}..{}", batch.start, batch.end);
        }

        stats.record(commodity, &total)?;
        Ok(())
    }
}
