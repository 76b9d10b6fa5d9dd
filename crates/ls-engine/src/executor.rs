//! Route batch execution: per-trip edge lists in memory, or a CSV stream of
//! traversal records on disk.

use std::fs::{File, OpenOptions};
use std::ops::Range;
use std::path::Path;

use csv::{Writer, WriterBuilder};
use log::{debug, info};
use rayon::prelude::*;

use ls_core::{EdgeId, NodeId, TripId, TripSet};
use ls_routing::{LinkLookup, RouteEngine, RoutingResult, Traversal};

use crate::arena::current_worker;
use crate::{EngineError, EngineResult, RoutingContext};

/// Header of the traversal record stream.
pub const TRAVERSAL_HEADER: [&str; 3] = ["trip_id", "edge_id", "link_id"];

impl<R: RouteEngine, L: LinkLookup> RoutingContext<R, L> {
    /// Route every trip on `graph` and return, in trip order, the edge ids
    /// of each trip that has at least one traversal.  Unreachable trips and
    /// trips with `source == target` are left out.
    pub fn routes(
        &self,
        graph:   usize,
        sources: &[NodeId],
        targets: &[NodeId],
    ) -> EngineResult<Vec<Vec<EdgeId>>> {
        let trips = TripSet::new(sources, targets)?;
        let engine = self.engine(graph)?;
        info!("routing {} trips on graph {graph}", trips.len());

        let mut result: Vec<Vec<EdgeId>> = Vec::new();
        self.for_each_batch(engine, &trips, |_, routed| {
            result.extend(
                routed
                    .into_iter()
                    .filter(|t| !t.is_empty())
                    .map(|t| t.into_iter().map(|step| step.edge).collect::<Vec<_>>()),
            );
            Ok(())
        })?;
        Ok(result)
    }

    /// Route every trip on `graph` and append one `trip_id,edge_id,link_id`
    /// record per traversal to `path`.
    ///
    /// The header is written only when `path` does not exist yet.  Records
    /// are flushed after each batch; if a later batch fails, earlier batches
    /// stay in the file.
    ///
    /// Returns the ids of the trips that produced at least one record, in
    /// trip order.
    pub fn routes_to_file(
        &self,
        graph:    usize,
        sources:  &[NodeId],
        targets:  &[NodeId],
        trip_ids: &[TripId],
        path:     &Path,
    ) -> EngineResult<Vec<TripId>> {
        let trips = TripSet::new(sources, targets)?;
        check_output_path(path)?;
        let trips = trips.with_trip_ids(trip_ids)?;
        let engine = self.engine(graph)?;

        let mut out = open_record_stream(path)?;
        info!("routing {} trips on graph {graph} to {}", trips.len(), path.display());

        let mut routed_ids = Vec::new();
        self.for_each_batch(engine, &trips, |batch, routed| {
            for (trip, steps) in batch.zip(routed) {
                if steps.is_empty() {
                    continue;
                }
                let Some(id) = trips.trip_id(trip) else {
                    continue;
                };
                routed_ids.push(id);
                for step in steps {
                    out.write_record(&[id.0.to_string(), step.edge.0.to_string(), step.link.0.to_string()])?;
                }
            }
            out.flush()?;
            Ok(())
        })?;
        Ok(routed_ids)
    }

    /// Run the two-phase batch loop: route a batch in parallel, then hand
    /// the per-trip traversals to `drain` in trip order.
    fn for_each_batch<F>(&self, engine: &R, trips: &TripSet<'_>, mut drain: F) -> EngineResult<()>
    where
        F: FnMut(Range<usize>, Vec<Vec<Traversal>>) -> EngineResult<()>,
    {
        for batch in trips.batches(self.config.batch_size) {
            let routed = self.pool.install(|| {
                batch
                    .clone()
                    .into_par_iter()
                    .map(|trip| self.trip_traversals(engine, trips, trip))
                    .collect::<RoutingResult<Vec<_>>>()
            })?;
            debug!("routed trips {}..{}", batch.start, batch.end);
            drain(batch, routed)?;
        }
        Ok(())
    }

    fn trip_traversals(&self, engine: &R, trips: &TripSet<'_>, trip: usize) -> RoutingResult<Vec<Traversal>> {
        let path = engine.route(trips.source(trip), trips.target(trip), current_worker())?;
        if path.len() <= 1 {
            return Ok(Vec::new());
        }
        self.links.traversals(&path)
    }
}

/// The output must not be a directory and must sit in an existing
/// directory.  A bare file name refers to the working directory.
fn check_output_path(path: &Path) -> EngineResult<()> {
    if path.is_dir() {
        return Err(EngineError::InvalidOutputPath {
            path:   path.to_path_buf(),
            reason: "is a directory",
        });
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(EngineError::InvalidOutputPath {
            path:   path.to_path_buf(),
            reason: "parent directory does not exist",
        });
    }
    Ok(())
}

fn open_record_stream(path: &Path) -> EngineResult<Writer<File>> {
    let write_header = !path.exists();
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let mut out = WriterBuilder::new().has_headers(false).from_writer(file);
    if write_header {
        out.write_record(TRAVERSAL_HEADER)?;
        out.flush()?;
    }
    Ok(out)
}
