//! Parallel trip sequences.
//!
//! Callers hand trips over as parallel slices (sources, targets, and
//! optionally tonnes and trip ids).  [`TripSet`] checks every length against
//! the source count up front, so downstream code can index all slices with
//! the same trip number without further checks.

use std::ops::Range;

use crate::{CoreError, CoreResult, NodeId, TripId};

/// A borrowed, length-validated set of trips.
#[derive(Clone, Copy, Debug)]
pub struct TripSet<'a> {
    sources:  &'a [NodeId],
    targets:  &'a [NodeId],
    tonnes:   Option<&'a [f64]>,
    trip_ids: Option<&'a [TripId]>,
}

impl<'a> TripSet<'a> {
    /// Pair `sources` with `targets`.  Fails if their lengths differ.
    pub fn new(sources: &'a [NodeId], targets: &'a [NodeId]) -> CoreResult<Self> {
        check_len(sources.len(), targets.len(), "targets")?;
        Ok(Self { sources, targets, tonnes: None, trip_ids: None })
    }

    /// Attach one weight per trip.
    pub fn with_tonnes(mut self, tonnes: &'a [f64]) -> CoreResult<Self> {
        check_len(self.len(), tonnes.len(), "tonnes")?;
        self.tonnes = Some(tonnes);
        Ok(self)
    }

    /// Attach one label per trip.
    pub fn with_trip_ids(mut self, trip_ids: &'a [TripId]) -> CoreResult<Self> {
        check_len(self.len(), trip_ids.len(), "trip_ids")?;
        self.trip_ids = Some(trip_ids);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    #[inline]
    pub fn source(&self, trip: usize) -> NodeId {
        self.sources[trip]
    }

    #[inline]
    pub fn target(&self, trip: usize) -> NodeId {
        self.targets[trip]
    }

    /// Weight of `trip`; `1.0` when the set is unweighted.
    #[inline]
    pub fn tonnes(&self, trip: usize) -> f64 {
        self.tonnes.map_or(1.0, |t| t[trip])
    }

    /// Label of `trip`, if labels were attached.
    #[inline]
    pub fn trip_id(&self, trip: usize) -> Option<TripId> {
        self.trip_ids.map(|ids| ids[trip])
    }

    /// Split `0..len()` into consecutive ranges of at most `batch_size` trips.
    ///
    /// An empty set yields no batches.
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = Range<usize>> + '_ {
        let n = self.len();
        let step = batch_size.max(1);
        (0..n).step_by(step).map(move |start| start..(start + step).min(n))
    }
}

fn check_len(expected: usize, got: usize, what: &'static str) -> CoreResult<()> {
    if expected != got {
        return Err(CoreError::LengthMismatch { expected, got, what });
    }
    Ok(())
}
