//! Routing-subsystem error type.

use thiserror::Error;

use ls_core::{NodeId, WorkerId};

/// Errors produced by route engines and link lookups.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("no edge between consecutive route nodes {from} and {to}")]
    LinkLookupMiss { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("{worker} is outside the engine's {workers} worker slots")]
    WorkerOutOfRange { worker: WorkerId, workers: usize },
}

pub type RoutingResult<T> = Result<T, RoutingError>;
