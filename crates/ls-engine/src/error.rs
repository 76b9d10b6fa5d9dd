use std::path::PathBuf;

use ls_core::{CoreError, LinkId, WorkerId};
use ls_routing::RoutingError;
use ls_stats::StatsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid output path {path}: {reason}")]
    InvalidOutputPath { path: PathBuf, reason: &'static str },

    #[error("requested stats for links but link ids weren't provided")]
    LinkIdsUnavailable,

    #[error("graph {graph} requested, context holds {graphs}")]
    UnknownGraph { graph: usize, graphs: usize },

    #[error("{link} out of bounds for {n_links} links")]
    LinkIdOutOfBounds { link: LinkId, n_links: usize },

    #[error("{worker} has no arena ({workers} allocated)")]
    WorkerOutOfRange { worker: WorkerId, workers: usize },

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("stats error: {0}")]
    Stats(#[from] StatsError),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
