//! The routing context and its builder.

use rayon::{ThreadPool, ThreadPoolBuilder};

use ls_core::{CoreError, EngineConfig};
use ls_routing::{LinkLookup, RouteEngine};

use crate::{EngineError, EngineResult};

/// Everything a batch call needs: one or more route engines (graphs), the
/// shared link lookup, the configuration, and a dedicated thread pool.
///
/// Worker ids handed to the engines are thread indices of this pool, so an
/// engine with per-worker state needs at least
/// [`workers()`](Self::workers) slots.
///
/// Create via [`ContextBuilder`].
pub struct RoutingContext<R: RouteEngine, L: LinkLookup> {
    pub(crate) graphs: Vec<R>,
    pub(crate) links:  L,
    pub(crate) config: EngineConfig,
    pub(crate) pool:   ThreadPool,
}

impl<R: RouteEngine, L: LinkLookup> RoutingContext<R, L> {
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn links(&self) -> &L {
        &self.links
    }

    /// The engine for `graph`, if it exists.
    pub fn graph(&self, graph: usize) -> Option<&R> {
        self.graphs.get(graph)
    }

    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// Number of pool threads, i.e. the range of worker ids.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub(crate) fn engine(&self, graph: usize) -> EngineResult<&R> {
        self.graphs.get(graph).ok_or(EngineError::UnknownGraph {
            graph,
            graphs: self.graphs.len(),
        })
    }
}

/// Fluent builder for [`RoutingContext<R, L>`].
///
/// # Required inputs
///
/// - `L: LinkLookup` — passed to [`new`](Self::new)
/// - at least one `R: RouteEngine` via [`graph`](Self::graph) or
///   [`graphs`](Self::graphs); graph selectors are assigned in insertion
///   order from 0
///
/// # Optional inputs
///
/// | Method        | Default                    |
/// |---------------|----------------------------|
/// | `.config(c)`  | `EngineConfig::default()`  |
///
/// # Example
///
/// ```rust,ignore
/// let ctx = ContextBuilder::new(LinkTable::from_network(&net))
///     .graph(DijkstraEngine::new(net, 4))
///     .config(EngineConfig { num_threads: Some(4), ..Default::default() })
///     .build()?;
/// ```
pub struct ContextBuilder<R: RouteEngine, L: LinkLookup> {
    graphs: Vec<R>,
    links:  L,
    config: EngineConfig,
}

impl<R: RouteEngine, L: LinkLookup> ContextBuilder<R, L> {
    pub fn new(links: L) -> Self {
        Self { graphs: Vec::new(), links, config: EngineConfig::default() }
    }

    /// Add one graph.
    pub fn graph(mut self, engine: R) -> Self {
        self.graphs.push(engine);
        self
    }

    /// Add several graphs.
    pub fn graphs(mut self, engines: impl IntoIterator<Item = R>) -> Self {
        self.graphs.extend(engines);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration, spin up the thread pool, and return a
    /// ready [`RoutingContext`].
    pub fn build(self) -> EngineResult<RoutingContext<R, L>> {
        self.config.validate()?;
        if self.graphs.is_empty() {
            return Err(CoreError::Config("a routing context needs at least one graph".into()).into());
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.num_threads.unwrap_or(0))
            .thread_name(|i| format!("ls-worker-{i}"))
            .build()?;

        Ok(RoutingContext {
            graphs: self.graphs,
            links:  self.links,
            config: self.config,
            pool,
        })
    }
}
