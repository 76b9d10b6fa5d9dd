//! Directed network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges are the `EdgeId`s in:
//!
//! ```text
//! node_out_start[n] .. node_out_start[n+1]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_cost`, `edge_link`) are
//! sorted by source node and indexed by `EdgeId`.

use ls_core::{EdgeId, LinkId, NodeId};

/// Directed graph in CSR format with a link id per edge.
///
/// Do not construct directly; use [`NetworkBuilder`].
pub struct Network {
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each edge.  Needed to walk `prev_edge` back to the
    /// origin during path reconstruction.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Non-negative traversal cost used as the Dijkstra weight.
    pub edge_cost: Vec<u32>,

    /// Link the edge counts towards; negative for uncounted edges.
    pub edge_link: Vec<LinkId>,
}

impl Network {
    pub fn node_count(&self) -> usize {
        self.node_out_start.len().saturating_sub(1)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Largest countable link id plus one, i.e. the accumulator length a
    /// statistics run over this network needs.
    pub fn n_links(&self) -> usize {
        self.edge_link
            .iter()
            .filter_map(|l| l.index())
            .max()
            .map_or(0, |m| m + 1)
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// `build()` stable-sorts edges by source node, so `EdgeId`s follow source
/// node order and, within one node, insertion order.
///
/// # Example
///
/// ```
/// use ls_core::LinkId;
/// use ls_routing::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new();
/// let a = b.add_node();
/// let c = b.add_node();
/// b.add_road(a, c, 90, LinkId(0));
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct NetworkBuilder {
    node_count: usize,
    raw_edges:  Vec<RawEdge>,
}

struct RawEdge {
    from: NodeId,
    to:   NodeId,
    cost: u32,
    link: LinkId,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self { node_count: 0, raw_edges: Vec::new() }
    }

    pub fn with_capacity(edges: usize) -> Self {
        Self { node_count: 0, raw_edges: Vec::with_capacity(edges) }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.node_count as u32);
        self.node_count += 1;
        id
    }

    /// Add `n` nodes at once.
    pub fn add_nodes(&mut self, n: usize) -> Vec<NodeId> {
        (0..n).map(|_| self.add_node()).collect()
    }

    /// Add a **directed** edge from `from` to `to`.
    ///
    /// Both endpoints must already have been returned by
    /// [`add_node`](Self::add_node) or [`add_nodes`](Self::add_nodes).
    /// Debug builds panic here; otherwise an unknown source panics in
    /// [`build`](Self::build) and an unknown target panics when routed to.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, cost: u32, link: LinkId) {
        debug_assert!(from.index() < self.node_count, "edge source {from} was never added");
        debug_assert!(to.index() < self.node_count, "edge target {to} was never added");
        self.raw_edges.push(RawEdge { from, to, cost, link });
    }

    /// Add edges in both directions sharing one link.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, cost: u32, link: LinkId) {
        self.add_directed_edge(a, b, cost, link);
        self.add_directed_edge(b, a, cost, link);
    }

    pub fn node_count(&self) -> usize { self.node_count }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`Network`].
    pub fn build(self) -> Network {
        let node_count = self.node_count;

        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from: Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:   Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_cost: Vec<u32>    = raw.iter().map(|e| e.cost).collect();
        let edge_link: Vec<LinkId> = raw.iter().map(|e| e.link).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        Network { node_out_start, edge_from, edge_to, edge_cost, edge_link }
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
