//! Route engine trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `ls-engine` calls routing only through [`RouteEngine`].  The returned
//! value is the ordered **node** sequence of the path; the engine never
//! decides which edges or links are counted, that is the job of a
//! [`LinkLookup`](crate::LinkLookup).
//!
//! # Worker scratch
//!
//! Every call carries the `WorkerId` of the calling pool thread.  Engines
//! that need search state (distance labels, heaps, …) keep one scratch area
//! per worker and index it with that id instead of allocating per query.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::{Mutex, PoisonError};

use ls_core::{EdgeId, NodeId, WorkerId};

use crate::network::Network;
use crate::{RoutingError, RoutingResult};

// ── RouteEngine trait ─────────────────────────────────────────────────────────

/// Shortest-path engine.
///
/// # Contract
///
/// - Returns the ordered nodes from `source` to `target` inclusive.
/// - A result of length 0 or 1 means "no route" (unreachable, or
///   `source == target`); callers skip such trips.
/// - Must be safe to call concurrently from distinct workers.
pub trait RouteEngine: Send + Sync {
    fn route(&self, source: NodeId, target: NodeId, worker: WorkerId) -> RoutingResult<Vec<NodeId>>;
}

// ── DijkstraEngine ────────────────────────────────────────────────────────────

/// Per-worker search state.  Only the entries listed in `touched` are dirty
/// after a query, so a reset costs O(settled nodes), not O(N).
struct Scratch {
    dist:      Vec<u32>,
    prev_edge: Vec<EdgeId>,
    touched:   Vec<usize>,
    heap:      BinaryHeap<Reverse<(u32, NodeId)>>,
}

impl Scratch {
    fn new(node_count: usize) -> Self {
        Self {
            dist:      vec![u32::MAX; node_count],
            prev_edge: vec![EdgeId::INVALID; node_count],
            touched:   Vec::new(),
            heap:      BinaryHeap::new(),
        }
    }

    fn reset(&mut self) {
        for &n in &self.touched {
            self.dist[n] = u32::MAX;
            self.prev_edge[n] = EdgeId::INVALID;
        }
        self.touched.clear();
        self.heap.clear();
    }

    #[inline]
    fn relax(&mut self, node: NodeId, cost: u32, via: EdgeId) {
        let i = node.index();
        if self.dist[i] == u32::MAX {
            self.touched.push(i);
        }
        self.dist[i] = cost;
        self.prev_edge[i] = via;
        self.heap.push(Reverse((cost, node)));
    }
}

/// Standard Dijkstra over a [`Network`] using `edge_cost` as weight.
///
/// Holds one scratch area per worker slot.  Each slot sits behind its own
/// `Mutex`; as long as every worker passes its own id the locks are never
/// contended.
pub struct DijkstraEngine {
    network: Network,
    scratch: Vec<Mutex<Scratch>>,
}

impl DijkstraEngine {
    /// Create an engine with `workers` scratch slots (at least one).
    pub fn new(network: Network, workers: usize) -> Self {
        let n = network.node_count();
        let scratch = (0..workers.max(1)).map(|_| Mutex::new(Scratch::new(n))).collect();
        Self { network, scratch }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn workers(&self) -> usize {
        self.scratch.len()
    }
}

impl RouteEngine for DijkstraEngine {
    fn route(&self, source: NodeId, target: NodeId, worker: WorkerId) -> RoutingResult<Vec<NodeId>> {
        for node in [source, target] {
            if !self.network.contains(node) {
                return Err(RoutingError::NodeNotFound(node));
            }
        }
        let slot = self.scratch.get(worker.index()).ok_or(RoutingError::WorkerOutOfRange {
            worker,
            workers: self.scratch.len(),
        })?;
        if source == target {
            return Ok(vec![source]);
        }

        let mut scratch = slot.lock().unwrap_or_else(PoisonError::into_inner);
        let path = dijkstra(&self.network, &mut scratch, source, target);
        scratch.reset();
        Ok(path)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(network: &Network, s: &mut Scratch, from: NodeId, to: NodeId) -> Vec<NodeId> {
    s.relax(from, 0, EdgeId::INVALID);

    // Secondary key NodeId gives deterministic tie-breaking.
    while let Some(Reverse((cost, node))) = s.heap.pop() {
        if node == to {
            return reconstruct(network, &s.prev_edge, to);
        }
        // Stale heap entry.
        if cost > s.dist[node.index()] {
            continue;
        }
        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost.saturating_add(network.edge_cost[edge.index()]);
            if new_cost < s.dist[neighbor.index()] {
                s.relax(neighbor, new_cost, edge);
            }
        }
    }

    Vec::new()
}

fn reconstruct(network: &Network, prev_edge: &[EdgeId], to: NodeId) -> Vec<NodeId> {
    let mut nodes = vec![to];
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    nodes
}
