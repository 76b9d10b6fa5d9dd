//! Node-pair → (edge, link) resolution.

use rustc_hash::FxHashMap;

use ls_core::{EdgeId, LinkId, NodeId};

use crate::network::Network;
use crate::{RoutingError, RoutingResult};

/// One step of a route: the edge used and the link it counts towards.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Traversal {
    pub edge: EdgeId,
    pub link: LinkId,
}

/// Read-only lookup from an ordered pair of adjacent nodes to the edge
/// joining them.  Shared freely across workers while routing.
pub trait LinkLookup: Send + Sync {
    /// Resolve `from → to`.  Fails with [`RoutingError::LinkLookupMiss`] if
    /// the pair is not a known adjacency.
    fn lookup(&self, from: NodeId, to: NodeId) -> RoutingResult<Traversal>;

    /// Resolve every consecutive pair of `path`.  A path shorter than two
    /// nodes yields no traversals.
    fn traversals(&self, path: &[NodeId]) -> RoutingResult<Vec<Traversal>> {
        path.windows(2).map(|w| self.lookup(w[0], w[1])).collect()
    }
}

/// Hash-map backed [`LinkLookup`].
#[derive(Default, Clone, Debug)]
pub struct LinkTable {
    map: FxHashMap<(NodeId, NodeId), Traversal>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { map: FxHashMap::with_capacity_and_hasher(n, Default::default()) }
    }

    /// Register an adjacency.  A later insert for the same pair replaces the
    /// earlier one.
    pub fn insert(&mut self, from: NodeId, to: NodeId, edge: EdgeId, link: LinkId) {
        self.map.insert((from, to), Traversal { edge, link });
    }

    /// Build the table for every edge of `network`.  When several edges join
    /// the same ordered pair the cheapest one is kept, matching the edge a
    /// shortest-path search would have used.
    pub fn from_network(network: &Network) -> Self {
        let mut table = Self::with_capacity(network.edge_count());
        let mut best_cost: FxHashMap<(NodeId, NodeId), u32> = FxHashMap::default();
        for i in 0..network.edge_count() {
            let key = (network.edge_from[i], network.edge_to[i]);
            let cost = network.edge_cost[i];
            if best_cost.get(&key).is_some_and(|&c| c <= cost) {
                continue;
            }
            best_cost.insert(key, cost);
            table.insert(key.0, key.1, EdgeId(i as u32), network.edge_link[i]);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl LinkLookup for LinkTable {
    #[inline]
    fn lookup(&self, from: NodeId, to: NodeId) -> RoutingResult<Traversal> {
        self.map
            .get(&(from, to))
            .copied()
            .ok_or(RoutingError::LinkLookupMiss { from, to })
    }
}
