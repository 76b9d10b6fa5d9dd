//! Unit tests for ls-routing.
//!
//! All tests use hand-crafted networks.

#[cfg(test)]
mod helpers {
    use ls_core::{LinkId, NodeId};
    use crate::{Network, NetworkBuilder};

    /// Small network for routing tests.
    ///
    /// ```text
    ///   0 ── 1 ── 2
    ///   │         │
    ///   3 ─────── 4        5 (isolated)
    /// ```
    ///
    /// Costs: 0-1, 1-2, 2-4 = 10 each; 0-3 = 50; 3-4 = 10.
    /// Shortest 0→4 is therefore 0→1→2→4 (30 vs 60).
    /// Link ids: road k gets `LinkId(k)` in insertion order, except 3-4 which
    /// is uncounted.
    pub fn grid_network() -> (Network, [NodeId; 6]) {
        let mut b = NetworkBuilder::new();
        let n = b.add_nodes(6);
        b.add_road(n[0], n[1], 10, LinkId(0));
        b.add_road(n[1], n[2], 10, LinkId(1));
        b.add_road(n[2], n[4], 10, LinkId(2));
        b.add_road(n[0], n[3], 50, LinkId(3));
        b.add_road(n[3], n[4], 10, LinkId::UNCOUNTED);
        (b.build(), [n[0], n[1], n[2], n[3], n[4], n[5]])
    }
}

// ── Network structure ─────────────────────────────────────────────────────────

#[cfg(test)]
mod network {
    use ls_core::LinkId;
    use crate::NetworkBuilder;

    #[test]
    fn empty_build() {
        let net = NetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert_eq!(net.n_links(), 0);
    }

    #[test]
    #[should_panic]
    fn edge_from_unknown_node_panics() {
        use ls_core::NodeId;

        let mut b = NetworkBuilder::new();
        let a = b.add_node();
        b.add_directed_edge(NodeId(5), a, 10, LinkId(0));
        b.build();
    }

    #[test]
    fn csr_out_edges() {
        let (net, [n0, n1, n2, n3, n4, n5]) = super::helpers::grid_network();
        assert_eq!(net.out_degree(n0), 2);
        assert_eq!(net.out_degree(n1), 2);
        assert_eq!(net.out_degree(n2), 2);
        assert_eq!(net.out_degree(n3), 2);
        assert_eq!(net.out_degree(n4), 2);
        assert_eq!(net.out_degree(n5), 0);
        for e in net.out_edges(n1) {
            assert_eq!(net.edge_from[e.index()], n1);
        }
    }

    #[test]
    fn n_links_ignores_uncounted() {
        let (net, _) = super::helpers::grid_network();
        assert_eq!(net.n_links(), 4);

        let mut b = NetworkBuilder::new();
        let n = b.add_nodes(2);
        b.add_road(n[0], n[1], 1, LinkId(-1));
        assert_eq!(b.build().n_links(), 0);
    }
}

// ── Link lookup ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod links {
    use ls_core::{EdgeId, LinkId, NodeId};
    use crate::{LinkLookup, LinkTable, NetworkBuilder, RoutingError};

    #[test]
    fn from_network_resolves_both_directions() {
        let (net, [n0, n1, _, n3, n4, _]) = super::helpers::grid_network();
        let table = LinkTable::from_network(&net);
        assert_eq!(table.len(), net.edge_count());

        let fwd = table.lookup(n0, n1).unwrap();
        let back = table.lookup(n1, n0).unwrap();
        assert_eq!(fwd.link, LinkId(0));
        assert_eq!(back.link, LinkId(0));
        assert_ne!(fwd.edge, back.edge);
        assert_eq!(net.edge_from[fwd.edge.index()], n0);
        assert_eq!(net.edge_to[fwd.edge.index()], n1);

        assert_eq!(table.lookup(n3, n4).unwrap().link, LinkId::UNCOUNTED);
    }

    #[test]
    fn miss_is_an_error() {
        let (net, [n0, _, _, _, n4, _]) = super::helpers::grid_network();
        let table = LinkTable::from_network(&net);
        match table.lookup(n0, n4) {
            Err(RoutingError::LinkLookupMiss { from, to }) => {
                assert_eq!(from, n0);
                assert_eq!(to, n4);
            }
            other => panic!("expected LinkLookupMiss, got {other:?}"),
        }
    }

    #[test]
    fn parallel_edges_keep_cheapest() {
        let mut b = NetworkBuilder::new();
        let n = b.add_nodes(2);
        b.add_directed_edge(n[0], n[1], 20, LinkId(0));
        b.add_directed_edge(n[0], n[1], 5, LinkId(1));
        let table = LinkTable::from_network(&b.build());
        let t = table.lookup(n[0], n[1]).unwrap();
        assert_eq!(t.link, LinkId(1));
        assert_eq!(t.edge, EdgeId(1));
    }

    #[test]
    fn traversals_of_short_paths_are_empty() {
        let table = LinkTable::new();
        assert!(table.traversals(&[]).unwrap().is_empty());
        assert!(table.traversals(&[NodeId(3)]).unwrap().is_empty());
    }

    #[test]
    fn traversals_follow_path_order() {
        let mut table = LinkTable::new();
        table.insert(NodeId(0), NodeId(1), EdgeId(10), LinkId(1));
        table.insert(NodeId(1), NodeId(2), EdgeId(11), LinkId(-1));
        let t = table.traversals(&[NodeId(0), NodeId(1), NodeId(2)]).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t[0].edge, EdgeId(10));
        assert_eq!(t[1].link, LinkId(-1));
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dijkstra {
    use ls_core::{NodeId, WorkerId};
    use crate::{DijkstraEngine, RouteEngine, RoutingError};

    const W0: WorkerId = WorkerId(0);

    #[test]
    fn shortest_path_taken() {
        let (net, [n0, n1, n2, _, n4, _]) = super::helpers::grid_network();
        let engine = DijkstraEngine::new(net, 1);
        assert_eq!(engine.route(n0, n4, W0).unwrap(), vec![n0, n1, n2, n4]);
    }

    #[test]
    fn reverse_direction() {
        let (net, [n0, n1, n2, _, n4, _]) = super::helpers::grid_network();
        let engine = DijkstraEngine::new(net, 1);
        assert_eq!(engine.route(n4, n0, W0).unwrap(), vec![n4, n2, n1, n0]);
    }

    #[test]
    fn same_node_is_single_element() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let engine = DijkstraEngine::new(net, 1);
        assert_eq!(engine.route(n0, n0, W0).unwrap(), vec![n0]);
    }

    #[test]
    fn unreachable_is_empty() {
        let (net, [n0, _, _, _, _, n5]) = super::helpers::grid_network();
        let engine = DijkstraEngine::new(net, 1);
        assert!(engine.route(n0, n5, W0).unwrap().is_empty());
    }

    #[test]
    fn scratch_reset_between_queries() {
        let (net, [n0, n1, n2, n3, n4, n5]) = super::helpers::grid_network();
        let engine = DijkstraEngine::new(net, 1);
        assert!(engine.route(n0, n5, W0).unwrap().is_empty());
        assert_eq!(engine.route(n3, n0, W0).unwrap(), vec![n3, n4, n2, n1, n0]);
        assert_eq!(engine.route(n1, n4, W0).unwrap(), vec![n1, n2, n4]);
    }

    #[test]
    fn unknown_node_rejected() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let engine = DijkstraEngine::new(net, 1);
        assert!(matches!(
            engine.route(n0, NodeId(99), W0),
            Err(RoutingError::NodeNotFound(NodeId(99)))
        ));
    }

    #[test]
    fn worker_out_of_range_rejected() {
        let (net, [n0, _, _, _, n4, _]) = super::helpers::grid_network();
        let engine = DijkstraEngine::new(net, 2);
        assert_eq!(engine.workers(), 2);
        assert!(engine.route(n0, n4, WorkerId(1)).is_ok());
        assert!(matches!(
            engine.route(n0, n4, WorkerId(2)),
            Err(RoutingError::WorkerOutOfRange { workers: 2, .. })
        ));
    }
}
