//! Index-stable undirected graphs with soft deletion.

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;

/// An undirected graph over payloads of type `T`, addressed by stable integer
/// node indices.
///
/// Deletion is soft: removing a node or an edge only severs adjacency, so
/// indices held by region tables, rule configuration, and in-flight search
/// branches stay valid across structural edits. The graph never resizes and
/// never reuses an index.
pub struct Graph<T> {
    inner: StableUnGraph<T, ()>,
}

impl<T> Graph<T> {
    /// Build a graph from node payloads and undirected edges given as index
    /// pairs into the payload list.
    ///
    /// # Panics
    ///
    /// Panics if an edge references a node index out of range.
    pub fn new(nodes: Vec<T>, edges: &[(usize, usize)]) -> Self {
        let node_count = nodes.len();
        let mut inner = StableUnGraph::with_capacity(node_count, edges.len());
        for data in nodes {
            inner.add_node(data);
        }

        for &(from, to) in edges {
            assert!(from < node_count, "no node {from}");
            assert!(to < node_count, "no node {to}");
            inner.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }

        Self { inner }
    }

    /// Number of node slots, deleted or not.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Payload of the node at `index`.
    pub fn data(&self, index: usize) -> Option<&T> {
        self.inner.node_weight(NodeIndex::new(index))
    }

    /// Indices of the nodes still adjacent to `index`.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.inner.neighbors(NodeIndex::new(index)).map(|n| n.index())
    }

    /// Number of edges still incident to `index`.
    pub fn degree(&self, index: usize) -> usize {
        self.neighbors(index).count()
    }

    /// True while the node at `index` has at least one incident edge.
    pub fn node_is_connected(&self, index: usize) -> bool {
        self.neighbors(index).next().is_some()
    }

    /// True if an edge between `from` and `to` survives.
    pub fn connected_to(&self, from: usize, to: usize) -> bool {
        self.inner.find_edge(NodeIndex::new(from), NodeIndex::new(to)).is_some()
    }

    /// Soft-delete the node at `index` by removing every incident edge. The
    /// slot itself is untouched, so no other index shifts.
    pub fn delete_node_at(&mut self, index: usize) -> &mut Self {
        let incident: Vec<_> = self
            .inner
            .edges(NodeIndex::new(index))
            .map(|edge| edge.id())
            .collect();
        for edge in incident {
            self.inner.remove_edge(edge);
        }

        self
    }

    /// Remove the edge between `from` and `to`, if any. Missing edges are
    /// ignored.
    pub fn delete_edge_from(&mut self, from: usize, to: usize) -> &mut Self {
        if let Some(edge) = self.inner.find_edge(NodeIndex::new(from), NodeIndex::new(to)) {
            self.inner.remove_edge(edge);
        }

        self
    }
}
