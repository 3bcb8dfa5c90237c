//! Mandatory node and edge visits.

use unordered_pair::UnorderedPair;

use crate::grid::Grid;
use crate::solution::GraphSolution;

/// One feature the path is required to pass through.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Visit {
    /// The path must visit this node.
    Node(usize),
    /// The path must traverse this edge.
    Edge(UnorderedPair<usize>),
}

/// Requires the path to visit certain nodes or traverse certain edges.
///
/// A missed requirement only rejects once it is confirmed unreachable, i.e.
/// when every cell around it lies in a closed region; until then the path
/// might still come back for it.
#[derive(Default)]
pub struct RequiredVisit {
    visits: Vec<Visit>,
}

impl RequiredVisit {
    /// A rule with no requirements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a visit to the node at `index`. Chainable.
    pub fn add_node_visit(&mut self, index: usize) -> &mut Self {
        self.visits.push(Visit::Node(index));
        self
    }

    /// Require a traversal of `edge`. Chainable.
    pub fn add_edge_visit(&mut self, edge: UnorderedPair<usize>) -> &mut Self {
        self.visits.push(Visit::Edge(edge));
        self
    }

    /// The configured requirements, in insertion order.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub(crate) fn reject(&self, grid: &Grid, solution: &GraphSolution) -> bool {
        self.visits.iter().any(|visit| match *visit {
            Visit::Node(index) => {
                solution.node_in_closed_region(grid, index) && !solution.visits_node(index)
            }
            Visit::Edge(edge) => {
                solution.edge_in_closed_region(grid, edge) && !solution.visits_edge(edge)
            }
        })
    }
}
