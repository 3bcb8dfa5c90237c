//! The grid-level search orchestrator.

use std::cmp::Reverse;

use crate::backtrack::{backtrack, SearchStats};
use crate::grid::Grid;
use crate::rules::Rule;
use crate::solution::{GraphSolution, OpenRegion};

/// Everything a completed or capped search produced.
#[derive(Debug)]
pub struct SolveReport {
    /// Accepted full paths, each a node index sequence, in discovery order.
    pub solutions: Vec<Vec<usize>>,
    /// The first rejected partial paths encountered, up to the sample size
    /// requested. Useful when diagnosing an over-constrained board.
    pub rejections: Vec<Vec<usize>>,
    /// Total search states examined, the rejected ones included.
    pub states_visited: u64,
}

/// Searches a [`Grid`] for paths from a start node to an exit node that
/// satisfy every configured rule.
pub struct GridSolver {
    grid: Grid,
    rules: Vec<Rule>,
    start_nodes: Vec<usize>,
    exit_nodes: Vec<usize>,
    allow_backtrack: bool,
}

impl GridSolver {
    /// A solver over `grid` with no rules yet. With `allow_backtrack` unset,
    /// only paths whose node indices increase monotonically are considered,
    /// which is a cheap mode for boards known to be solvable that way.
    pub fn new(grid: Grid, start_nodes: Vec<usize>, exit_nodes: Vec<usize>, allow_backtrack: bool) -> Self {
        Self {
            grid,
            rules: Vec::new(),
            start_nodes,
            exit_nodes,
            allow_backtrack,
        }
    }

    /// Attach a rule. Chainable.
    pub fn add_rule(&mut self, rule: impl Into<Rule>) -> &mut Self {
        self.rules.push(rule.into());
        self
    }

    /// The board being solved.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The attached rules, in attachment order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Nodes a path may start on.
    pub fn start_nodes(&self) -> &[usize] {
        &self.start_nodes
    }

    /// Nodes a path may end on.
    pub fn exit_nodes(&self) -> &[usize] {
        &self.exit_nodes
    }

    /// True if the node at `index` is a configured exit.
    pub fn is_exit(&self, index: usize) -> bool {
        self.exit_nodes.contains(&index)
    }

    /// True unless the open region is bounded and contains no cell touching
    /// an exit node, in which case the head can never reach an exit and the
    /// branch is dead.
    fn open_region_contains_exit(&self, solution: &GraphSolution) -> bool {
        let OpenRegion::Region(open) = solution.open_region() else {
            return true;
        };
        let Some(cells) = solution.grouped_regions().get(&open) else {
            return false;
        };

        self.exit_nodes.iter().any(|&exit| {
            self.grid
                .cells_bounding_node(exit)
                .iter()
                .any(|cell| cells.contains(cell))
        })
    }

    /// Refresh the solution's region data, then decide whether this partial
    /// path can be discarded along with every extension of it.
    pub fn reject(&self, solution: &mut GraphSolution) -> bool {
        solution.set_regions(&self.grid, self);

        if self.rules.iter().any(|rule| rule.reject(&self.grid, solution)) {
            return true;
        }
        if !self.open_region_contains_exit(solution) {
            return true;
        }
        if !self.allow_backtrack {
            if let (Some(last), Some(previous)) = (solution.last(), solution.previous()) {
                return last < previous;
            }
        }

        false
    }

    /// The nodes the path may extend to: unvisited path-graph neighbors of
    /// the head, ordered farthest index first.
    pub fn choices(&self, solution: &GraphSolution) -> Vec<usize> {
        let Some(last) = solution.last() else {
            return Vec::new();
        };

        let mut available: Vec<usize> = self
            .grid
            .graph()
            .neighbors(last)
            .filter(|&node| !solution.visits_node(node))
            .collect();
        available.sort_by_key(|&node| Reverse(node.abs_diff(last)));
        available
    }

    /// Validate one externally supplied candidate, refreshing its region data
    /// in the process.
    pub fn is_solution(&self, solution: &mut GraphSolution) -> bool {
        solution.last().is_some_and(|last| self.is_exit(last)) && !self.reject(solution)
    }

    /// Search for solutions.
    ///
    /// `limit` caps how many are collected, `None` for an exhaustive search.
    /// `resume` replays from a caller-supplied partial path instead of the
    /// first start node. Up to `sample_rejections` rejected partial paths are
    /// kept for diagnostics.
    ///
    /// # Panics
    ///
    /// Panics if no resume state is given and no start node is configured.
    pub fn solve(
        &self,
        limit: Option<usize>,
        resume: Option<GraphSolution>,
        sample_rejections: usize,
    ) -> SolveReport {
        let start = resume.unwrap_or_else(|| {
            assert!(!self.start_nodes.is_empty(), "no start node configured");
            GraphSolution::new(vec![self.start_nodes[0]])
        });

        let mut solutions = Vec::new();
        let mut rejections = Vec::new();

        let (_, stats): (_, SearchStats) = backtrack(
            start,
            |solution: &mut GraphSolution| {
                let rejected = self.reject(solution);
                if rejected && rejections.len() < sample_rejections {
                    rejections.push(solution.nodes().to_vec());
                }
                rejected
            },
            |solution: &GraphSolution| solution.last().is_some_and(|last| self.is_exit(last)),
            |solution: &GraphSolution| self.choices(solution),
            |solution: &GraphSolution| solutions.push(solution.nodes().to_vec()),
            limit,
        );

        SolveReport {
            solutions,
            rejections,
            states_visited: stats.states_visited,
        }
    }
}
