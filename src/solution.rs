//! Candidate paths and their region bookkeeping.

use std::collections::BTreeMap;
use std::rc::Rc;

use unordered_pair::UnorderedPair;

use crate::backtrack::SearchState;
use crate::grid::{path_crosses_edge, Grid, RegionId};
use crate::solver::GridSolver;

/// Classification of the region the path head currently sits in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OpenRegion {
    /// The head's bounding cells disagree, or there are none, or the path is
    /// empty: the path may still enter any region.
    Indeterminate,
    /// The head is an exit, so every region is sealed.
    AllClosed,
    /// Every cell around the head lies in this region; it is the only region
    /// the path can still enter.
    Region(RegionId),
}

/// A (possibly partial) drawn path and the region decomposition it induces.
///
/// Region tables are shared between a state and its branches through [`Rc`]
/// and replaced wholesale on recomputation, never mutated through a shared
/// handle, so branching is a cheap copy of the path alone.
#[derive(Clone, Debug)]
pub struct GraphSolution {
    path: Vec<usize>,
    regions: Rc<Vec<RegionId>>,
    grouped: Rc<BTreeMap<RegionId, Vec<usize>>>,
    open: OpenRegion,
}

impl GraphSolution {
    /// A path visiting the given nodes, with no region data yet; call
    /// [`Self::set_regions`] before consulting any region query.
    pub fn new(path: Vec<usize>) -> Self {
        Self {
            path,
            regions: Rc::new(Vec::new()),
            grouped: Rc::new(BTreeMap::new()),
            open: OpenRegion::Indeterminate,
        }
    }

    /// This path extended by one node, sharing the parent's region tables
    /// until the next [`Self::set_regions`].
    pub fn clone_with(&self, node: usize) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(node);

        Self {
            path,
            regions: Rc::clone(&self.regions),
            grouped: Rc::clone(&self.grouped),
            open: self.open,
        }
    }

    /// The node the path currently ends on.
    pub fn last(&self) -> Option<usize> {
        self.path.last().copied()
    }

    /// The node before the head.
    pub fn previous(&self) -> Option<usize> {
        self.path.len().checked_sub(2).map(|index| self.path[index])
    }

    /// The visited nodes in drawing order.
    pub fn nodes(&self) -> &[usize] {
        &self.path
    }

    /// Per-cell region numbers, in cell index order; `0` marks dead cells.
    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// Region number to ordered member cell indices.
    pub fn grouped_regions(&self) -> &BTreeMap<RegionId, Vec<usize>> {
        &self.grouped
    }

    /// The region numbers in use, ascending. Not necessarily contiguous on a
    /// board with holes.
    pub fn all_regions(&self) -> Vec<RegionId> {
        self.grouped.keys().copied().collect()
    }

    /// Classification of the head's region.
    pub fn open_region(&self) -> OpenRegion {
        self.open
    }

    /// The regions the path can no longer enter: all but the open one, all of
    /// them once the head is at an exit, none while indeterminate.
    pub fn closed_regions(&self) -> Vec<RegionId> {
        match self.open {
            OpenRegion::Indeterminate => Vec::new(),
            OpenRegion::AllClosed => self.all_regions(),
            OpenRegion::Region(open) => self
                .grouped
                .keys()
                .copied()
                .filter(|&region| region != open)
                .collect(),
        }
    }

    /// True if the path visits the node at `index`.
    pub fn visits_node(&self, index: usize) -> bool {
        self.path.contains(&index)
    }

    /// True if the path traverses `edge`.
    pub fn visits_edge(&self, edge: UnorderedPair<usize>) -> bool {
        path_crosses_edge(edge.0, edge.1, &self.path)
    }

    fn cells_all_closed(&self, cells: &[usize]) -> bool {
        match self.open {
            OpenRegion::Indeterminate => false,
            OpenRegion::AllClosed => true,
            OpenRegion::Region(open) => {
                !cells.is_empty() && cells.iter().all(|&cell| self.regions[cell] != open)
            }
        }
    }

    /// True once every cell around the node at `index` is sealed off from the
    /// path head, so no future extension can reach the node.
    pub fn node_in_closed_region(&self, grid: &Grid, index: usize) -> bool {
        self.cells_all_closed(&grid.cells_bounding_node(index))
    }

    /// Edge counterpart of [`Self::node_in_closed_region`].
    pub fn edge_in_closed_region(&self, grid: &Grid, edge: UnorderedPair<usize>) -> bool {
        self.cells_all_closed(&grid.cells_bounding_edge(edge))
    }

    fn set_open_region(&mut self, grid: &Grid, solver: &GridSolver) {
        let Some(last) = self.last() else {
            self.open = OpenRegion::Indeterminate;
            return;
        };
        if solver.is_exit(last) {
            self.open = OpenRegion::AllClosed;
            return;
        }

        let mut agreed = None;
        for cell in grid.cells_bounding_node(last) {
            let region = self.regions[cell];
            match agreed {
                None => agreed = Some(region),
                Some(seen) if seen != region => {
                    self.open = OpenRegion::Indeterminate;
                    return;
                }
                Some(_) => {}
            }
        }

        self.open = match agreed {
            Some(region) => OpenRegion::Region(region),
            None => OpenRegion::Indeterminate,
        };
    }

    fn group_regions(regions: &[RegionId]) -> BTreeMap<RegionId, Vec<usize>> {
        let mut grouped: BTreeMap<RegionId, Vec<usize>> = BTreeMap::new();
        for (cell, &region) in regions.iter().enumerate() {
            if region != 0 {
                grouped.entry(region).or_default().push(cell);
            }
        }
        grouped
    }

    /// True if the most recently drawn segment runs between two live cells.
    /// Only such a segment removes a cell adjacency, so only such a step can
    /// split a region; segments along the board boundary or alongside a hole
    /// touch at most one live cell and leave the partition untouched.
    fn last_step_severs(&self, grid: &Grid) -> bool {
        match (self.previous(), self.last()) {
            (Some(previous), Some(last)) => {
                grid.cells_bounding_edge(UnorderedPair(previous, last)).len() == 2
            }
            _ => false,
        }
    }

    /// Bring the region tables and open-region classification up to date with
    /// the current path.
    ///
    /// The cached table is reused, with only the classification refreshed,
    /// unless it is empty or the newest segment could have split a region.
    /// Recomputing is idempotent either way.
    pub fn set_regions(&mut self, grid: &Grid, solver: &GridSolver) {
        if !self.regions.is_empty() && !self.last_step_severs(grid) {
            self.set_open_region(grid, solver);
            return;
        }

        let regions = grid.determine_all_regions(&self.path);
        self.grouped = Rc::new(Self::group_regions(&regions));
        self.regions = Rc::new(regions);
        self.set_open_region(grid, solver);
    }
}

impl SearchState for GraphSolution {
    type Choice = usize;

    fn branch(&self, choice: usize) -> Self {
        self.clone_with(choice)
    }
}
