//! Rectangular lattice boards and region decomposition.
//!
//! A [`Grid`] keeps two graphs over the same node index space: a 4-connected
//! path graph (the edges a line may be drawn along) and an 8-connected region
//! graph (used only to tell boundary nodes from interior ones). Cells are the
//! unit squares between nodes; a drawn path divides the live cells into
//! regions, recovered by [`Grid::determine_all_regions`].

use smallvec::SmallVec;
use unordered_pair::UnorderedPair;

use crate::graph::Graph;
use crate::location::{Coord, Dimension, Location};
use crate::step::{PathStep, RegionStep, Step};

/// A 1-based region number; `0` marks a cell not assigned to any region,
/// either dead or not yet classified.
pub type RegionId = usize;

/// True if the drawn `path` traverses the undirected edge `from`-`to`.
pub(crate) fn path_crosses_edge(from: usize, to: usize, path: &[usize]) -> bool {
    let edge = UnorderedPair(from, to);
    path.windows(2).any(|pair| UnorderedPair(pair[0], pair[1]) == edge)
}

fn grid_graph<S: Step>(x: Coord, y: Coord) -> Graph<Location> {
    let nodes = (0..y)
        .flat_map(|ny| (0..x).map(move |nx| Location(nx, ny)))
        .collect::<Vec<_>>();

    let mut edges = Vec::new();
    for (index, &location) in nodes.iter().enumerate() {
        for step in S::FORWARD_VARIANTS {
            let target = step.attempt_from(location);
            if target.0 < x && target.1 < y {
                edges.push((index, target.1 * x + target.0));
            }
        }
    }

    Graph::new(nodes, &edges)
}

/// A rectangular board of `x` by `y` nodes and `(x-1)` by `(y-1)` cells,
/// both indexed row-major from the bottom-left corner.
pub struct Grid {
    x: Coord,
    y: Coord,
    cell_x: Coord,
    cell_y: Coord,
    graph: Graph<Location>,
    region_graph: Graph<Location>,
}

impl Grid {
    /// A fully connected grid with the given node dimensions.
    pub fn new(dims: (Dimension, Dimension)) -> Self {
        let (x, y) = (dims.0.get(), dims.1.get());

        Self {
            x,
            y,
            cell_x: x - 1,
            cell_y: y - 1,
            graph: grid_graph::<PathStep>(x, y),
            region_graph: grid_graph::<RegionStep>(x, y),
        }
    }

    /// Node count along the horizontal axis.
    pub fn x(&self) -> Coord {
        self.x
    }

    /// Node count along the vertical axis.
    pub fn y(&self) -> Coord {
        self.y
    }

    /// Cell count along the horizontal axis.
    pub fn cell_x(&self) -> Coord {
        self.cell_x
    }

    /// Cell count along the vertical axis.
    pub fn cell_y(&self) -> Coord {
        self.cell_y
    }

    /// The 4-connected path graph.
    pub fn graph(&self) -> &Graph<Location> {
        &self.graph
    }

    /// Soft-delete a node from both graphs, punching a hole in the board.
    pub fn delete_node(&mut self, index: usize) -> &mut Self {
        self.graph.delete_node_at(index);
        self.region_graph.delete_node_at(index);
        self
    }

    /// Remove a path edge. An endpoint left with no path edges at all is also
    /// dropped from the region graph, so it counts as dead rather than as a
    /// boundary node.
    pub fn delete_edge_from(&mut self, from: usize, to: usize) -> &mut Self {
        self.graph.delete_edge_from(from, to);
        for node in [from, to] {
            if !self.graph.node_is_connected(node) {
                self.region_graph.delete_node_at(node);
            }
        }
        self
    }

    /// True while all four corner nodes of the cell at `(cx, cy)` are alive.
    /// Recomputed from connectivity on every call, so deletions take effect
    /// immediately.
    pub fn cell_exists(&self, cx: Coord, cy: Coord) -> bool {
        if cx >= self.cell_x || cy >= self.cell_y {
            return false;
        }

        let bottom_left = cy * self.x + cx;
        let top_left = (cy + 1) * self.x + cx;
        [bottom_left, bottom_left + 1, top_left, top_left + 1]
            .into_iter()
            .all(|node| self.graph.node_is_connected(node))
    }

    /// Row-major index of the cell at `location`.
    pub fn cell_index(&self, location: Location) -> usize {
        location.1 * self.cell_x + location.0
    }

    /// Location of the cell with row-major `index`.
    pub fn cell_location(&self, index: usize) -> Location {
        Location(index % self.cell_x, index / self.cell_x)
    }

    /// Row-major index of the node at `location`.
    pub fn node_index(&self, location: Location) -> usize {
        location.1 * self.x + location.0
    }

    /// Every cell location in row-major order, dead cells included.
    pub fn iterate_cells(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.cell_x * self.cell_y).map(|index| self.cell_location(index))
    }

    /// Indices of the live cells touching the node at `index`, at most four.
    pub fn cells_bounding_node(&self, index: usize) -> SmallVec<[usize; 4]> {
        let node = Location(index % self.x, index / self.x);
        [(0, 0), (-1, 0), (0, -1), (-1, -1)]
            .into_iter()
            .map(|offset| node.offset_by(offset))
            .filter(|cell| self.cell_exists(cell.0, cell.1))
            .map(|cell| self.cell_index(cell))
            .collect()
    }

    /// Indices of the live cells on either side of a path edge, at most two.
    /// Returns an empty list for a pair of nodes that are not lattice
    /// neighbors.
    pub fn cells_bounding_edge(&self, edge: UnorderedPair<usize>) -> SmallVec<[usize; 2]> {
        let (low, high) = (edge.0.min(edge.1), edge.0.max(edge.1));
        let node = Location(low % self.x, low / self.x);

        let candidates: [Location; 2] = if high == low + 1 {
            // horizontal edge, cells above and below
            [node, node.offset_by((0, -1))]
        } else if high == low + self.x {
            // vertical edge, cells right and left
            [node, node.offset_by((-1, 0))]
        } else {
            return SmallVec::new();
        };

        candidates
            .into_iter()
            .filter(|cell| self.cell_exists(cell.0, cell.1))
            .map(|cell| self.cell_index(cell))
            .collect()
    }

    /// True for nodes on the board boundary, next to a hole, or dead; only an
    /// interior node keeps all eight region-graph neighbors.
    pub fn is_edge_node(&self, index: usize) -> bool {
        self.region_graph.degree(index) < 8
    }

    /// True if the cells at `(cx, cy)` and `(cx, cy + dy)` both exist and the
    /// path does not cross their shared horizontal edge. `dy` is 1 or -1.
    fn connected_vertical(&self, cx: Coord, cy: Coord, path: &[usize], dy: isize) -> bool {
        let neighbor = Location(cx, cy).offset_by((0, dy));
        if !self.cell_exists(neighbor.0, neighbor.1) {
            return false;
        }

        let shared_row = if dy == 1 { cy + 1 } else { cy };
        let first = shared_row * self.x + cx;
        !path_crosses_edge(first, first + 1, path)
    }

    /// Horizontal counterpart of [`Self::connected_vertical`]; the shared edge
    /// is vertical, spanning one row of `x` nodes.
    fn connected_horizontal(&self, cx: Coord, cy: Coord, path: &[usize], dx: isize) -> bool {
        let neighbor = Location(cx, cy).offset_by((dx, 0));
        if !self.cell_exists(neighbor.0, neighbor.1) {
            return false;
        }

        let shared_column = if dx == 1 { cx + 1 } else { cx };
        let first = cy * self.x + shared_column;
        !path_crosses_edge(first, first + self.x, path)
    }

    fn connected_up(&self, cx: Coord, cy: Coord, path: &[usize], regions: &[RegionId]) -> bool {
        cy + 1 < self.cell_y
            && regions[self.cell_index(Location(cx, cy + 1))] == 0
            && self.connected_vertical(cx, cy, path, 1)
    }

    fn connected_down(&self, cx: Coord, cy: Coord, path: &[usize], regions: &[RegionId]) -> bool {
        cy > 0
            && regions[self.cell_index(Location(cx, cy - 1))] == 0
            && self.connected_vertical(cx, cy, path, -1)
    }

    fn connected_right(&self, cx: Coord, cy: Coord, path: &[usize], regions: &[RegionId]) -> bool {
        cx + 1 < self.cell_x
            && regions[self.cell_index(Location(cx + 1, cy))] == 0
            && self.connected_horizontal(cx, cy, path, 1)
    }

    fn connected_left(&self, cx: Coord, cy: Coord, path: &[usize], regions: &[RegionId]) -> bool {
        cx > 0
            && regions[self.cell_index(Location(cx - 1, cy))] == 0
            && self.connected_horizontal(cx, cy, path, -1)
    }

    /// Scanline flood fill from `seed`, labelling every reachable unlabelled
    /// cell with `region_number`. Reachability treats two adjacent live cells
    /// as connected unless `path` crosses their shared edge.
    fn flood_fill(&self, seed: Location, path: &[usize], regions: &mut [RegionId], region_number: RegionId) {
        let mut stack: Vec<Location> = vec![seed];

        while let Some(Location(mut x, y)) = stack.pop() {
            if !self.cell_exists(x, y) {
                continue;
            }

            while self.connected_left(x, y, path, regions) {
                x -= 1;
            }

            let mut span_above = false;
            let mut span_below = false;
            loop {
                let up = self.connected_up(x, y, path, regions);
                // A span continuing above can still be severed from its left
                // neighbor by a crossing path segment; push again at the split.
                let up_left = !up || self.connected_left(x, y + 1, path, regions);
                if up && (!span_above || !up_left) {
                    stack.push(Location(x, y + 1));
                }
                span_above = up;

                let down = self.connected_down(x, y, path, regions);
                let down_left = !down || self.connected_left(x, y - 1, path, regions);
                if down && (!span_below || !down_left) {
                    stack.push(Location(x, y - 1));
                }
                span_below = down;

                regions[self.cell_index(Location(x, y))] = region_number;

                if !self.connected_right(x, y, path, regions) {
                    break;
                }
                x += 1;
            }
        }
    }

    /// Classify every live cell into a region of the board as divided by
    /// `path`. The returned table maps cell index to a 1-based region number;
    /// dead cells stay `0` and never consume a number.
    pub fn determine_all_regions(&self, path: &[usize]) -> Vec<RegionId> {
        let mut regions = vec![0; self.cell_x * self.cell_y];
        let mut region_number = 1;

        for index in 0..regions.len() {
            if regions[index] != 0 {
                continue;
            }
            let seed = self.cell_location(index);
            if !self.cell_exists(seed.0, seed.1) {
                continue;
            }
            self.flood_fill(seed, path, &mut regions, region_number);
            region_number += 1;
        }

        regions
    }
}
