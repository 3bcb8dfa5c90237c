//! Polyomino packing of closed regions.

use bit_set::BitSet;
use itertools::Itertools;

use crate::grid::{Grid, RegionId};
use crate::location::Location;
use crate::solution::{GraphSolution, OpenRegion};

/// A cell of a block shape, relative to the shape's normalization base.
pub type CellOffset = (isize, isize);

/// Translate a cell set so its rightmost-then-topmost cell sits at the
/// origin, listing cells in that same descending order. Orientation is
/// preserved; any two translations of one shape normalize identically.
pub fn normalized(cells: &[CellOffset]) -> Vec<CellOffset> {
    let mut sorted = cells.to_vec();
    sorted.sort_by_key(|&(x, y)| (std::cmp::Reverse(x), std::cmp::Reverse(y)));
    let (base_x, base_y) = sorted[0];
    sorted
        .into_iter()
        .map(|(x, y)| (x - base_x, y - base_y))
        .collect()
}

/// The shape turned 90° clockwise, re-normalized.
pub fn rotated_right(cells: &[CellOffset]) -> Vec<CellOffset> {
    let turned = cells.iter().map(|&(x, y)| (-y, x)).collect::<Vec<_>>();
    normalized(&turned)
}

/// The shape flipped across the vertical axis, re-normalized.
pub fn mirrored(cells: &[CellOffset]) -> Vec<CellOffset> {
    let flipped = cells.iter().map(|&(x, y)| (-x, y)).collect::<Vec<_>>();
    normalized(&flipped)
}

/// A polyomino anchored to one cell of the board.
pub struct TetrisBlock {
    location: Location,
    rotations: Vec<Vec<CellOffset>>,
}

impl TetrisBlock {
    /// A block of the given shape, anchored at the cell `location`. A
    /// rotatable block may be placed in any of its distinct 90° orientations;
    /// symmetric duplicates are pruned, so a square contributes one
    /// orientation and a bar two.
    pub fn new(cells: &[CellOffset], location: Location, rotatable: bool) -> Self {
        let base = normalized(cells);
        let mut rotations = vec![base];
        if rotatable {
            let mut current = rotations[0].clone();
            for _ in 0..3 {
                current = rotated_right(&current);
                if !rotations.contains(&current) {
                    rotations.push(current.clone());
                }
            }
        }

        Self { location, rotations }
    }

    /// The cell this block is anchored to, which decides the region it must
    /// be packed into.
    pub fn location(&self) -> Location {
        self.location
    }

    /// The distinct orientations this block may be placed in.
    pub fn rotations(&self) -> &[Vec<CellOffset>] {
        &self.rotations
    }

    /// Number of cells the block covers.
    pub fn size(&self) -> usize {
        self.rotations[0].len()
    }
}

/// Requires every closed region holding blocks to be exactly tiled by them.
///
/// A block belongs to the region its anchor cell lies in. For each closed
/// region with blocks, the block cell total must equal the region size, and
/// some assignment of one placement per block must cover the region with no
/// overlap. Regions without blocks are unconstrained.
#[derive(Default)]
pub struct TetrisRule {
    blocks: Vec<TetrisBlock>,
}

impl TetrisRule {
    /// A rule with no blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block of an arbitrary shape. Chainable.
    pub fn add_block(&mut self, cells: &[CellOffset], location: Location, rotatable: bool) -> &mut Self {
        self.blocks.push(TetrisBlock::new(cells, location, rotatable));
        self
    }

    /// Add an L tetromino, pre-turned clockwise `right_rotations` times.
    pub fn add_l_block(&mut self, location: Location, right_rotations: usize, rotatable: bool) -> &mut Self {
        let mut cells = vec![(0, 0), (1, 0), (2, 0), (0, 1)];
        for _ in 0..right_rotations {
            cells = rotated_right(&cells);
        }
        self.add_block(&cells, location, rotatable)
    }

    /// Add a 2×2 square block.
    pub fn add_square_block(&mut self, location: Location) -> &mut Self {
        self.add_block(&[(0, 0), (0, 1), (1, 0), (1, 1)], location, true)
    }

    /// The configured blocks, in insertion order.
    pub fn blocks(&self) -> &[TetrisBlock] {
        &self.blocks
    }

    /// Every way `block` can be laid down inside the region given by `cells`
    /// (ascending global cell indices), one occupancy mask per placement.
    fn placements(&self, grid: &Grid, block: &TetrisBlock, cells: &[usize]) -> Vec<BitSet> {
        let region: BitSet = cells.iter().copied().collect();
        let mut masks = Vec::new();

        for &anchor in cells {
            let base = grid.cell_location(anchor);
            'rotations: for rotation in block.rotations() {
                let mut mask = BitSet::new();
                for &(dx, dy) in rotation {
                    let (Some(px), Some(py)) =
                        (base.0.checked_add_signed(dx), base.1.checked_add_signed(dy))
                    else {
                        continue 'rotations;
                    };
                    if px >= grid.cell_x() || py >= grid.cell_y() {
                        continue 'rotations;
                    }
                    let cell = grid.cell_index(Location(px, py));
                    if !region.contains(cell) {
                        continue 'rotations;
                    }
                    mask.insert(cell);
                }
                masks.push(mask);
            }
        }

        masks
    }

    /// True if some choice of one placement per block tiles the region
    /// exactly. Enumerated odometer-style over the placement lists.
    fn tileable(&self, grid: &Grid, blocks: &[&TetrisBlock], cells: &[usize]) -> bool {
        let mut placements = Vec::with_capacity(blocks.len());
        for block in blocks {
            let masks = self.placements(grid, block, cells);
            if masks.is_empty() {
                return false;
            }
            placements.push(masks);
        }

        placements
            .iter()
            .map(|masks| masks.iter())
            .multi_cartesian_product()
            .any(|combination| {
                let mut used = BitSet::new();
                for mask in combination.into_iter() {
                    if !used.is_disjoint(mask) {
                        return false;
                    }
                    used.union_with(mask);
                }
                used.len() == cells.len()
            })
    }

    fn block_region(&self, grid: &Grid, solution: &GraphSolution, block: &TetrisBlock) -> Option<RegionId> {
        let location = block.location();
        if location.0 >= grid.cell_x() || location.1 >= grid.cell_y() {
            return None;
        }
        match solution.regions()[grid.cell_index(location)] {
            0 => None,
            region => Some(region),
        }
    }

    pub(crate) fn reject(&self, grid: &Grid, solution: &GraphSolution) -> bool {
        if solution.open_region() == OpenRegion::Indeterminate {
            return false;
        }

        for region in solution.closed_regions() {
            let blocks: Vec<&TetrisBlock> = self
                .blocks
                .iter()
                .filter(|block| self.block_region(grid, solution, block) == Some(region))
                .collect();
            if blocks.is_empty() {
                continue;
            }

            let cells = solution
                .grouped_regions()
                .get(&region)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let total: usize = blocks.iter().map(|block| block.size()).sum();
            if total != cells.len() {
                return true;
            }
            if !self.tileable(grid, &blocks, cells) {
                return true;
            }
        }

        false
    }
}
