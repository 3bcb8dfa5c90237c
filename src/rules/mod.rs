//! Puzzle rules that prune the path search.
//!
//! [`Rule`] is a closed sum of every rule kind the engine understands,
//! dispatched by `match`. A rule's single capability is rejection: given the
//! board and a region-classified partial path, decide whether no extension of
//! that path can ever satisfy it. Rejection is monotone, so a rejected
//! partial path prunes its whole subtree, and a logical reject never panics.

mod cell_category;
mod required_visit;
mod tetris;

pub use cell_category::{CategoryId, CellCategory};
pub use required_visit::{RequiredVisit, Visit};
pub use tetris::{mirrored, normalized, rotated_right, CellOffset, TetrisBlock, TetrisRule};

use crate::grid::Grid;
use crate::solution::GraphSolution;

/// Any rule a board can carry.
pub enum Rule {
    /// Closed regions must not mix cell categories.
    CellCategory(CellCategory),
    /// Certain nodes or edges must lie on the path.
    RequiredVisit(RequiredVisit),
    /// Closed regions holding blocks must be exactly tileable by them.
    Tetris(TetrisRule),
}

impl Rule {
    /// True if `solution` (or any extension of it) cannot satisfy this rule.
    pub fn reject(&self, grid: &Grid, solution: &GraphSolution) -> bool {
        match self {
            Self::CellCategory(rule) => rule.reject(solution),
            Self::RequiredVisit(rule) => rule.reject(grid, solution),
            Self::Tetris(rule) => rule.reject(grid, solution),
        }
    }
}

impl From<CellCategory> for Rule {
    fn from(rule: CellCategory) -> Self {
        Self::CellCategory(rule)
    }
}

impl From<RequiredVisit> for Rule {
    fn from(rule: RequiredVisit) -> Self {
        Self::RequiredVisit(rule)
    }
}

impl From<TetrisRule> for Rule {
    fn from(rule: TetrisRule) -> Self {
        Self::Tetris(rule)
    }
}
