#![warn(missing_docs)]

//! # `serpentine`
//!
//! A solver for closed-path region-division puzzles in the style of The
//! Witness: draw a self-avoiding line along the edges of a rectangular grid
//! from a start node to an exit node, dividing the cells into regions that
//! must satisfy per-board rules. Begin by constructing a [`Grid`], wrap it in
//! a [`GridSolver`] with start and exit nodes, attach [`Rule`]s, and call
//! [`solve()`](GridSolver::solve).
//!
//! # Internals
//! Solving is an exhaustive depth-first backtracking search over partial
//! paths (the [`backtrack`] module). After every extension the induced
//! region decomposition is refreshed. The refresh is incremental: a region
//! can only split when the newest path segment separates two live cells, so
//! every other step reuses the cached tables. A branch dies as soon as any
//! rule can prove no extension will satisfy it, or as soon as the region the
//! head sits in contains no exit. Region decomposition itself is an
//! iterative scanline flood fill over the cells, treating path segments as
//! walls ([`Grid::determine_all_regions`]).

pub use grid::{Grid, RegionId};
pub use location::{Coord, Dimension, Location};
pub use rules::Rule;
pub use solution::{GraphSolution, OpenRegion};
pub use solver::{GridSolver, SolveReport};

pub mod backtrack;
pub mod graph;
pub mod grid;
pub(crate) mod location;
pub mod rules;
pub mod solution;
pub mod solver;
pub(crate) mod step;
mod tests;
