use std::num::NonZero;

/// Scalar coordinate for node and cell positions.
pub type Coord = usize;
/// One side length of a grid, which must be positive.
pub type Dimension = NonZero<Coord>;

/// A position on the grid in `(x, y)` order, counting up and to the right
/// from the bottom-left corner. Depending on context this names a node on the
/// lattice or a cell between nodes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// Offset this location by a signed amount on each axis, wrapping on
    /// underflow; wrapped results fail the bounds check of whichever grid
    /// consumes them.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}
