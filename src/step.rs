use strum::VariantArray;

use crate::location::Location;

/// A unit move between lattice nodes, used while wiring up grid graphs.
pub(crate) trait Step: Copy + VariantArray {
    /// Directions which step to a higher node index. Emitting edges only along
    /// these yields each undirected edge exactly once.
    const FORWARD_VARIANTS: &'static [Self];

    /// Attempt the step from `location`, wrapping out of bounds.
    fn attempt_from(&self, location: Location) -> Location;
}

/// 4-connected steps along drawable path edges.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug)]
pub(crate) enum PathStep {
    Up,
    Down,
    Left,
    Right,
}

impl Step for PathStep {
    const FORWARD_VARIANTS: &'static [Self] = &[Self::Up, Self::Right];

    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, 1)),
            Self::Down => location.offset_by((0, -1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }
}

/// 8-connected steps, used only to classify boundary versus interior nodes.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug)]
pub(crate) enum RegionStep {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Step for RegionStep {
    const FORWARD_VARIANTS: &'static [Self] = &[Self::Up, Self::UpLeft, Self::UpRight, Self::Right];

    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, 1)),
            Self::UpRight => location.offset_by((1, 1)),
            Self::Right => location.offset_by((1, 0)),
            Self::DownRight => location.offset_by((1, -1)),
            Self::Down => location.offset_by((0, -1)),
            Self::DownLeft => location.offset_by((-1, -1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::UpLeft => location.offset_by((-1, 1)),
        }
    }
}
