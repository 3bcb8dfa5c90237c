//! Cell category separation.

use std::collections::BTreeMap;

use ndarray::Array2;

use crate::location::Location;
use crate::solution::{GraphSolution, OpenRegion};

/// Identifier of a cell category; equality is the only structure used.
pub type CategoryId = usize;

/// Requires closed regions to keep cell categories separated.
///
/// Two channels are checked independently. Primary categories must not mix: a
/// closed region holding cells of two different primary categories rejects.
/// Pair categories must pair up: a closed region rejects unless each pair id
/// it holds occurs on exactly two of its cells.
pub struct CellCategory {
    categories: Array2<Option<CategoryId>>,
    pair_categories: Array2<Option<CategoryId>>,
}

impl CellCategory {
    /// A rule with no categorized cells, for a board with the given cell
    /// dimensions. Tables are indexed `(cy, cx)`, `ndarray`'s row-major
    /// convention.
    pub fn new(cell_x: usize, cell_y: usize) -> Self {
        Self {
            categories: Array2::default((cell_y, cell_x)),
            pair_categories: Array2::default((cell_y, cell_x)),
        }
    }

    /// Assign a primary category to the cell at `location`. Chainable.
    pub fn add_category_at(&mut self, category: CategoryId, location: Location) -> &mut Self {
        self.categories[(location.1, location.0)] = Some(category);
        self
    }

    /// Assign a pair category to the cell at `location`. Chainable.
    pub fn add_pair_category_at(&mut self, category: CategoryId, location: Location) -> &mut Self {
        self.pair_categories[(location.1, location.0)] = Some(category);
        self
    }

    /// Primary categories, indexed `(cy, cx)`.
    pub fn categories(&self) -> &Array2<Option<CategoryId>> {
        &self.categories
    }

    /// Pair categories, indexed `(cy, cx)`.
    pub fn pair_categories(&self) -> &Array2<Option<CategoryId>> {
        &self.pair_categories
    }

    fn at(table: &Array2<Option<CategoryId>>, cell: usize) -> Option<CategoryId> {
        let cell_x = table.ncols();
        table[(cell / cell_x, cell % cell_x)]
    }

    fn reject_by_category(&self, cells: &[usize]) -> bool {
        let mut seen = None;
        for &cell in cells {
            let Some(category) = Self::at(&self.categories, cell) else {
                continue;
            };
            match seen {
                None => seen = Some(category),
                Some(first) if first != category => return true,
                Some(_) => {}
            }
        }
        false
    }

    fn reject_by_pair(&self, cells: &[usize]) -> bool {
        let mut counts: BTreeMap<CategoryId, usize> = BTreeMap::new();
        for &cell in cells {
            let Some(category) = Self::at(&self.pair_categories, cell) else {
                continue;
            };
            let count = counts.entry(category).or_insert(0);
            *count += 1;
            if *count > 2 {
                return true;
            }
        }
        counts.values().any(|&count| count == 1)
    }

    pub(crate) fn reject(&self, solution: &GraphSolution) -> bool {
        if solution.open_region() == OpenRegion::Indeterminate {
            return false;
        }

        solution.closed_regions().into_iter().any(|region| {
            let cells = solution
                .grouped_regions()
                .get(&region)
                .map(Vec::as_slice)
                .unwrap_or_default();
            self.reject_by_category(cells) || self.reject_by_pair(cells)
        })
    }
}
