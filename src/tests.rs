#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use unordered_pair::UnorderedPair;

    use crate::grid::Grid;
    use crate::rules::{CellCategory, RequiredVisit, TetrisRule};
    use crate::solution::{GraphSolution, OpenRegion};
    use crate::solver::GridSolver;
    use crate::Location;

    fn square_grid(side: usize) -> Grid {
        let side = NonZero::new(side).unwrap();
        Grid::new((side, side))
    }

    /// Bottom-left corner to top-right corner on a 3x3-node board.
    fn three_by_three() -> GridSolver {
        GridSolver::new(square_grid(3), vec![0], vec![8], true)
    }

    fn four_by_four() -> GridSolver {
        GridSolver::new(square_grid(4), vec![0], vec![15], true)
    }

    #[test]
    fn unconstrained_corner_to_corner() {
        let report = three_by_three().solve(None, None, 0);
        assert_eq!(report.solutions.len(), 12);
        assert_eq!(report.states_visited, 47);
        assert!(report.rejections.is_empty());

        // every solution is a self-avoiding start-to-exit walk
        for solution in &report.solutions {
            assert_eq!(solution.first(), Some(&0));
            assert_eq!(solution.last(), Some(&8));
            let mut seen = solution.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), solution.len());
        }
    }

    #[test]
    fn unconstrained_four_by_four() {
        let report = four_by_four().solve(None, None, 0);
        assert_eq!(report.solutions.len(), 184);
    }

    #[test]
    fn required_node_visit() {
        let mut solver = three_by_three();
        let mut rule = RequiredVisit::new();
        rule.add_node_visit(4);
        solver.add_rule(rule);

        let report = solver.solve(None, None, 0);
        assert_eq!(report.solutions.len(), 10);
        assert!(report.solutions.iter().all(|path| path.contains(&4)));
    }

    #[test]
    fn required_edge_visit() {
        let mut solver = three_by_three();
        let mut rule = RequiredVisit::new();
        rule.add_edge_visit(UnorderedPair(0, 1));
        solver.add_rule(rule);

        let report = solver.solve(None, None, 0);
        assert_eq!(report.solutions.len(), 6);
        assert!(report.solutions.iter().all(|path| path[..2] == [0, 1]));
    }

    #[test]
    fn separated_categories() {
        let mut solver = three_by_three();
        let mut rule = CellCategory::new(2, 2);
        rule.add_category_at(1, Location(0, 0)).add_category_at(2, Location(1, 1));
        solver.add_rule(rule);

        let report = solver.solve(None, None, 0);
        assert_eq!(report.solutions.len(), 8);
    }

    #[test]
    fn paired_categories() {
        let mut solver = three_by_three();
        let mut rule = CellCategory::new(2, 2);
        rule.add_pair_category_at(7, Location(0, 0))
            .add_pair_category_at(7, Location(0, 1));
        solver.add_rule(rule);

        let report = solver.solve(None, None, 0);
        assert_eq!(report.solutions.len(), 7);
    }

    #[test]
    fn rejection_sampling() {
        let mut solver = three_by_three();
        let mut rule = CellCategory::new(2, 2);
        rule.add_category_at(1, Location(0, 0)).add_category_at(2, Location(1, 1));
        solver.add_rule(rule);

        let report = solver.solve(None, None, 2);
        assert_eq!(report.rejections.len(), 2);
        // sampled rejections are partial paths from the start node
        assert!(report.rejections.iter().all(|path| path.first() == Some(&0)));
    }

    #[test]
    fn monotonic_mode() {
        let solver = GridSolver::new(square_grid(3), vec![0], vec![8], false);
        let report = solver.solve(None, None, 0);
        assert_eq!(report.solutions.len(), 6);
        assert!(report
            .solutions
            .iter()
            .all(|path| path.windows(2).all(|pair| pair[0] < pair[1])));
    }

    #[test]
    fn solution_cap_is_exact() {
        let report = three_by_three().solve(Some(5), None, 0);
        assert_eq!(report.solutions.len(), 5);

        let uncapped = three_by_three().solve(Some(100), None, 0);
        assert_eq!(uncapped.solutions.len(), 12);
    }

    #[test]
    fn resume_from_partial_path() {
        let solver = three_by_three();
        let resumed = solver.solve(None, Some(GraphSolution::new(vec![0, 1])), 0);
        assert_eq!(resumed.solutions.len(), 6);
        assert!(resumed.solutions.iter().all(|path| path[..2] == [0, 1]));
    }

    #[test]
    fn holes_restrict_solutions() {
        let mut grid = square_grid(3);
        grid.delete_node(4);
        let solver = GridSolver::new(grid, vec![0], vec![8], true);
        let report = solver.solve(None, None, 0);
        // only the two perimeter walks survive
        assert_eq!(report.solutions.len(), 2);
    }

    #[test]
    fn rotatable_l_block() {
        let mut solver = four_by_four();
        let mut rule = TetrisRule::new();
        rule.add_l_block(Location(0, 0), 0, true);
        solver.add_rule(rule);

        let report = solver.solve(None, None, 0);
        assert_eq!(report.solutions.len(), 8);
    }

    #[test]
    fn square_block() {
        let mut solver = four_by_four();
        let mut rule = TetrisRule::new();
        rule.add_square_block(Location(0, 0));
        solver.add_rule(rule);

        let report = solver.solve(None, None, 0);
        assert_eq!(report.solutions.len(), 2);
    }

    #[test]
    fn is_solution_validates_candidates() {
        let solver = three_by_three();

        let mut valid = GraphSolution::new(vec![0, 1, 4, 7, 8]);
        assert!(solver.is_solution(&mut valid));

        // ends short of the exit
        let mut short = GraphSolution::new(vec![0, 1, 4, 7]);
        assert!(!solver.is_solution(&mut short));

        let mut solver = three_by_three();
        let mut rule = RequiredVisit::new();
        rule.add_node_visit(3);
        solver.add_rule(rule);
        let mut skipping = GraphSolution::new(vec![0, 1, 4, 7, 8]);
        assert!(!solver.is_solution(&mut skipping));
    }

    /// Asserts the incremental region refresh matches a from-scratch
    /// recomputation at every state of the whole search tree under `solver`.
    fn walk_comparing_refreshes(solver: &GridSolver, solution: &GraphSolution) {
        let mut incremental = solution.clone();
        incremental.set_regions(solver.grid(), solver);

        let mut fresh = GraphSolution::new(solution.nodes().to_vec());
        fresh.set_regions(solver.grid(), solver);

        assert_eq!(incremental.regions(), fresh.regions(), "at {:?}", solution.nodes());
        assert_eq!(incremental.open_region(), fresh.open_region(), "at {:?}", solution.nodes());

        let mut pruned = incremental.clone();
        if solver.reject(&mut pruned) {
            return;
        }
        for choice in solver.choices(&incremental) {
            walk_comparing_refreshes(solver, &incremental.clone_with(choice));
        }
    }

    #[test]
    fn incremental_regions_match_full_recompute() {
        let mut solver = three_by_three();
        let mut rule = RequiredVisit::new();
        rule.add_node_visit(4);
        solver.add_rule(rule);

        walk_comparing_refreshes(&solver, &GraphSolution::new(vec![0]));
    }

    #[test]
    fn incremental_regions_match_around_a_hole() {
        // every node ringing the hole is a boundary node, so regions split on
        // boundary-to-boundary steps here
        let mut grid = square_grid(4);
        grid.delete_node(5);
        let solver = GridSolver::new(grid, vec![0], vec![15], true);

        walk_comparing_refreshes(&solver, &GraphSolution::new(vec![0]));
    }

    #[test]
    fn incremental_regions_match_on_a_two_node_tall_board() {
        let grid = Grid::new((NonZero::new(5).unwrap(), NonZero::new(2).unwrap()));
        let solver = GridSolver::new(grid, vec![0], vec![9], true);

        walk_comparing_refreshes(&solver, &GraphSolution::new(vec![0]));
    }

    /// Every path `solve` emits must pass candidate validation when rebuilt
    /// from scratch, holes included.
    #[test]
    fn emitted_solutions_pass_validation_on_a_board_with_a_hole() {
        let mut grid = square_grid(5);
        grid.delete_node(12);
        let mut solver = GridSolver::new(grid, vec![10], vec![24], true);
        // a pair category straddling the pocket that can seal against the hole
        let mut rule = CellCategory::new(4, 4);
        rule.add_pair_category_at(3, Location(0, 1))
            .add_pair_category_at(3, Location(0, 2));
        solver.add_rule(rule);

        let report = solver.solve(None, None, 0);
        assert!(!report.solutions.is_empty());
        for path in &report.solutions {
            let mut candidate = GraphSolution::new(path.clone());
            assert!(solver.is_solution(&mut candidate), "emitted {:?}", path);
        }
    }

    #[test]
    fn open_region_classification() {
        let solver = three_by_three();

        let mut hugging = GraphSolution::new(vec![0, 1]);
        hugging.set_regions(solver.grid(), &solver);
        assert_eq!(hugging.open_region(), OpenRegion::Region(1));

        let mut splitting = GraphSolution::new(vec![0, 1, 4, 7]);
        splitting.set_regions(solver.grid(), &solver);
        assert_eq!(splitting.open_region(), OpenRegion::Indeterminate);

        let mut finished = GraphSolution::new(vec![0, 1, 4, 7, 8]);
        finished.set_regions(solver.grid(), &solver);
        assert_eq!(finished.open_region(), OpenRegion::AllClosed);
        assert_eq!(finished.all_regions(), vec![1, 2]);
    }
}
