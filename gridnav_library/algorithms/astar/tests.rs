#[cfg(test)]
mod tests {
    use super::super::{AStar, GridPath, Heuristic, PlanFailure, DIAGONAL_COST};
    use crate::algorithms::occupancy_grid::{ObstacleGrid, OccupancyMap, PredicateMap};
    use crate::messages::GridCell;
    use approx::assert_relative_eq;

    fn cell(x: i32, y: i32) -> GridCell {
        GridCell::new(x, y)
    }

    fn grid_with(width: usize, height: usize, blocked: &[(i32, i32)]) -> ObstacleGrid {
        let mut grid = ObstacleGrid::new(width, height, 1.0);
        for &(x, y) in blocked {
            grid.set_occupied(x, y);
        }
        grid
    }

    /// Every step is 8-adjacent, never blocked, and never cuts a corner
    fn assert_valid(grid: &ObstacleGrid, path: &GridPath, start: GridCell, goal: GridCell) {
        assert_eq!(path.cells.first(), Some(&start));
        assert_eq!(path.cells.last(), Some(&goal));
        for c in &path.cells {
            assert!(grid.in_bounds(c.x, c.y));
            assert!(!grid.is_blocked(c.x, c.y), "path enters blocked cell {:?}", c);
        }
        for w in path.cells.windows(2) {
            assert!(w[0].is_adjacent(&w[1]), "{:?} -> {:?} not adjacent", w[0], w[1]);
            if w[0].is_diagonal_to(&w[1]) {
                assert!(!grid.is_blocked(w[1].x, w[0].y));
                assert!(!grid.is_blocked(w[0].x, w[1].y));
            }
        }
        assert_relative_eq!(path.cost, AStar::path_length(&path.cells), epsilon = 1e-9);
    }

    #[test]
    fn test_straight_line_path() {
        let grid = ObstacleGrid::new(10, 10, 1.0);
        let path = AStar::new().plan(&grid, cell(0, 0), cell(9, 9)).unwrap();

        assert_eq!(path.cells[0], cell(0, 0));
        assert_eq!(path.cells[path.cells.len() - 1], cell(9, 9));
        assert_eq!(path.cells.len(), 10);
        assert_relative_eq!(path.cost, 9.0 * DIAGONAL_COST, epsilon = 1e-9);
    }

    #[test]
    fn test_open_diagonal_has_eleven_cells() {
        let grid = ObstacleGrid::new(20, 20, 1.0);
        let path = AStar::new().plan(&grid, cell(0, 0), cell(10, 10)).unwrap();

        assert_eq!(path.cells.len(), 11);
        for (i, c) in path.cells.iter().enumerate() {
            assert_eq!(*c, cell(i as i32, i as i32));
        }
        assert_relative_eq!(path.cost, 10.0 * DIAGONAL_COST, epsilon = 1e-9);
    }

    #[test]
    fn test_path_around_obstacle() {
        let mut blocked = Vec::new();
        for y in 0..7 {
            blocked.push((10, y));
        }
        for y in 13..20 {
            blocked.push((10, y));
        }
        let grid = grid_with(20, 20, &blocked);

        let path = AStar::new().plan(&grid, cell(0, 10), cell(19, 10)).unwrap();
        let through_gap = path.cells.iter().any(|c| c.x == 10 && c.y >= 7 && c.y <= 12);
        assert!(through_gap);
        assert_valid(&grid, &path, cell(0, 10), cell(19, 10));
    }

    #[test]
    fn test_single_gap_wall() {
        let blocked: Vec<_> = (0..20).filter(|&y| y != 10).map(|y| (5, y)).collect();
        let grid = grid_with(20, 20, &blocked);

        let path = AStar::new().plan(&grid, cell(0, 10), cell(10, 10)).unwrap();
        assert!(path.cells.contains(&cell(5, 10)));
        assert_valid(&grid, &path, cell(0, 10), cell(10, 10));
    }

    #[test]
    fn test_no_path_exists() {
        let blocked: Vec<_> = (0..10).map(|y| (5, y)).collect();
        let grid = grid_with(10, 10, &blocked);

        let result = AStar::new().plan(&grid, cell(0, 0), cell(9, 9));
        assert_eq!(result, Err(PlanFailure::NoPath));
    }

    #[test]
    fn test_enclosed_goal_without_corner_cutting() {
        let grid = grid_with(20, 20, &[(4, 5), (6, 5), (5, 4), (5, 6)]);

        let result = AStar::new().plan(&grid, cell(0, 0), cell(5, 5));
        assert_eq!(result, Err(PlanFailure::NoPath));
    }

    #[test]
    fn test_enclosed_goal_with_corner_cutting() {
        let grid = grid_with(20, 20, &[(4, 5), (6, 5), (5, 4), (5, 6)]);
        let mut astar = AStar::new();
        astar.set_allow_corner_cutting(true);

        let path = astar.plan(&grid, cell(0, 0), cell(5, 5)).unwrap();
        let n = path.cells.len();
        assert_eq!(path.cells[n - 1], cell(5, 5));
        // Only the diagonal neighbors can reach the goal
        assert!(path.cells[n - 2].is_diagonal_to(&path.cells[n - 1]));
    }

    #[test]
    fn test_diagonal_blocked_by_single_corner() {
        // (1,0) blocked: (0,0) -> (1,1) would clip its corner
        let grid = grid_with(3, 3, &[(1, 0)]);
        let path = AStar::new().plan(&grid, cell(0, 0), cell(1, 1)).unwrap();

        assert_eq!(path.cells, vec![cell(0, 0), cell(0, 1), cell(1, 1)]);
        assert_relative_eq!(path.cost, 2.0);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = ObstacleGrid::new(10, 10, 1.0);
        let path = AStar::new().plan(&grid, cell(5, 5), cell(5, 5)).unwrap();

        assert_eq!(path.cells, vec![cell(5, 5)]);
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn test_start_equals_goal_on_blocked_cell() {
        let grid = grid_with(10, 10, &[(5, 5)]);
        let path = AStar::new().plan(&grid, cell(5, 5), cell(5, 5)).unwrap();
        assert_eq!(path.cells.len(), 1);
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let grid = ObstacleGrid::new(20, 20, 1.0);
        let astar = AStar::new();

        assert_eq!(
            astar.plan(&grid, cell(25, 25), cell(1, 1)),
            Err(PlanFailure::StartOutOfBounds)
        );
        assert_eq!(
            astar.plan(&grid, cell(1, 1), cell(-1, 0)),
            Err(PlanFailure::GoalOutOfBounds)
        );
        // Bounds are checked before start == goal
        assert_eq!(
            astar.plan(&grid, cell(20, 0), cell(20, 0)),
            Err(PlanFailure::StartOutOfBounds)
        );
    }

    #[test]
    fn test_obstacle_at_start() {
        let grid = grid_with(20, 20, &[(3, 3)]);
        let result = AStar::new().plan(&grid, cell(3, 3), cell(9, 9));
        assert_eq!(result, Err(PlanFailure::StartBlocked));
        assert!(PlanFailure::StartBlocked.is_invalid_endpoint());
    }

    #[test]
    fn test_obstacle_at_goal() {
        let grid = grid_with(10, 10, &[(9, 9)]);
        let result = AStar::new().plan(&grid, cell(0, 0), cell(9, 9));
        assert_eq!(result, Err(PlanFailure::GoalBlocked));
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(PlanFailure::NoPath.to_string(), "no path exists");
        assert_eq!(PlanFailure::StartBlocked.to_string(), "start blocked");
        assert_eq!(PlanFailure::GoalOutOfBounds.to_string(), "goal out of bounds");
        assert!(!PlanFailure::NoPath.is_invalid_endpoint());
    }

    #[test]
    fn test_heuristics_agree_on_cost() {
        let blocked: Vec<_> = (2..18).map(|y| (8, y)).collect();
        let grid = grid_with(20, 20, &blocked);

        let mut costs = Vec::new();
        for h in [Heuristic::Euclidean, Heuristic::Octile, Heuristic::Zero] {
            let mut astar = AStar::new();
            astar.set_heuristic(h);
            let path = astar.plan(&grid, cell(0, 10), cell(19, 10)).unwrap();
            assert_valid(&grid, &path, cell(0, 10), cell(19, 10));
            costs.push(path.cost);
        }
        assert_relative_eq!(costs[0], costs[1], epsilon = 1e-9);
        assert_relative_eq!(costs[0], costs[2], epsilon = 1e-9);
    }

    #[test]
    fn test_manhattan_heuristic() {
        let mut astar = AStar::new();
        astar.set_heuristic(Heuristic::Manhattan);
        let grid = ObstacleGrid::new(20, 20, 1.0);

        let path = astar.plan(&grid, cell(0, 0), cell(10, 10)).unwrap();
        assert_valid(&grid, &path, cell(0, 0), cell(10, 10));
    }

    #[test]
    fn test_euclidean_expands_fewer_nodes_than_dijkstra() {
        let grid = ObstacleGrid::new(40, 40, 1.0);
        let astar = AStar::new();
        let mut dijkstra = AStar::new();
        dijkstra.set_heuristic(Heuristic::Zero);

        let a = astar.plan(&grid, cell(0, 0), cell(30, 20)).unwrap();
        let d = dijkstra.plan(&grid, cell(0, 0), cell(30, 20)).unwrap();

        assert_relative_eq!(a.cost, d.cost, epsilon = 1e-9);
        assert!(a.nodes_expanded < d.nodes_expanded);
    }

    #[test]
    fn test_no_diagonal_movement() {
        let mut astar = AStar::new();
        astar.set_allow_diagonal(false);
        let grid = ObstacleGrid::new(10, 10, 1.0);

        let path = astar.plan(&grid, cell(0, 0), cell(5, 5)).unwrap();
        // Without diagonals, path length is the Manhattan distance
        assert_relative_eq!(AStar::path_length(&path.cells), 10.0);
        assert!(path.cells.windows(2).all(|w| !w[0].is_diagonal_to(&w[1])));
    }

    #[test]
    fn test_weighted_astar() {
        let blocked: Vec<_> = (0..25).map(|y| (15, y)).collect();
        let grid = grid_with(30, 30, &blocked);

        let mut astar = AStar::new();
        let optimal = astar.plan(&grid, cell(0, 0), cell(29, 0)).unwrap();

        astar.set_heuristic_weight(2.0);
        let weighted = astar.plan(&grid, cell(0, 0), cell(29, 0)).unwrap();

        assert_valid(&grid, &weighted, cell(0, 0), cell(29, 0));
        assert!(weighted.cost >= optimal.cost - 1e-9);
        assert!(weighted.cost <= optimal.cost * 2.0);
    }

    #[test]
    fn test_weight_below_one_is_clamped() {
        let grid = ObstacleGrid::new(10, 10, 1.0);
        let mut astar = AStar::new();
        astar.set_heuristic_weight(0.2);

        let path = astar.plan(&grid, cell(0, 0), cell(9, 3)).unwrap();
        assert_relative_eq!(path.cost, 3.0 * DIAGONAL_COST + 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_search_limit() {
        let grid = ObstacleGrid::new(20, 20, 1.0);
        let mut astar = AStar::new();
        astar.set_max_expansions(Some(5));

        assert_eq!(
            astar.plan(&grid, cell(0, 0), cell(19, 19)),
            Err(PlanFailure::SearchLimitExceeded(5))
        );

        astar.set_max_expansions(Some(10_000));
        assert!(astar.plan(&grid, cell(0, 0), cell(19, 19)).is_ok());
    }

    #[test]
    fn test_deterministic_tie_breaking() {
        // Many equal-cost paths around a block
        let blocked: Vec<_> = (6..14)
            .flat_map(|x| (6..14).map(move |y| (x, y)))
            .collect();
        let grid = grid_with(20, 20, &blocked);
        let astar = AStar::new();

        let first = astar.plan(&grid, cell(0, 0), cell(19, 19)).unwrap();
        for _ in 0..5 {
            let again = astar.plan(&grid, cell(0, 0), cell(19, 19)).unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_large_grid() {
        let grid = ObstacleGrid::new(100, 100, 1.0);
        let path = AStar::new().plan(&grid, cell(10, 10), cell(90, 90)).unwrap();

        assert_eq!(path.cells[0], cell(10, 10));
        assert_eq!(path.cells[path.cells.len() - 1], cell(90, 90));
        assert_eq!(path.cells.len(), 81);
    }

    #[test]
    fn test_narrow_corridor() {
        let mut blocked = Vec::new();
        for x in 0..20 {
            blocked.push((x, 9));
            blocked.push((x, 11));
        }
        let grid = grid_with(20, 20, &blocked);

        let path = AStar::new().plan(&grid, cell(0, 10), cell(19, 10)).unwrap();
        // All path cells should be at y=10 (the corridor)
        for c in &path.cells {
            assert_eq!(c.y, 10);
        }
        assert_eq!(path.cells.len(), 20);
    }

    #[test]
    fn test_maze_like_environment() {
        let mut blocked = Vec::new();
        for i in (2..13).step_by(2) {
            for j in 2..13 {
                if j != 7 {
                    blocked.push((i, j));
                }
            }
        }
        let grid = grid_with(15, 15, &blocked);

        let path = AStar::new().plan(&grid, cell(1, 1), cell(13, 13)).unwrap();
        assert_valid(&grid, &path, cell(1, 1), cell(13, 13));
    }

    #[test]
    fn test_predicate_map_wall_with_gap() {
        // Horizontal wall at y=5 with a gap at x=5
        let map = PredicateMap::new(10, 10, |x, y| y == 5 && x != 5);

        let path = AStar::new().plan(&map, cell(0, 0), cell(9, 9)).unwrap();
        assert!(path.cells.contains(&cell(5, 5)));
    }

    #[test]
    fn test_cleared_obstacle_opens_path() {
        let blocked: Vec<_> = (0..10).map(|y| (5, y)).collect();
        let mut grid = grid_with(10, 10, &blocked);
        let astar = AStar::new();

        assert!(astar.plan(&grid, cell(0, 5), cell(9, 5)).is_err());

        grid.set_free(5, 5);
        let path = astar.plan(&grid, cell(0, 5), cell(9, 5)).unwrap();
        assert!(path.cells.contains(&cell(5, 5)));
    }

    #[test]
    fn test_path_length_calculation() {
        let path = vec![cell(0, 0), cell(1, 0), cell(2, 0), cell(2, 1)];
        assert_relative_eq!(AStar::path_length(&path), 3.0);

        let diagonal = vec![cell(0, 0), cell(1, 1), cell(2, 2)];
        assert_relative_eq!(AStar::path_length(&diagonal), 2.0 * DIAGONAL_COST);
        assert_eq!(AStar::path_length(&[cell(0, 0)]), 0.0);
    }

    #[test]
    fn test_from_params() {
        let mut params = gridnav_core::PlannerParams::default();
        params.allow_diagonal = false;
        params.heuristic = Heuristic::Manhattan;

        let astar = AStar::from_params(&params);
        assert_eq!(astar.heuristic(), Heuristic::Manhattan);

        let grid = ObstacleGrid::new(5, 5, 1.0);
        let path = astar.plan(&grid, cell(0, 0), cell(2, 2)).unwrap();
        assert_eq!(path.cells.len(), 5);
    }
}
