//! A* Grid Pathfinding
//!
//! Optimal path search over a bounded grid with 8-connected (or 4-connected)
//! movement.
//!
//! # Features
//!
//! - Euclidean (default), octile, Manhattan and zero (Dijkstra) heuristics
//! - Diagonal moves cost `sqrt(2)`, orthogonal moves cost `1.0`
//! - Diagonal moves never squeeze between two blocked cells unless corner
//!   cutting is enabled
//! - Weighted A* for faster, bounded-suboptimal search
//! - Deterministic tie-breaking: lowest `f`, then lowest `h`, then insertion order
//!
//! Each call to [`AStar::plan`] owns its open set and node arena; an `AStar`
//! value holds configuration only and can be shared between threads.
//!
//! # Example
//!
//! ```rust
//! use gridnav_library::algorithms::astar::AStar;
//! use gridnav_library::{GridCell, ObstacleGrid};
//!
//! let mut grid = ObstacleGrid::new(20, 20, 1.0);
//! for y in 0..19 {
//!     grid.set_occupied(10, y);
//! }
//!
//! let astar = AStar::new();
//! let path = astar.plan(&grid, GridCell::new(0, 0), GridCell::new(19, 0)).unwrap();
//!
//! assert_eq!(path.cells.first(), Some(&GridCell::new(0, 0)));
//! assert!(path.cells.contains(&GridCell::new(10, 19)));
//! ```

use crate::algorithms::occupancy_grid::OccupancyMap;
use crate::messages::GridCell;
use gridnav_core::PlannerParams;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use thiserror::Error;

pub use gridnav_core::HeuristicKind as Heuristic;

mod tests;

/// Cost of a diagonal step
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Orthogonal offsets first, then diagonals
const NEIGHBORS_8: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Why a search produced no path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanFailure {
    #[error("start out of bounds")]
    StartOutOfBounds,

    #[error("goal out of bounds")]
    GoalOutOfBounds,

    #[error("start blocked")]
    StartBlocked,

    #[error("goal blocked")]
    GoalBlocked,

    #[error("no path exists")]
    NoPath,

    #[error("search limit exceeded after {0} expansions")]
    SearchLimitExceeded(usize),
}

impl PlanFailure {
    /// True for failures detected before any search: the request itself is unusable
    pub fn is_invalid_endpoint(&self) -> bool {
        matches!(
            self,
            PlanFailure::StartOutOfBounds
                | PlanFailure::GoalOutOfBounds
                | PlanFailure::StartBlocked
                | PlanFailure::GoalBlocked
        )
    }
}

/// Successful search result
#[derive(Debug, Clone, PartialEq)]
pub struct GridPath {
    /// Cells from start to goal inclusive, each 8-adjacent to the next
    pub cells: Vec<GridCell>,
    /// Sum of step costs in cell units
    pub cost: f64,
    /// Nodes popped and expanded during the search
    pub nodes_expanded: usize,
}

/// Arena slot for a discovered cell
#[derive(Debug, Clone)]
struct SearchNode {
    cell: GridCell,
    g: f64,
    parent: Option<usize>,
    closed: bool,
}

/// Open set entry. Entries are never updated in place; an entry whose `g`
/// is above the node's recorded `g` is stale and skipped on pop.
#[derive(Debug, Clone)]
struct OpenEntry {
    f: f64,
    h: f64,
    g: f64,
    seq: u64,
    node: usize,
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* grid planner configuration
#[derive(Debug, Clone)]
pub struct AStar {
    heuristic: Heuristic,
    heuristic_weight: f64,
    allow_diagonal: bool,
    allow_corner_cutting: bool,
    max_expansions: Option<usize>,
}

impl Default for AStar {
    fn default() -> Self {
        Self::new()
    }
}

impl AStar {
    /// Euclidean heuristic, 8-connected, no corner cutting, unbounded search
    pub fn new() -> Self {
        Self {
            heuristic: Heuristic::Euclidean,
            heuristic_weight: 1.0,
            allow_diagonal: true,
            allow_corner_cutting: false,
            max_expansions: None,
        }
    }

    /// Build from planner parameters
    pub fn from_params(params: &PlannerParams) -> Self {
        let mut astar = Self::new();
        astar.set_heuristic(params.heuristic);
        astar.set_heuristic_weight(params.heuristic_weight);
        astar.set_allow_diagonal(params.allow_diagonal);
        astar.set_allow_corner_cutting(params.allow_corner_cutting);
        astar.set_max_expansions(params.max_expansions);
        astar
    }

    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = heuristic;
    }

    /// Weighted A*: `f = g + weight * h`. Values below 1.0 are clamped to 1.0.
    pub fn set_heuristic_weight(&mut self, weight: f64) {
        self.heuristic_weight = if weight.is_finite() { weight.max(1.0) } else { 1.0 };
    }

    pub fn set_allow_diagonal(&mut self, allow: bool) {
        self.allow_diagonal = allow;
    }

    /// Allow a diagonal step even when a flanking orthogonal cell is blocked
    pub fn set_allow_corner_cutting(&mut self, allow: bool) {
        self.allow_corner_cutting = allow;
    }

    pub fn set_max_expansions(&mut self, max: Option<usize>) {
        self.max_expansions = max;
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Find a minimal-cost path from `start` to `goal`
    pub fn plan<M: OccupancyMap + ?Sized>(
        &self,
        map: &M,
        start: GridCell,
        goal: GridCell,
    ) -> Result<GridPath, PlanFailure> {
        trace!(
            "[AStar] plan: start=({},{}) goal=({},{}) grid={}x{}",
            start.x,
            start.y,
            goal.x,
            goal.y,
            map.width(),
            map.height()
        );

        if !map.in_bounds(start.x, start.y) {
            debug!("[AStar] FAILED: start ({},{}) out of bounds", start.x, start.y);
            return Err(PlanFailure::StartOutOfBounds);
        }
        if !map.in_bounds(goal.x, goal.y) {
            debug!("[AStar] FAILED: goal ({},{}) out of bounds", goal.x, goal.y);
            return Err(PlanFailure::GoalOutOfBounds);
        }

        // Identical endpoints are trivially reachable, blocked or not
        if start == goal {
            return Ok(GridPath {
                cells: vec![start],
                cost: 0.0,
                nodes_expanded: 0,
            });
        }

        if map.is_blocked(start.x, start.y) {
            debug!("[AStar] FAILED: start ({},{}) blocked", start.x, start.y);
            return Err(PlanFailure::StartBlocked);
        }
        if map.is_blocked(goal.x, goal.y) {
            debug!("[AStar] FAILED: goal ({},{}) blocked", goal.x, goal.y);
            return Err(PlanFailure::GoalBlocked);
        }

        let mut arena: Vec<SearchNode> = Vec::new();
        let mut index: HashMap<GridCell, usize> = HashMap::new();
        let mut open_set = BinaryHeap::new();
        let mut seq: u64 = 0;

        let h_start = self.heuristic_cost(start, goal);
        arena.push(SearchNode {
            cell: start,
            g: 0.0,
            parent: None,
            closed: false,
        });
        index.insert(start, 0);
        open_set.push(OpenEntry {
            f: self.heuristic_weight * h_start,
            h: h_start,
            g: 0.0,
            seq,
            node: 0,
        });

        let neighbors: &[(i32, i32)] = if self.allow_diagonal {
            &NEIGHBORS_8
        } else {
            &NEIGHBORS_8[..4]
        };

        let mut nodes_expanded = 0;

        while let Some(entry) = open_set.pop() {
            let current = entry.node;
            if arena[current].closed || entry.g > arena[current].g {
                continue;
            }

            let current_cell = arena[current].cell;
            let current_g = arena[current].g;

            // Goal reached
            if current_cell == goal {
                nodes_expanded += 1;
                let cells = reconstruct_path(&arena, current);
                trace!(
                    "[AStar] SUCCESS: {} cells, cost={:.3}, nodes_expanded={}",
                    cells.len(),
                    current_g,
                    nodes_expanded
                );
                return Ok(GridPath {
                    cells,
                    cost: current_g,
                    nodes_expanded,
                });
            }

            if let Some(max) = self.max_expansions {
                if nodes_expanded >= max {
                    debug!("[AStar] FAILED: search limit of {} expansions reached", max);
                    return Err(PlanFailure::SearchLimitExceeded(nodes_expanded));
                }
            }

            nodes_expanded += 1;
            arena[current].closed = true;

            for &(dx, dy) in neighbors {
                let next = current_cell.offset(dx, dy);
                if !map.in_bounds(next.x, next.y) || map.is_blocked(next.x, next.y) {
                    continue;
                }

                let is_diagonal = dx != 0 && dy != 0;
                if is_diagonal
                    && !self.allow_corner_cutting
                    && (map.is_blocked(current_cell.x + dx, current_cell.y)
                        || map.is_blocked(current_cell.x, current_cell.y + dy))
                {
                    continue;
                }

                let step = if is_diagonal { DIAGONAL_COST } else { 1.0 };
                let tentative_g = current_g + step;

                let slot = match index.entry(next) {
                    Entry::Occupied(e) => {
                        let slot = *e.get();
                        let node = &mut arena[slot];
                        if node.closed || tentative_g >= node.g {
                            continue;
                        }
                        node.g = tentative_g;
                        node.parent = Some(current);
                        slot
                    }
                    Entry::Vacant(e) => {
                        let slot = arena.len();
                        arena.push(SearchNode {
                            cell: next,
                            g: tentative_g,
                            parent: Some(current),
                            closed: false,
                        });
                        e.insert(slot);
                        slot
                    }
                };

                let h = self.heuristic_cost(next, goal);
                seq += 1;
                open_set.push(OpenEntry {
                    f: tentative_g + self.heuristic_weight * h,
                    h,
                    g: tentative_g,
                    seq,
                    node: slot,
                });
            }
        }

        debug!("[AStar] FAILED: no path after expanding {} nodes", nodes_expanded);
        Err(PlanFailure::NoPath)
    }

    /// Path cost: `1.0` per orthogonal step, `sqrt(2)` per diagonal step
    pub fn path_length(path: &[GridCell]) -> f64 {
        path.windows(2)
            .map(|w| {
                if w[0].is_diagonal_to(&w[1]) {
                    DIAGONAL_COST
                } else {
                    1.0
                }
            })
            .sum()
    }

    fn heuristic_cost(&self, from: GridCell, to: GridCell) -> f64 {
        let dx = (from.x - to.x).abs() as f64;
        let dy = (from.y - to.y).abs() as f64;

        match self.heuristic {
            Heuristic::Euclidean => dx.hypot(dy),
            Heuristic::Octile => {
                let (min, max) = if dx < dy { (dx, dy) } else { (dy, dx) };
                min * DIAGONAL_COST + (max - min)
            }
            Heuristic::Manhattan => dx + dy,
            Heuristic::Zero => 0.0,
        }
    }
}

/// Walk parent indices back from `goal_node` and reverse
fn reconstruct_path(arena: &[SearchNode], goal_node: usize) -> Vec<GridCell> {
    let mut cells = Vec::new();
    let mut current = Some(goal_node);
    while let Some(i) = current {
        cells.push(arena[i].cell);
        current = arena[i].parent;
    }
    cells.reverse();
    cells
}
