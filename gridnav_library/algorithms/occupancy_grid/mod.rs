//! 2D Obstacle Grid
//!
//! Bounded workspace of `width x height` cells with a fixed cell size.
//!
//! # Features
//!
//! - Discrete occupied cells
//! - Circular obstacles inflated by a safety margin, rasterized on insertion
//! - Grid-world coordinate conversion
//!
//! # Example
//!
//! ```rust
//! use gridnav_library::algorithms::occupancy_grid::{ObstacleGrid, OccupancyMap};
//! use gridnav_library::Point2;
//!
//! let mut grid = ObstacleGrid::new(20, 20, 0.5);  // 10m x 10m at 0.5m per cell
//!
//! grid.set_occupied(4, 4);
//! grid.add_circle(Point2::new(5.0, 5.0), 1.0);
//!
//! assert!(grid.is_blocked(4, 4));
//! assert!(grid.is_blocked(10, 10));
//! assert!(!grid.is_blocked(0, 0));
//! ```

use crate::messages::{GridCell, Point2};

/// Read-only view of a bounded grid, as consumed by the search
pub trait OccupancyMap {
    /// Grid width in cells
    fn width(&self) -> usize;

    /// Grid height in cells
    fn height(&self) -> usize;

    /// True when the cell cannot be entered. Only called for in-bounds cells.
    fn is_blocked(&self, x: i32, y: i32) -> bool;

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }
}

/// Bounds plus an arbitrary blocking predicate
pub struct PredicateMap<F> {
    width: usize,
    height: usize,
    predicate: F,
}

impl<F: Fn(i32, i32) -> bool> PredicateMap<F> {
    pub fn new(width: usize, height: usize, predicate: F) -> Self {
        Self {
            width,
            height,
            predicate,
        }
    }
}

impl<F: Fn(i32, i32) -> bool> OccupancyMap for PredicateMap<F> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_blocked(&self, x: i32, y: i32) -> bool {
        (self.predicate)(x, y)
    }
}

/// 2D obstacle grid
#[derive(Debug, Clone)]
pub struct ObstacleGrid {
    width: usize,
    height: usize,
    resolution: f64,    // world units per cell
    safety_margin: f64, // added to every circle radius
    cells: Vec<bool>,   // row-major, true = blocked
}

impl ObstacleGrid {
    /// Create a new, fully free grid
    ///
    /// # Arguments
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    /// * `resolution` - Cell size in world units
    pub fn new(width: usize, height: usize, resolution: f64) -> Self {
        Self {
            width,
            height,
            resolution,
            safety_margin: gridnav_core::params::DEFAULT_SAFETY_MARGIN,
            cells: vec![false; width * height],
        }
    }

    /// Set the clearance applied to circles added afterwards
    pub fn set_safety_margin(&mut self, margin: f64) {
        self.safety_margin = margin.max(0.0);
    }

    pub fn safety_margin(&self) -> f64 {
        self.safety_margin
    }

    /// Mark a cell as occupied. Returns false if the cell is off the grid.
    pub fn set_occupied(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = true;
                true
            }
            None => false,
        }
    }

    /// Mark a cell as free
    pub fn set_free(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = false;
        }
    }

    /// Block every cell whose world origin lies strictly closer than
    /// `radius + safety_margin` to `center`. Returns the number of cells
    /// newly blocked.
    pub fn add_circle(&mut self, center: Point2, radius: f64) -> usize {
        let reach = radius + self.safety_margin;
        if !(reach > 0.0) || self.width == 0 || self.height == 0 {
            return 0;
        }

        // Candidate window, one cell wider than the disc on every side
        let min = self.world_to_grid(center.x - reach, center.y - reach);
        let max = self.world_to_grid(center.x + reach, center.y + reach);
        let x0 = min.x.saturating_sub(1).max(0);
        let y0 = min.y.saturating_sub(1).max(0);
        let x1 = max.x.saturating_add(1).min(self.width as i32 - 1);
        let y1 = max.y.saturating_add(1).min(self.height as i32 - 1);

        let mut blocked = 0;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let origin = self.grid_to_world(GridCell::new(x, y));
                if origin.distance(&center) < reach {
                    if let Some(i) = self.index(x, y) {
                        if !self.cells[i] {
                            self.cells[i] = true;
                            blocked += 1;
                        }
                    }
                }
            }
        }
        blocked
    }

    /// Clear grid (set all cells to free)
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Number of blocked cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Convert world coordinates to the containing cell: `floor(world / resolution)`
    pub fn world_to_grid(&self, world_x: f64, world_y: f64) -> GridCell {
        let grid_x = (world_x / self.resolution).floor() as i32;
        let grid_y = (world_y / self.resolution).floor() as i32;
        GridCell::new(grid_x, grid_y)
    }

    /// Convert a cell to the world coordinates of its origin corner
    pub fn grid_to_world(&self, cell: GridCell) -> Point2 {
        Point2::new(
            cell.x as f64 * self.resolution,
            cell.y as f64 * self.resolution,
        )
    }

    /// Get grid dimensions
    pub fn get_dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get resolution
    pub fn get_resolution(&self) -> f64 {
        self.resolution
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }
}

impl OccupancyMap for ObstacleGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.cells[i]).unwrap_or(true)
    }
}
