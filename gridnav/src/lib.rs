//! # GRIDNAV
//!
//! Grid-based shortest-path planning: A* search over a bounded obstacle grid
//! followed by Douglas-Peucker simplification of the resulting path.
//!
//! ## Quick Start
//!
//! ```rust
//! use gridnav::prelude::*;
//!
//! let service = PathPlanningService::new(PlannerParams::default())?;
//! let request = PlanRequest::new(Point2::new(0.0, 10.0), Point2::new(10.0, 10.0), 20, 20)
//!     .with_cells((0..20).filter(|&y| y != 10).map(|y| (5, y)));
//!
//! let response = service.plan(&request);
//! assert!(response.success);
//! # Ok::<(), GridnavError>(())
//! ```
//!
//! ## Features
//!
//! - **8-connected A\*** with Euclidean, octile, Manhattan or zero (Dijkstra) heuristics
//! - **Discrete and circular obstacles**, circles inflated by a safety margin
//! - **Douglas-Peucker simplification** within a world-space tolerance
//! - **JSON request/response** types and parallel batch planning

// Re-export core components
pub use gridnav_core::{self, *};

// Re-export standard library with alias
pub use gridnav_library as library;

/// The GRIDNAV prelude - everything you need to get started
pub mod prelude {
    // Planning
    pub use gridnav_library::planner::{PathPlanningService, PlanError, PlanOutcome};
    pub use gridnav_library::algorithms::astar::{AStar, GridPath, Heuristic, PlanFailure};
    pub use gridnav_library::algorithms::occupancy_grid::{ObstacleGrid, OccupancyMap};

    // Configuration
    pub use gridnav_core::params::PlannerParams;

    // Error types
    pub use gridnav_core::error::{GridnavError, GridnavResult};
    pub type Result<T> = GridnavResult<T>;

    // Common traits
    pub use serde::{Deserialize, Serialize};

    // Re-export anyhow for error handling
    pub use anyhow::{anyhow, bail, ensure, Context, Result as AnyResult};

    // Re-export all message types from gridnav_library for convenience
    pub use gridnav_library::messages::*;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get GRIDNAV version
pub fn version() -> &'static str {
    VERSION
}
