//! # GRIDNAV Library
//!
//! Path planning on bounded occupancy grids.
//!
//! ## Structure
//!
//! ```text
//! gridnav_library/
//! ── algorithms/     # Pure computation: A*, Douglas-Peucker, obstacle grid
//! ── messages/       # Serializable request/response and geometry types
//! ── planner/        # Request handling: validation, search, simplification
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gridnav_library::{PathPlanningService, PlanRequest, Point2};
//!
//! let request = PlanRequest::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0), 20, 20);
//! let response = PathPlanningService::default().plan(&request);
//!
//! assert!(response.success);
//! assert_eq!(response.path.len(), 2); // a straight diagonal after simplification
//! ```

pub mod algorithms;
pub mod messages;
pub mod planner;

// Re-export message types at the crate root for convenience
pub use messages::*;

pub use algorithms::astar::{AStar, GridPath, PlanFailure};
pub use algorithms::occupancy_grid::{ObstacleGrid, OccupancyMap};
pub use planner::{PathPlanningService, PlanError, PlanOutcome};
