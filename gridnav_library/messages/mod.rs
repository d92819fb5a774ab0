//! Message types for GRIDNAV
//!
//! Serializable types exchanged between the planner and its callers.
//!
//! - Geometry: world points and grid cells (Point2, GridCell)
//! - Planning: the JSON request/response pair (PlanRequest, PlanResponse)
//!
//! All message types are re-exported at the crate root for convenience.

pub mod geometry;
pub mod planning;

pub use geometry::{polyline_length, GridCell, Point2};
pub use planning::{Algorithm, ObstacleSpec, PlanRequest, PlanResponse};
