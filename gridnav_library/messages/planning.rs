use super::geometry::Point2;
use gridnav_core::{GridnavError, GridnavResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Search algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// A* with the configured heuristic
    #[default]
    AStar,
    /// Uniform-cost search (A* with a zero heuristic)
    Dijkstra,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::AStar => "a_star",
            Algorithm::Dijkstra => "dijkstra",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Obstacle as it appears on the wire
///
/// Either an occupied grid cell `{"x": 3, "y": 4}` or a circular region
/// `{"position": {"x": 2.5, "y": 1.0}, "radius": 0.4}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObstacleSpec {
    Cell { x: i32, y: i32 },
    Circle { position: Point2, radius: f64 },
}

/// Path planning request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub start: Point2,
    pub goal: Point2,
    pub map_width: i64,
    pub map_height: i64,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Overrides the configured cell size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<f64>,
    /// Overrides whether the path is simplified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simplify: Option<bool>,
    /// Overrides the simplification tolerance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<f64>,
    /// Refuse paths longer than this (world units)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
}

impl PlanRequest {
    /// Create a request on an empty `map_width x map_height` grid
    pub fn new(start: Point2, goal: Point2, map_width: i64, map_height: i64) -> Self {
        Self {
            start,
            goal,
            map_width,
            map_height,
            obstacles: Vec::new(),
            algorithm: Algorithm::AStar,
            cell_size: None,
            simplify: None,
            epsilon: None,
            max_distance: None,
        }
    }

    /// Parse a request from JSON text
    pub fn from_json(text: &str) -> GridnavResult<Self> {
        serde_json::from_str(text).map_err(|e| GridnavError::invalid_request(e.to_string()))
    }

    /// Add an occupied cell
    pub fn with_cell(mut self, x: i32, y: i32) -> Self {
        self.obstacles.push(ObstacleSpec::Cell { x, y });
        self
    }

    /// Add occupied cells
    pub fn with_cells<I: IntoIterator<Item = (i32, i32)>>(mut self, cells: I) -> Self {
        self.obstacles
            .extend(cells.into_iter().map(|(x, y)| ObstacleSpec::Cell { x, y }));
        self
    }

    /// Add a circular obstacle
    pub fn with_circle(mut self, position: Point2, radius: f64) -> Self {
        self.obstacles.push(ObstacleSpec::Circle { position, radius });
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = Some(cell_size);
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Return the raw grid path instead of the simplified one
    pub fn without_simplification(mut self) -> Self {
        self.simplify = Some(false);
        self
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }
}

/// Path planning response
///
/// `path` is present iff `success`; failures carry the reason in `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Point2>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,
    /// Length of `path` in world units
    #[serde(default)]
    pub length: f64,
    /// `length` divided by the nominal speed, in seconds
    #[serde(default)]
    pub estimated_time: f64,
    /// Waypoint count before simplification
    #[serde(default)]
    pub raw_waypoints: usize,
    #[serde(default)]
    pub nodes_expanded: usize,
}

impl PlanResponse {
    /// Failed response with a reason
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            path: Vec::new(),
            message: message.into(),
            algorithm: None,
            length: 0.0,
            estimated_time: 0.0,
            raw_waypoints: 0,
            nodes_expanded: 0,
        }
    }

    /// Failed response for a request that never reached the search
    pub fn from_error(err: &GridnavError) -> Self {
        Self::failure(err.to_string())
    }

    pub fn to_json(&self) -> GridnavResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
