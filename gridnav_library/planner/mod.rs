//! Path Planning Service
//!
//! Turns a [`PlanRequest`] into a [`PlanResponse`]: validates the request,
//! rasterizes its obstacles onto an [`ObstacleGrid`], runs the grid search and
//! simplifies the resulting path.
//!
//! The service holds configuration only. Every call builds its own grid and
//! search state, so one service can serve any number of threads.

mod batch;

use crate::algorithms::astar::{AStar, GridPath, Heuristic, PlanFailure};
use crate::algorithms::douglas_peucker;
use crate::algorithms::occupancy_grid::ObstacleGrid;
use crate::messages::{polyline_length, Algorithm, ObstacleSpec, PlanRequest, PlanResponse, Point2};
use gridnav_core::{GridnavError, GridnavResult, PlannerParams};
use log::debug;
use thiserror::Error;

/// Why a request did not produce a path
#[derive(Debug, Error)]
pub enum PlanError {
    /// The request was rejected before any search
    #[error(transparent)]
    Request(#[from] GridnavError),

    /// The search ran (or refused to) and found nothing
    #[error(transparent)]
    Search(#[from] PlanFailure),

    #[error("path exceeds max distance ({length:.3} > {max_distance:.3})")]
    TooLong { length: f64, max_distance: f64 },
}

/// Successful planning result with the intermediate stages kept
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub algorithm: Algorithm,
    /// Raw search result in cell coordinates
    pub grid_path: GridPath,
    /// Raw search result in world coordinates
    pub raw_path: Vec<Point2>,
    /// Returned path, simplified when enabled
    pub path: Vec<Point2>,
    /// Length of `path` in world units
    pub length: f64,
    pub estimated_time: f64,
}

impl PlanOutcome {
    pub fn into_response(self) -> PlanResponse {
        PlanResponse {
            success: true,
            message: format!("path found with {} waypoints", self.path.len()),
            algorithm: Some(self.algorithm),
            length: self.length,
            estimated_time: self.estimated_time,
            raw_waypoints: self.raw_path.len(),
            nodes_expanded: self.grid_path.nodes_expanded,
            path: self.path,
        }
    }
}

/// Grid path planning service
#[derive(Debug, Clone, Default)]
pub struct PathPlanningService {
    params: PlannerParams,
}

impl PathPlanningService {
    /// Create a service, rejecting out-of-range parameters
    pub fn new(params: PlannerParams) -> GridnavResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &PlannerParams {
        &self.params
    }

    /// Plan a path. Never fails: every problem is reported in the response.
    pub fn plan(&self, request: &PlanRequest) -> PlanResponse {
        match self.plan_detailed(request) {
            Ok(outcome) => outcome.into_response(),
            Err(PlanError::Request(e)) => PlanResponse::from_error(&e),
            Err(e) => {
                let mut response = PlanResponse::failure(e.to_string());
                response.algorithm = Some(request.algorithm);
                response
            }
        }
    }

    /// Parse a JSON request and plan it
    pub fn plan_json(&self, text: &str) -> PlanResponse {
        match PlanRequest::from_json(text) {
            Ok(request) => self.plan(&request),
            Err(e) => PlanResponse::from_error(&e),
        }
    }

    /// Plan a path, keeping the raw search result alongside the returned path
    pub fn plan_detailed(&self, request: &PlanRequest) -> Result<PlanOutcome, PlanError> {
        let grid = self.build_grid(request)?;
        let epsilon = request.epsilon.unwrap_or(self.params.simplify_epsilon);
        if !(epsilon > 0.0) || !epsilon.is_finite() {
            return Err(GridnavError::invalid_request("epsilon must be positive").into());
        }
        if let Some(max_distance) = request.max_distance {
            if !(max_distance > 0.0) {
                return Err(GridnavError::invalid_request("max_distance must be positive").into());
            }
        }

        let start = grid.world_to_grid(request.start.x, request.start.y);
        let goal = grid.world_to_grid(request.goal.x, request.goal.y);
        debug!(
            "planning {} from ({},{}) to ({},{}) on {}x{} grid, {} cells blocked",
            request.algorithm,
            start.x,
            start.y,
            goal.x,
            goal.y,
            request.map_width,
            request.map_height,
            grid.occupied_count()
        );

        let grid_path = self.search(request.algorithm).plan(&grid, start, goal)?;
        let raw_path: Vec<Point2> = grid_path
            .cells
            .iter()
            .map(|&cell| grid.grid_to_world(cell))
            .collect();

        let path = if request.simplify.unwrap_or(self.params.simplify) {
            douglas_peucker::simplify(&raw_path, epsilon)
        } else {
            raw_path.clone()
        };

        let length = polyline_length(&path);
        if let Some(max_distance) = request.max_distance {
            if length > max_distance {
                debug!("path length {:.3} exceeds max distance {:.3}", length, max_distance);
                return Err(PlanError::TooLong {
                    length,
                    max_distance,
                });
            }
        }

        debug!(
            "path found: {} raw waypoints, {} returned, length {:.3}, {} nodes expanded",
            raw_path.len(),
            path.len(),
            length,
            grid_path.nodes_expanded
        );

        Ok(PlanOutcome {
            algorithm: request.algorithm,
            estimated_time: length / self.params.nominal_speed,
            grid_path,
            raw_path,
            path,
            length,
        })
    }

    /// Validate the request and rasterize its obstacles
    ///
    /// Discrete cells outside the workspace are ignored.
    pub fn build_grid(&self, request: &PlanRequest) -> GridnavResult<ObstacleGrid> {
        let (width, height) = self.checked_dimensions(request)?;
        let cell_size = request.cell_size.unwrap_or(self.params.cell_size);
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(GridnavError::invalid_request("cell_size must be positive"));
        }
        if !request.start.is_finite() || !request.goal.is_finite() {
            return Err(GridnavError::invalid_request(
                "start and goal must be finite coordinates",
            ));
        }

        let mut grid = ObstacleGrid::new(width, height, cell_size);
        grid.set_safety_margin(self.params.safety_margin);

        for obstacle in &request.obstacles {
            match *obstacle {
                ObstacleSpec::Cell { x, y } => {
                    if !grid.set_occupied(x, y) {
                        debug!("ignoring obstacle cell ({},{}) outside the workspace", x, y);
                    }
                }
                ObstacleSpec::Circle { position, radius } => {
                    if !position.is_finite() || !(radius >= 0.0) || !radius.is_finite() {
                        return Err(GridnavError::invalid_request(format!(
                            "invalid circle obstacle at ({}, {}) radius {}",
                            position.x, position.y, radius
                        )));
                    }
                    grid.add_circle(position, radius);
                }
            }
        }

        Ok(grid)
    }

    fn checked_dimensions(&self, request: &PlanRequest) -> GridnavResult<(usize, usize)> {
        if request.map_width <= 0 || request.map_height <= 0 {
            return Err(GridnavError::invalid_request(format!(
                "map dimensions must be positive, got {}x{}",
                request.map_width, request.map_height
            )));
        }

        let too_large = || {
            GridnavError::invalid_request(format!(
                "map of {}x{} cells exceeds the limit of {} cells",
                request.map_width, request.map_height, self.params.max_grid_cells
            ))
        };

        let width = usize::try_from(request.map_width).map_err(|_| too_large())?;
        let height = usize::try_from(request.map_height).map_err(|_| too_large())?;
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(too_large());
        }
        match width.checked_mul(height) {
            Some(cells) if cells <= self.params.max_grid_cells => Ok((width, height)),
            _ => Err(too_large()),
        }
    }

    fn search(&self, algorithm: Algorithm) -> AStar {
        let mut astar = AStar::from_params(&self.params);
        if algorithm == Algorithm::Dijkstra {
            astar.set_heuristic(Heuristic::Zero);
            astar.set_heuristic_weight(1.0);
        }
        astar
    }
}
