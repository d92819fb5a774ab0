//! Planner configuration for GRIDNAV
//!
//! A typed parameter set with defaults, loadable from YAML or TOML.
//! Every field is optional in the file; missing keys take the default.
//!
//! ```yaml
//! cell_size: 0.5
//! safety_margin: 0.3
//! simplify_epsilon: 0.25
//! allow_corner_cutting: false
//! heuristic: euclidean
//! ```

use crate::error::{GridnavError, GridnavResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default clearance added around circular obstacles (world units)
pub const DEFAULT_SAFETY_MARGIN: f64 = 0.3;

/// Default Douglas-Peucker tolerance (world units)
pub const DEFAULT_SIMPLIFY_EPSILON: f64 = 0.5;

/// Default ceiling on `map_width * map_height`
pub const DEFAULT_MAX_GRID_CELLS: usize = 4_000_000;

/// Heuristic used to order the A* open set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    /// Straight-line distance. Admissible and consistent for 8-connected moves.
    #[default]
    Euclidean,
    /// Octile distance, the exact cost on an empty 8-connected grid
    Octile,
    /// |dx| + |dy|. Overestimates when diagonal moves are allowed.
    Manhattan,
    /// Always zero, which turns A* into Dijkstra
    Zero,
}

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerParams {
    /// World units per grid cell
    pub cell_size: f64,
    /// Clearance added to every circular obstacle radius
    pub safety_margin: f64,
    /// Run Douglas-Peucker over the raw grid path
    pub simplify: bool,
    /// Douglas-Peucker tolerance in world units
    pub simplify_epsilon: f64,
    /// 8-connected when true, 4-connected otherwise
    pub allow_diagonal: bool,
    /// Permit diagonal moves between two blocked orthogonal cells
    pub allow_corner_cutting: bool,
    pub heuristic: HeuristicKind,
    /// Weighted A* factor, 1.0 keeps the search optimal
    pub heuristic_weight: f64,
    /// Requests whose workspace exceeds this many cells are rejected
    pub max_grid_cells: usize,
    /// Abort the search after this many node expansions
    pub max_expansions: Option<usize>,
    /// Travel speed used for `estimated_time` (world units per second)
    pub nominal_speed: f64,
    /// Batch planning threads, 0 means one per CPU
    pub worker_threads: usize,
}

impl Default for PlannerParams {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            safety_margin: DEFAULT_SAFETY_MARGIN,
            simplify: true,
            simplify_epsilon: DEFAULT_SIMPLIFY_EPSILON,
            allow_diagonal: true,
            allow_corner_cutting: false,
            heuristic: HeuristicKind::Euclidean,
            heuristic_weight: 1.0,
            max_grid_cells: DEFAULT_MAX_GRID_CELLS,
            max_expansions: None,
            nominal_speed: 1.0,
            worker_threads: 0,
        }
    }
}

impl PlannerParams {
    /// Load parameters from a YAML (`.yaml`/`.yml`), TOML (`.toml`) or JSON file
    pub fn load(path: &Path) -> GridnavResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let params = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "toml" => Self::from_toml_str(&text)?,
            "json" => {
                let params: Self = serde_json::from_str(&text)?;
                params.validate()?;
                params
            }
            other => {
                return Err(GridnavError::config(format!(
                    "unsupported config format '{}' for {}",
                    other,
                    path.display()
                )))
            }
        };

        log::debug!("Loaded planner params from {}", path.display());
        Ok(params)
    }

    /// Load from `path` if given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> GridnavResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate YAML text
    pub fn from_yaml_str(text: &str) -> GridnavResult<Self> {
        let params: Self = serde_yaml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> GridnavResult<Self> {
        let params: Self = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> GridnavResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> GridnavResult<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(GridnavError::config("cell_size must be a positive number"));
        }
        if !(self.safety_margin.is_finite() && self.safety_margin >= 0.0) {
            return Err(GridnavError::config("safety_margin must be non-negative"));
        }
        if !(self.simplify_epsilon.is_finite() && self.simplify_epsilon > 0.0) {
            return Err(GridnavError::config(
                "simplify_epsilon must be a positive number",
            ));
        }
        if !(self.heuristic_weight.is_finite() && self.heuristic_weight >= 1.0) {
            return Err(GridnavError::config("heuristic_weight must be >= 1.0"));
        }
        if self.max_grid_cells == 0 {
            return Err(GridnavError::config("max_grid_cells must be positive"));
        }
        if !(self.nominal_speed.is_finite() && self.nominal_speed > 0.0) {
            return Err(GridnavError::config("nominal_speed must be positive"));
        }
        Ok(())
    }

    /// Number of threads used for batch planning
    pub fn worker_count(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.worker_threads
        }
    }
}
