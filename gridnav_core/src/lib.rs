//! # GRIDNAV Core
//!
//! Shared building blocks for the GRIDNAV planning crates:
//!
//! - **Errors**: [`GridnavError`] and the [`GridnavResult`] alias used by every crate
//! - **Params**: [`PlannerParams`], the typed planner configuration loaded from YAML or TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use gridnav_core::PlannerParams;
//!
//! let params = PlannerParams::default();
//! assert!(params.validate().is_ok());
//! assert_eq!(params.simplify_epsilon, 0.5);
//! ```

pub mod error;
pub mod params;

pub use error::{GridnavError, GridnavResult};
pub use params::{HeuristicKind, PlannerParams};
