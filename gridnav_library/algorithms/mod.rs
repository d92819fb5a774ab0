//! Pure computational algorithms for grid navigation
//!
//! This module contains pure algorithmic implementations with no I/O dependencies.
//! Each algorithm can be used on its own or through the planning service.
//!
//! # Available Algorithms
//!
//! ## Planning
//! - **astar**: A* grid-based optimal pathfinding (also runs as Dijkstra)
//!
//! ## Post-processing
//! - **douglas_peucker**: Ramer-Douglas-Peucker polyline simplification
//!
//! ## Mapping
//! - **occupancy_grid**: Bounded obstacle grid with circle rasterization

pub mod astar;
pub mod douglas_peucker;
pub mod occupancy_grid;
