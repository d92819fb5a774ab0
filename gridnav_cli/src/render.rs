use anyhow::{bail, Result};
use colored::*;
use gridnav::prelude::*;
use std::collections::HashSet;
use std::fmt::Write;

/// Widest workspace that still fits a terminal
const MAX_RENDER_WIDTH: usize = 120;

/// Plan `request` and draw the workspace with the result
pub fn render_plan(service: &PathPlanningService, request: &PlanRequest) -> Result<String> {
    let grid = service.build_grid(request)?;
    let (width, _) = grid.get_dimensions();
    if width > MAX_RENDER_WIDTH {
        bail!(
            "map is {} cells wide, render supports at most {}",
            width,
            MAX_RENDER_WIDTH
        );
    }

    let start = grid.world_to_grid(request.start.x, request.start.y);
    let goal = grid.world_to_grid(request.goal.x, request.goal.y);

    let (mut out, path_cells, waypoints) = match service.plan_detailed(request) {
        Ok(outcome) => {
            let header = format!(
                "{} {} ({:.2} units, {} waypoints, {} nodes expanded)\n",
                "Path found:".green().bold(),
                outcome.algorithm,
                outcome.length,
                outcome.path.len(),
                outcome.grid_path.nodes_expanded
            );
            let waypoints: HashSet<GridCell> = outcome
                .path
                .iter()
                .map(|p| grid.world_to_grid(p.x, p.y))
                .collect();
            let cells: HashSet<GridCell> = outcome.grid_path.cells.into_iter().collect();
            (header, cells, waypoints)
        }
        Err(e) => (
            format!("{} {}\n", "No path:".red().bold(), e),
            HashSet::new(),
            HashSet::new(),
        ),
    };

    out.push_str("  S = Start, G = Goal, o = Waypoint, * = Path, # = Obstacle, . = Free\n\n");
    out.push_str(&draw_grid(&grid, start, goal, &path_cells, &waypoints));
    Ok(out)
}

fn draw_grid(
    grid: &ObstacleGrid,
    start: GridCell,
    goal: GridCell,
    path: &HashSet<GridCell>,
    waypoints: &HashSet<GridCell>,
) -> String {
    let (width, height) = grid.get_dimensions();
    let mut out = String::new();

    for y in 0..height as i32 {
        out.push_str("  ");
        for x in 0..width as i32 {
            let cell = GridCell::new(x, y);
            let symbol = if cell == start {
                "S".green().bold()
            } else if cell == goal {
                "G".red().bold()
            } else if waypoints.contains(&cell) {
                "o".yellow().bold()
            } else if path.contains(&cell) {
                "*".yellow()
            } else if grid.is_blocked(x, y) {
                "#".bright_black()
            } else {
                ".".normal()
            };
            let _ = write!(out, "{} ", symbol);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Vec<String> {
        text.lines()
            .skip(3)
            .map(|l| l.split_whitespace().collect::<String>())
            .collect()
    }

    #[test]
    fn test_render_marks_path_and_obstacles() {
        colored::control::set_override(false);

        let request = PlanRequest::new(Point2::new(0.0, 1.0), Point2::new(4.0, 1.0), 5, 3)
            .with_cells([(2, 0), (2, 2)]);
        let out = render_plan(&PathPlanningService::default(), &request).unwrap();
        let rows = plain(&out);

        assert!(out.starts_with("Path found:"));
        assert_eq!(rows, vec!["..#..", "S***G", "..#.."]);
    }

    #[test]
    fn test_render_reports_failure() {
        colored::control::set_override(false);

        let request = PlanRequest::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), 5, 1)
            .with_cell(2, 0);
        let out = render_plan(&PathPlanningService::default(), &request).unwrap();

        assert!(out.starts_with("No path: no path exists"));
        assert_eq!(plain(&out), vec!["S.#.G"]);
    }

    #[test]
    fn test_render_rejects_wide_maps() {
        let request = PlanRequest::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), 500, 5);
        assert!(render_plan(&PathPlanningService::default(), &request).is_err());
    }
}
