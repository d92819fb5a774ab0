//! Douglas-Peucker Path Simplification
//!
//! Reduces a polyline to the subset of its points needed to stay within a
//! perpendicular-distance tolerance of the original shape.
//!
//! The first and last points are always kept, and every removed point lies
//! within `epsilon` of the simplified polyline. Simplifying an already
//! simplified path with the same `epsilon` returns it unchanged.
//!
//! # Example
//!
//! ```rust
//! use gridnav_library::algorithms::douglas_peucker::simplify;
//! use gridnav_library::Point2;
//!
//! let path = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.01),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(3.0, 0.0),
//!     Point2::new(4.0, 0.0),
//! ];
//!
//! let simplified = simplify(&path, 0.1);
//! assert_eq!(simplified, vec![Point2::new(0.0, 0.0), Point2::new(4.0, 0.0)]);
//! ```

use crate::messages::Point2;

/// Simplify `points` with tolerance `epsilon` (world units)
///
/// Sequences with fewer than 3 points are returned unchanged.
#[must_use = "returns the simplified path"]
pub fn simplify(points: &[Point2], epsilon: f64) -> Vec<Point2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    // Farthest interior point; the first one wins ties
    let mut max_dist = 0.0;
    let mut index = 0;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = perpendicular_distance(p, &first, &last);
        if d > max_dist {
            max_dist = d;
            index = i;
        }
    }

    if max_dist > epsilon {
        let mut left = simplify(&points[..=index], epsilon);
        let right = simplify(&points[index..], epsilon);
        // Shared split point appears at the end of `left` and the start of `right`
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Distance from `point` to the segment `start..end`
///
/// The projection parameter is clamped to `[0, 1]`, so a zero-length segment
/// degrades to the distance to `start`.
pub fn perpendicular_distance(point: &Point2, start: &Point2, end: &Point2) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx * dx + dy * dy;

    if length_sq == 0.0 {
        return point.distance(start);
    }

    let t = (((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq).clamp(0.0, 1.0);
    let projection = Point2::new(start.x + t * dx, start.y + t * dy);
    point.distance(&projection)
}

/// Largest distance from any point of `original` to the polyline `simplified`
pub fn max_deviation(original: &[Point2], simplified: &[Point2]) -> f64 {
    match simplified {
        [] => f64::INFINITY,
        [only] => original
            .iter()
            .map(|p| p.distance(only))
            .fold(0.0, f64::max),
        _ => original
            .iter()
            .map(|p| {
                simplified
                    .windows(2)
                    .map(|seg| perpendicular_distance(p, &seg[0], &seg[1]))
                    .fold(f64::INFINITY, f64::min)
            })
            .fold(0.0, f64::max),
    }
}
