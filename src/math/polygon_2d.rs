use serde::{Deserialize, Serialize};

use super::distance_2d::{distance, point_to_segment_distance};
use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The first vertex
/// is not repeated at the end.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Absolute polygon area.
#[must_use]
pub fn polygon_area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Length of the closed boundary.
#[must_use]
pub fn polygon_perimeter(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| distance(&points[i], &points[(i + 1) % n])).sum()
}

/// Area-weighted centroid of a closed polygon.
///
/// Falls back to the arithmetic mean of the vertices when the polygon has
/// fewer than three vertices or (near) zero area.
#[must_use]
pub fn polygon_centroid(points: &[Point2]) -> Point2 {
    let n = points.len();
    if n == 0 {
        return Point2::origin();
    }

    let area = signed_area(points);
    if n < 3 || area.abs() < 1e-8 {
        return vertex_mean(points);
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let cross = points[i].x * points[j].y - points[j].x * points[i].y;
        cx += (points[i].x + points[j].x) * cross;
        cy += (points[i].y + points[j].y) * cross;
    }
    Point2::new(cx / (6.0 * area), cy / (6.0 * area))
}

#[allow(clippy::cast_precision_loss)]
fn vertex_mean(points: &[Point2]) -> Point2 {
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point2::new(sx / n, sy / n)
}

/// An axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds2 {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds2 {
    /// Returns `true` if `other` lies inside `self`, allowing `tolerance` of slack.
    #[must_use]
    pub fn contains(&self, other: &Bounds2, tolerance: f64) -> bool {
        other.min_x >= self.min_x - tolerance
            && other.min_y >= self.min_y - tolerance
            && other.max_x <= self.max_x + tolerance
            && other.max_y <= self.max_y + tolerance
    }

    /// Returns `true` if the two rectangles overlap with positive area.
    #[must_use]
    pub fn overlaps(&self, other: &Bounds2, tolerance: f64) -> bool {
        self.min_x < other.max_x - tolerance
            && other.min_x < self.max_x - tolerance
            && self.min_y < other.max_y - tolerance
            && other.min_y < self.max_y - tolerance
    }
}

/// Bounding rectangle of a point set, or `None` when empty.
#[must_use]
pub fn polygon_bounds(points: &[Point2]) -> Option<Bounds2> {
    let first = points.first()?;
    let mut b = Bounds2 {
        min_x: first.x,
        min_y: first.y,
        max_x: first.x,
        max_y: first.y,
    };
    for p in &points[1..] {
        b.min_x = b.min_x.min(p.x);
        b.min_y = b.min_y.min(p.y);
        b.max_x = b.max_x.max(p.x);
        b.max_y = b.max_y.max(p.y);
    }
    Some(b)
}

/// Ray-casting point-in-polygon test.
///
/// Points exactly on the boundary may land on either side; use
/// [`is_point_inside_polygon_inclusive`] when the boundary must count as inside.
#[must_use]
pub fn is_point_inside_polygon(p: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = pj.x + (p.y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns `true` if `p` lies within `tolerance` of any polygon edge.
#[must_use]
pub fn is_point_on_polygon_boundary(p: &Point2, polygon: &[Point2], tolerance: f64) -> bool {
    let n = polygon.len();
    (0..n).any(|i| point_to_segment_distance(p, &polygon[i], &polygon[(i + 1) % n]) <= tolerance)
}

/// Point-in-polygon test that treats the boundary (within `tolerance`) as inside.
#[must_use]
pub fn is_point_inside_polygon_inclusive(p: &Point2, polygon: &[Point2], tolerance: f64) -> bool {
    is_point_on_polygon_boundary(p, polygon, tolerance) || is_point_inside_polygon(p, polygon)
}

/// Point-in-polygon test that treats the boundary (within `tolerance`) as outside.
#[must_use]
pub fn is_point_strictly_inside_polygon(p: &Point2, polygon: &[Point2], tolerance: f64) -> bool {
    !is_point_on_polygon_boundary(p, polygon, tolerance) && is_point_inside_polygon(p, polygon)
}

/// Index of the leftmost vertex (smallest x), breaking ties by smallest y.
///
/// Used to give closed loops a deterministic starting vertex.
#[must_use]
pub fn canonical_start_index(points: &[Point2]) -> usize {
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y - TOLERANCE {
            best = i;
        }
    }
    best
}
