use super::{Point2, TOLERANCE};

/// Result of projecting a point onto a line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Closest point on the segment.
    pub point: Point2,
    /// Parameter of the closest point along the segment, clamped to `[0, 1]`.
    pub t: f64,
    /// Distance from the query point to `point`.
    pub distance: f64,
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// Projects `p` onto the segment `a → b`.
///
/// A zero-length segment projects everything onto `a` with `t = 0`.
#[must_use]
pub fn project_point_to_segment(p: &Point2, a: &Point2, b: &Point2) -> SegmentProjection {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < TOLERANCE * TOLERANCE {
        return SegmentProjection {
            point: *a,
            t: 0.0,
            distance: distance(p, a),
        };
    }

    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    let point = a + d * t;
    SegmentProjection {
        point,
        t,
        distance: distance(p, &point),
    }
}

/// Returns the minimum distance from `p` to the segment `a → b`.
#[must_use]
pub fn point_to_segment_distance(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    project_point_to_segment(p, a, b).distance
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// Falls back to point distance when the line is degenerate.
#[must_use]
pub fn point_to_line_distance(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return distance(p, a);
    }
    let v = p - a;
    (d.x * v.y - d.y * v.x).abs() / len
}
