use super::distance_2d::point_to_line_distance;
use super::{Point2, TOLERANCE};

/// Orientation predicate: twice the signed area of triangle `(a, b, c)`.
///
/// Positive when `c` lies to the left of `a → b`, negative to the right,
/// zero when collinear.
#[must_use]
pub fn orientation(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Signed distance of `c` from the line through `a` and `b`.
fn side_distance(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let len = (b - a).norm();
    if len < TOLERANCE {
        return 0.0;
    }
    orientation(a, b, c) / len
}

/// Strict (proper) segment intersection.
///
/// Returns `true` only when the segments cross at a single interior point of
/// both. Collinear overlaps, shared endpoints and T-touches within `epsilon`
/// are not considered intersections.
#[must_use]
pub fn segments_intersect_strict(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    epsilon: f64,
) -> bool {
    let d1 = side_distance(a0, a1, b0);
    let d2 = side_distance(a0, a1, b1);
    let d3 = side_distance(b0, b1, a0);
    let d4 = side_distance(b0, b1, a1);

    let straddles = |p: f64, q: f64| (p > epsilon && q < -epsilon) || (p < -epsilon && q > epsilon);
    straddles(d1, d2) && straddles(d3, d4)
}

/// Returns `true` if both `p` and `q` lie within `tolerance` of the line `a → b`.
#[must_use]
pub fn is_collinear_with(a: &Point2, b: &Point2, p: &Point2, q: &Point2, tolerance: f64) -> bool {
    point_to_line_distance(p, a, b) <= tolerance && point_to_line_distance(q, a, b) <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-8;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn orientation_signs() {
        assert!(orientation(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0)) > 0.0);
        assert!(orientation(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, -1.0)) < 0.0);
        assert!(orientation(&p(0.0, 0.0), &p(1.0, 0.0), &p(5.0, 0.0)).abs() < TOLERANCE);
    }

    #[test]
    fn proper_crossing() {
        assert!(segments_intersect_strict(
            &p(0.0, 0.0),
            &p(10.0, 10.0),
            &p(0.0, 10.0),
            &p(10.0, 0.0),
            EPS
        ));
    }

    #[test]
    fn touching_and_collinear_excluded() {
        // Shared endpoint.
        assert!(!segments_intersect_strict(
            &p(0.0, 0.0),
            &p(10.0, 0.0),
            &p(10.0, 0.0),
            &p(10.0, 10.0),
            EPS
        ));
        // T-touch: endpoint of b lies on the interior of a.
        assert!(!segments_intersect_strict(
            &p(0.0, 0.0),
            &p(10.0, 0.0),
            &p(5.0, 0.0),
            &p(5.0, 10.0),
            EPS
        ));
        // Collinear overlap.
        assert!(!segments_intersect_strict(
            &p(0.0, 0.0),
            &p(10.0, 0.0),
            &p(5.0, 0.0),
            &p(15.0, 0.0),
            EPS
        ));
        // Disjoint.
        assert!(!segments_intersect_strict(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(5.0, -1.0),
            &p(5.0, 1.0),
            EPS
        ));
    }

    #[test]
    fn collinearity_within_tolerance() {
        let a = p(0.0, 0.0);
        let b = p(10.0, 0.0);
        assert!(is_collinear_with(&a, &b, &p(12.0, 0.1), &p(20.0, -0.1), 0.5));
        assert!(!is_collinear_with(&a, &b, &p(12.0, 0.1), &p(20.0, 3.0), 0.5));
    }
}
