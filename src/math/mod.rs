pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type in engine-native (unscaled) plan units.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for orientation and collinearity predicates on plan coordinates.
pub const ORIENTATION_EPSILON: f64 = 1e-8;

/// Tolerance for area comparisons between rooms.
pub const AREA_EPSILON: f64 = 1e-6;
