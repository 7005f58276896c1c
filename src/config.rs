use serde::{Deserialize, Serialize};

use crate::math::AREA_EPSILON;

/// Tolerances and limits shared by the detection, validation and editing
/// operations.
///
/// All lengths are in engine-native plan units. The defaults assume one unit
/// is one centimetre; only the space-type banding depends on that scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Endpoints closer than this merge into one graph node.
    pub snap_tolerance: f64,
    /// Traced faces with a smaller signed area are discarded.
    pub min_face_area: f64,
    /// Upper bound on half-edge steps for a single face walk.
    pub max_trace_steps: usize,
    /// Slack used for area comparisons between rooms.
    pub area_epsilon: f64,
    /// Plan units per metre, used to convert areas to m² for space-type labels.
    pub units_per_meter: f64,
    /// A child covering at least this fraction of its parent is reported as
    /// nearly filling it.
    pub nearly_full_ratio: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: 0.5,
            min_face_area: 4.0,
            max_trace_steps: 2048,
            area_epsilon: AREA_EPSILON,
            units_per_meter: 100.0,
            nearly_full_ratio: 0.99,
        }
    }
}

impl EngineConfig {
    /// Converts an area in square plan units to square metres.
    #[must_use]
    pub fn to_square_meters(&self, area: f64) -> f64 {
        area / (self.units_per_meter * self.units_per_meter)
    }
}
