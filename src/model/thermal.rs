use serde::{Deserialize, Serialize};

use super::{LayerRole, WallLayer};

/// Internal surface resistance Rsi, m²K/W.
pub const INTERNAL_SURFACE_RESISTANCE: f64 = 0.13;
/// External surface resistance Rse, m²K/W.
pub const EXTERNAL_SURFACE_RESISTANCE: f64 = 0.04;
/// Resistance of an unventilated air gap, m²K/W.
pub const AIR_GAP_RESISTANCE: f64 = 0.18;

/// Thermal resistance and transmittance of a layer stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermalPerformance {
    /// m²K/W, including both surface resistances.
    pub r_value: f64,
    /// W/(m²K).
    pub u_value: f64,
}

/// Sum of layer thicknesses, mm.
#[must_use]
pub fn total_thickness(layers: &[WallLayer]) -> f64 {
    layers.iter().map(|l| l.thickness).sum()
}

/// Thermal resistance of one layer, m²K/W.
///
/// Layers with no conductivity contribute nothing, except air gaps which
/// carry a fixed resistance.
#[must_use]
pub fn layer_resistance(layer: &WallLayer) -> f64 {
    if layer.role == LayerRole::AirGap {
        AIR_GAP_RESISTANCE
    } else if layer.conductivity > 0.0 {
        layer.thickness / 1000.0 / layer.conductivity
    } else {
        0.0
    }
}

#[must_use]
pub fn thermal_performance(layers: &[WallLayer]) -> ThermalPerformance {
    let r_value = INTERNAL_SURFACE_RESISTANCE
        + layers.iter().map(layer_resistance).sum::<f64>()
        + EXTERNAL_SURFACE_RESISTANCE;
    ThermalPerformance {
        r_value,
        u_value: 1.0 / r_value,
    }
}
