use serde::{Deserialize, Serialize};

use super::thermal::{thermal_performance, total_thickness};

/// Function of a layer within a wall cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerRole {
    Structure,
    Insulation,
    Finish,
    Substrate,
    Membrane,
    AirGap,
}

impl LayerRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Insulation => "insulation",
            Self::Finish => "finish",
            Self::Substrate => "substrate",
            Self::Membrane => "membrane",
            Self::AirGap => "airGap",
        }
    }
}

/// One ply of a wall assembly, ordered from the exterior face inwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallLayer {
    pub name: String,
    /// Material name, resolved against the material library.
    pub material: String,
    /// Thickness in millimetres.
    pub thickness: f64,
    #[serde(default)]
    pub is_core: bool,
    pub role: LayerRole,
    /// Hatch pattern used by drawing collaborators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Thermal conductivity in W/(m·K).
    #[serde(default)]
    pub conductivity: f64,
    /// Density in kg/m³.
    #[serde(default)]
    pub density: f64,
    /// Specific heat capacity in J/(kg·K).
    #[serde(default)]
    pub specific_heat: f64,
}

/// A named, reusable layer stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallTypeDefinition {
    pub id: String,
    pub name: String,
    pub layers: Vec<WallLayer>,
    pub total_thickness: f64,
    pub u_value: f64,
}

impl WallTypeDefinition {
    /// Creates a wall type and derives its thickness and U-value from `layers`.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, layers: Vec<WallLayer>) -> Self {
        let total_thickness = total_thickness(&layers);
        let u_value = thermal_performance(&layers).u_value;
        Self {
            id: id.into(),
            name: name.into(),
            layers,
            total_thickness,
            u_value,
        }
    }
}
