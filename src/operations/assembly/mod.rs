mod convert;
mod edit_layers;
mod layers;
mod materials;
mod registry;
mod resize;

pub use convert::ConvertLayerMaterial;
pub use crate::model::thermal::{thermal_performance, total_thickness, ThermalPerformance};
pub use edit_layers::{AddLayer, MoveLayer, RemoveLayer};
pub use layers::{
    apply_layers, core_index, effective_layers, layer_fingerprint, AssemblyOutcome,
    AssemblyWarning, AssemblyWarningKind,
};
pub use materials::{Material, MaterialCategory, MaterialLibrary, SizeRule, TIMBER_SIZES};
pub use registry::WallTypeRegistry;
pub use resize::ResizeWallThickness;
