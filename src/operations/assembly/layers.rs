use std::fmt;
use std::fmt::Write as _;

use serde::Serialize;

use super::materials::{MaterialCategory, MaterialLibrary};
use super::registry::WallTypeRegistry;
use crate::error::{AssemblyError, Result};
use crate::model::{total_thickness, LayerRole, Wall, WallLayer};

/// What an assembly warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AssemblyWarningKind {
    /// The core could not take the requested thickness exactly.
    CoreSnapped,
    /// An insulation layer was removed.
    InsulationRemoved,
    /// A plaster or render layer sits between other layers, away from the core.
    FinishPlacement,
    /// A material conversion changed the layer thickness.
    ThicknessChanged,
}

/// A non-fatal finding produced by an assembly edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyWarning {
    pub kind: AssemblyWarningKind,
    pub message: String,
}

impl AssemblyWarning {
    pub(crate) fn new(kind: AssemblyWarningKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl fmt::Display for AssemblyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The edited wall together with any warnings to surface.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyOutcome {
    pub wall: Wall,
    pub warnings: Vec<AssemblyWarning>,
}

/// Layers that define a wall's cross-section.
///
/// An instance override wins; otherwise the referenced wall type's layers are
/// cloned. A wall with neither has no layers.
///
/// # Errors
///
/// Returns [`AssemblyError::UnknownWallType`] when the referenced type is not
/// registered.
pub fn effective_layers(wall: &Wall, registry: &WallTypeRegistry) -> Result<Vec<WallLayer>> {
    if let Some(layers) = &wall.wall_layers {
        return Ok(layers.clone());
    }
    match &wall.wall_type_id {
        Some(id) => Ok(registry.require(id)?.layers.clone()),
        None => Ok(Vec::new()),
    }
}

/// Identity string of a layer stack: name, material, thickness, role and
/// pattern of each layer in order.
#[must_use]
pub fn layer_fingerprint(layers: &[WallLayer]) -> String {
    let mut out = String::new();
    for layer in layers {
        let _ = write!(
            out,
            "{}|{}|{:.3}|{}|{};",
            layer.name,
            layer.material,
            layer.thickness,
            layer.role.as_str(),
            layer.pattern.as_deref().unwrap_or("")
        );
    }
    out
}

/// Index of the primary core layer.
///
/// # Errors
///
/// Returns [`AssemblyError::NoCoreLayer`] when no layer is flagged as core.
pub fn core_index(layers: &[WallLayer]) -> Result<usize> {
    layers
        .iter()
        .position(|l| l.is_core)
        .ok_or_else(|| AssemblyError::NoCoreLayer.into())
}

/// Stores `layers` on `wall` and refreshes the derived fields.
///
/// The thickness becomes the layer total. When the stack matches the
/// referenced wall type exactly, the instance override is dropped.
pub fn apply_layers(wall: &mut Wall, layers: Vec<WallLayer>, registry: &WallTypeRegistry) {
    wall.thickness = total_thickness(&layers);
    let matches_type = wall
        .wall_type_id
        .as_deref()
        .and_then(|id| registry.get(id))
        .is_some_and(|t| layer_fingerprint(&t.layers) == layer_fingerprint(&layers));

    if matches_type {
        wall.wall_layers = None;
        wall.is_wall_type_override = false;
    } else {
        wall.is_wall_type_override = wall.wall_type_id.is_some();
        wall.wall_layers = Some(layers);
    }
}

pub(crate) fn is_insulation(layer: &WallLayer, library: &MaterialLibrary) -> bool {
    layer.role == LayerRole::Insulation
        || library.category(&layer.material) == Some(MaterialCategory::Insulation)
}

/// Plaster and render belong on an outer face or directly against the core.
pub(crate) fn finish_placement_warnings(
    layers: &[WallLayer],
    library: &MaterialLibrary,
) -> Vec<AssemblyWarning> {
    let last = layers.len().saturating_sub(1);
    let next_to_core = |i: usize| {
        (i > 0 && layers[i - 1].is_core) || layers.get(i + 1).is_some_and(|l| l.is_core)
    };

    layers
        .iter()
        .enumerate()
        .filter(|(i, l)| {
            library.category(&l.material) == Some(MaterialCategory::Plaster)
                && *i != 0
                && *i != last
                && !next_to_core(*i)
        })
        .map(|(i, l)| {
            AssemblyWarning::new(
                AssemblyWarningKind::FinishPlacement,
                format!(
                    "{} (layer {}) should be on an outer face or against the core",
                    l.name,
                    i + 1
                ),
            )
        })
        .collect()
}
