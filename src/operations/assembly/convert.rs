use super::layers::{
    apply_layers, effective_layers, finish_placement_warnings, AssemblyOutcome, AssemblyWarning,
    AssemblyWarningKind,
};
use super::materials::MaterialLibrary;
use super::registry::WallTypeRegistry;
use crate::error::{AssemblyError, Result};
use crate::model::Wall;

/// Switches one layer to another material.
///
/// Thermal properties, pattern and role follow the new material (a core keeps
/// its structural role), and the thickness is re-snapped to the new
/// material's size rule.
pub struct ConvertLayerMaterial<'a> {
    index: usize,
    material: &'a str,
}

impl<'a> ConvertLayerMaterial<'a> {
    #[must_use]
    pub fn new(index: usize, material: &'a str) -> Self {
        Self { index, material }
    }

    /// Executes the conversion.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::UnknownMaterial`] for a material missing from
    /// `library` and [`AssemblyError::LayerIndexOutOfRange`] for a bad index.
    pub fn execute(
        &self,
        wall: &Wall,
        registry: &WallTypeRegistry,
        library: &MaterialLibrary,
    ) -> Result<AssemblyOutcome> {
        let material = library.require(self.material)?;
        let mut layers = effective_layers(wall, registry)?;
        let len = layers.len();
        let layer = layers
            .get_mut(self.index)
            .ok_or(AssemblyError::LayerIndexOutOfRange {
                index: self.index,
                len,
            })?;

        let previous = layer.thickness;
        material.apply_to(layer);
        layer.thickness = material.size_rule.snap(previous);

        let mut warnings = Vec::new();
        if (layer.thickness - previous).abs() > 1e-6 {
            warnings.push(AssemblyWarning::new(
                AssemblyWarningKind::ThicknessChanged,
                format!(
                    "{} resized from {previous} mm to {} mm to fit {}",
                    layer.name, layer.thickness, material.name
                ),
            ));
        }
        warnings.extend(finish_placement_warnings(&layers, library));

        let mut wall = wall.clone();
        apply_layers(&mut wall, layers, registry);
        Ok(AssemblyOutcome { wall, warnings })
    }
}
