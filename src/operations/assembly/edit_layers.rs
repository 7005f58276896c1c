use super::layers::{
    apply_layers, effective_layers, finish_placement_warnings, is_insulation, AssemblyOutcome,
    AssemblyWarning, AssemblyWarningKind,
};
use super::materials::MaterialLibrary;
use super::registry::WallTypeRegistry;
use crate::error::{AssemblyError, Result};
use crate::model::{thermal_performance, Wall, WallLayer};

fn out_of_range(index: usize, len: usize) -> AssemblyError {
    AssemblyError::LayerIndexOutOfRange { index, len }
}

fn finish(
    wall: &Wall,
    layers: Vec<WallLayer>,
    mut warnings: Vec<AssemblyWarning>,
    registry: &WallTypeRegistry,
    library: &MaterialLibrary,
) -> AssemblyOutcome {
    warnings.extend(finish_placement_warnings(&layers, library));
    let mut wall = wall.clone();
    apply_layers(&mut wall, layers, registry);
    AssemblyOutcome { wall, warnings }
}

/// Inserts a layer at a position in the stack (0 = exterior face).
pub struct AddLayer {
    index: usize,
    layer: WallLayer,
}

impl AddLayer {
    #[must_use]
    pub fn new(index: usize, layer: WallLayer) -> Self {
        Self { index, layer }
    }

    /// Executes the insertion.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::LayerIndexOutOfRange`] when `index` is past
    /// the end of the stack, or [`AssemblyError::UnknownWallType`] for an
    /// unregistered type.
    pub fn execute(
        &self,
        wall: &Wall,
        registry: &WallTypeRegistry,
        library: &MaterialLibrary,
    ) -> Result<AssemblyOutcome> {
        let mut layers = effective_layers(wall, registry)?;
        if self.index > layers.len() {
            return Err(out_of_range(self.index, layers.len()).into());
        }
        layers.insert(self.index, self.layer.clone());
        Ok(finish(wall, layers, Vec::new(), registry, library))
    }
}

/// Removes a non-core layer.
///
/// Removing insulation is allowed but reported with its effect on the U-value.
pub struct RemoveLayer {
    index: usize,
}

impl RemoveLayer {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Executes the removal.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::LayerIndexOutOfRange`] for a bad index and
    /// [`AssemblyError::CannotRemoveCore`] for the core layer.
    pub fn execute(
        &self,
        wall: &Wall,
        registry: &WallTypeRegistry,
        library: &MaterialLibrary,
    ) -> Result<AssemblyOutcome> {
        let mut layers = effective_layers(wall, registry)?;
        let Some(target) = layers.get(self.index) else {
            return Err(out_of_range(self.index, layers.len()).into());
        };
        if target.is_core {
            return Err(AssemblyError::CannotRemoveCore.into());
        }

        let mut warnings = Vec::new();
        if is_insulation(target, library) {
            let before = thermal_performance(&layers).u_value;
            let name = target.name.clone();
            layers.remove(self.index);
            let after = thermal_performance(&layers).u_value;
            warnings.push(AssemblyWarning::new(
                AssemblyWarningKind::InsulationRemoved,
                format!("removing {name} raises the U-value from {before:.3} to {after:.3} W/m²K"),
            ));
        } else {
            layers.remove(self.index);
        }
        Ok(finish(wall, layers, warnings, registry, library))
    }
}

/// Moves a layer to another position in the stack.
pub struct MoveLayer {
    from: usize,
    to: usize,
}

impl MoveLayer {
    #[must_use]
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Executes the move.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::LayerIndexOutOfRange`] when either index is
    /// outside the stack.
    pub fn execute(
        &self,
        wall: &Wall,
        registry: &WallTypeRegistry,
        library: &MaterialLibrary,
    ) -> Result<AssemblyOutcome> {
        let mut layers = effective_layers(wall, registry)?;
        let len = layers.len();
        for index in [self.from, self.to] {
            if index >= len {
                return Err(out_of_range(index, len).into());
            }
        }
        let layer = layers.remove(self.from);
        layers.insert(self.to, layer);
        Ok(finish(wall, layers, Vec::new(), registry, library))
    }
}
