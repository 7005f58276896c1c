use super::layers::{
    apply_layers, core_index, effective_layers, AssemblyOutcome, AssemblyWarning,
    AssemblyWarningKind,
};
use super::materials::MaterialLibrary;
use super::registry::WallTypeRegistry;
use crate::error::Result;
use crate::model::Wall;

/// Differences below this are treated as an exact fit, mm.
const THICKNESS_EPSILON: f64 = 1e-6;

/// Changes a wall's total thickness by resizing its core layer.
///
/// Every other layer keeps its thickness. The core absorbs the difference and
/// is snapped to its material's size rule, so the resulting total may differ
/// from the request; a warning reports that.
pub struct ResizeWallThickness {
    target: f64,
}

impl ResizeWallThickness {
    /// Creates a resize to `target` millimetres.
    #[must_use]
    pub fn new(target: f64) -> Self {
        Self { target }
    }

    /// Executes the resize on a copy of `wall`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AssemblyError::UnknownWallType`] for an
    /// unregistered type and [`crate::error::AssemblyError::NoCoreLayer`]
    /// when the stack has no core.
    pub fn execute(
        &self,
        wall: &Wall,
        registry: &WallTypeRegistry,
        library: &MaterialLibrary,
    ) -> Result<AssemblyOutcome> {
        let mut layers = effective_layers(wall, registry)?;
        let core = core_index(&layers)?;

        let others: f64 = layers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != core)
            .map(|(_, l)| l.thickness)
            .sum();
        let wanted = self.target - others;
        let snapped = library.size_rule(&layers[core].material).snap(wanted);

        let mut warnings = Vec::new();
        if (snapped - wanted).abs() > THICKNESS_EPSILON {
            warnings.push(AssemblyWarning::new(
                AssemblyWarningKind::CoreSnapped,
                format!(
                    "{} core snapped to {snapped} mm; wall is {} mm instead of {} mm",
                    layers[core].material,
                    others + snapped,
                    self.target
                ),
            ));
        }
        tracing::debug!(wall = %wall.id, wanted, snapped, "resized core layer");
        layers[core].thickness = snapped;

        let mut wall = wall.clone();
        apply_layers(&mut wall, layers, registry);
        Ok(AssemblyOutcome { wall, warnings })
    }
}
