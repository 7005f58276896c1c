use serde::{Deserialize, Serialize};

use crate::error::{AssemblyError, Result};
use crate::model::{LayerRole, WallLayer};

/// Coarse material family, used by the layer ordering rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaterialCategory {
    Concrete,
    Masonry,
    Timber,
    Insulation,
    /// Wet-applied finishes: plaster and render.
    Plaster,
    Board,
    Metal,
    Air,
}

/// Clay brick face length of one leaf, in mm.
const BRICK_WIDTH: f64 = 102.5;
/// Mortar joint between bonded leaves, in mm.
const BRICK_JOINT: f64 = 10.0;
/// First two concrete block widths, then `BLOCK_LARGE + k * BLOCK_STEP`.
const BLOCK_SMALL: f64 = 90.0;
const BLOCK_LARGE: f64 = 190.0;
const BLOCK_STEP: f64 = 90.0;

/// Timber stud depths stocked by default, in mm.
pub const TIMBER_SIZES: &[f64] = &[38.0, 47.0, 63.0, 75.0, 89.0, 100.0, 140.0, 150.0, 200.0, 225.0];

/// How a material's thickness snaps to manufacturable sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SizeRule {
    /// Multiples of `step`, never below `min`.
    Step { step: f64, min: f64 },
    /// Whole bricks: `n * 102.5 + (n - 1) * 10`.
    Brick,
    /// 90, 190, then 190 plus multiples of 90.
    Block,
    /// Nearest entry of an ascending table.
    Table { sizes: Vec<f64> },
    /// Whole millimetres, at least 1.
    WholeMillimetre,
}

/// Rounds to the nearest integer, halves away from zero for positive input.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

impl SizeRule {
    /// Snaps `thickness` (mm) to the nearest valid size; ties snap up.
    #[must_use]
    pub fn snap(&self, thickness: f64) -> f64 {
        let t = thickness.max(0.0);
        match self {
            Self::Step { step, min } => (round_half_up(t / step) * step).max(*min),
            Self::Brick => {
                let leaf = BRICK_WIDTH + BRICK_JOINT;
                let n = round_half_up((t + BRICK_JOINT) / leaf).max(1.0);
                n * BRICK_WIDTH + (n - 1.0) * BRICK_JOINT
            }
            Self::Block => {
                if t < (BLOCK_SMALL + BLOCK_LARGE) / 2.0 {
                    BLOCK_SMALL
                } else {
                    BLOCK_LARGE + round_half_up((t - BLOCK_LARGE) / BLOCK_STEP).max(0.0) * BLOCK_STEP
                }
            }
            Self::Table { sizes } => {
                let mut best: Option<f64> = None;
                for &size in sizes {
                    match best {
                        Some(b) if (size - t).abs() > (b - t).abs() => {}
                        _ => best = Some(size),
                    }
                }
                best.unwrap_or(t)
            }
            Self::WholeMillimetre => round_half_up(t).max(1.0),
        }
    }
}

/// A material definition with its thermal properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub name: String,
    pub category: MaterialCategory,
    /// W/(m·K). Zero for air gaps, which use a fixed resistance instead.
    pub conductivity: f64,
    /// kg/m³.
    pub density: f64,
    /// J/(kg·K).
    pub specific_heat: f64,
    pub pattern: String,
    pub size_rule: SizeRule,
    /// Role given to new layers of this material.
    pub role: LayerRole,
}

impl Material {
    #[allow(clippy::too_many_arguments)]
    fn builtin(
        name: &str,
        category: MaterialCategory,
        conductivity: f64,
        density: f64,
        specific_heat: f64,
        pattern: &str,
        size_rule: SizeRule,
        role: LayerRole,
    ) -> Self {
        Self {
            name: name.to_owned(),
            category,
            conductivity,
            density,
            specific_heat,
            pattern: pattern.to_owned(),
            size_rule,
            role,
        }
    }

    /// Creates a layer of this material. The thickness is taken as given.
    #[must_use]
    pub fn layer(&self, thickness: f64, is_core: bool) -> WallLayer {
        WallLayer {
            name: self.name.clone(),
            material: self.name.clone(),
            thickness,
            is_core,
            role: if is_core { LayerRole::Structure } else { self.role },
            pattern: Some(self.pattern.clone()),
            conductivity: self.conductivity,
            density: self.density,
            specific_heat: self.specific_heat,
        }
    }

    /// Copies this material's properties onto an existing layer.
    pub fn apply_to(&self, layer: &mut WallLayer) {
        if layer.name.eq_ignore_ascii_case(&layer.material) {
            layer.name.clone_from(&self.name);
        }
        layer.material.clone_from(&self.name);
        layer.conductivity = self.conductivity;
        layer.density = self.density;
        layer.specific_heat = self.specific_heat;
        layer.pattern = Some(self.pattern.clone());
        if !layer.is_core {
            layer.role = self.role;
        }
    }
}

/// The set of known materials. Lookups ignore ASCII case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        use LayerRole as R;
        use MaterialCategory as C;
        let whole = || SizeRule::WholeMillimetre;
        Self {
            materials: vec![
                Material::builtin("Concrete", C::Concrete, 2.3, 2300.0, 1000.0, "concrete", SizeRule::Step { step: 25.0, min: 100.0 }, R::Structure),
                Material::builtin("Clay Brick", C::Masonry, 0.77, 1750.0, 800.0, "brick", SizeRule::Brick, R::Structure),
                Material::builtin("Concrete Block", C::Masonry, 0.51, 1400.0, 1000.0, "block", SizeRule::Block, R::Structure),
                Material::builtin("Timber Stud", C::Timber, 0.13, 500.0, 1600.0, "timber", SizeRule::Table { sizes: TIMBER_SIZES.to_vec() }, R::Structure),
                Material::builtin("Mineral Wool", C::Insulation, 0.035, 30.0, 1030.0, "insulation", whole(), R::Insulation),
                Material::builtin("EPS", C::Insulation, 0.038, 20.0, 1450.0, "insulation", whole(), R::Insulation),
                Material::builtin("Gypsum Plaster", C::Plaster, 0.57, 1300.0, 1000.0, "plaster", whole(), R::Finish),
                Material::builtin("Plasterboard", C::Board, 0.21, 700.0, 1000.0, "board", whole(), R::Finish),
                Material::builtin("Cement Render", C::Plaster, 1.0, 1800.0, 1000.0, "render", whole(), R::Finish),
                Material::builtin("Steel", C::Metal, 50.0, 7800.0, 450.0, "steel", whole(), R::Structure),
                Material::builtin("Air Gap", C::Air, 0.0, 1.2, 1000.0, "none", whole(), R::AirGap),
            ],
        }
    }
}

impl MaterialLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn empty() -> Self {
        Self { materials: Vec::new() }
    }

    /// Adds a material, replacing any existing one with the same name.
    pub fn insert(&mut self, material: Material) {
        self.materials.retain(|m| !m.name.eq_ignore_ascii_case(&material.name));
        self.materials.push(material);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Like [`MaterialLibrary::get`] but fails for unknown names.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::UnknownMaterial`].
    pub fn require(&self, name: &str) -> Result<&Material> {
        self.get(name)
            .ok_or_else(|| AssemblyError::UnknownMaterial(name.to_owned()).into())
    }

    /// Size rule for a material name; unknown materials use whole millimetres.
    #[must_use]
    pub fn size_rule(&self, name: &str) -> SizeRule {
        self.get(name).map_or(SizeRule::WholeMillimetre, |m| m.size_rule.clone())
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<MaterialCategory> {
        self.get(name).map(|m| m.category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}
