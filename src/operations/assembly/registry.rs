use serde::{Deserialize, Serialize};

use super::materials::MaterialLibrary;
use crate::error::{AssemblyError, Result};
use crate::model::{WallLayer, WallTemplate, WallTypeDefinition};

/// Named wall types, looked up by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WallTypeRegistry {
    types: Vec<WallTypeDefinition>,
}

impl WallTypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in wall types.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::UnknownMaterial`] when `library` lacks one
    /// of the materials the built-in types use.
    pub fn with_defaults(library: &MaterialLibrary) -> Result<Self> {
        let layer = |material: &str, thickness: f64, is_core: bool| -> Result<WallLayer> {
            Ok(library.require(material)?.layer(thickness, is_core))
        };

        let mut outer_leaf = layer("Clay Brick", 102.5, false)?;
        outer_leaf.name = "Outer Leaf".into();

        let mut registry = Self::new();
        registry.insert(WallTypeDefinition::new(
            "external-cavity-brick",
            "Cavity Brick External Wall",
            vec![
                outer_leaf,
                layer("Air Gap", 50.0, false)?,
                layer("Mineral Wool", 100.0, false)?,
                layer("Concrete Block", 90.0, true)?,
                layer("Gypsum Plaster", 13.0, false)?,
            ],
        ));
        registry.insert(WallTypeDefinition::new(
            "partition-stud",
            "Stud Partition",
            vec![
                layer("Plasterboard", 12.5, false)?,
                layer("Timber Stud", 89.0, true)?,
                layer("Plasterboard", 12.5, false)?,
            ],
        ));
        registry.insert(WallTypeDefinition::new(
            "concrete-200",
            "200 Concrete Wall",
            vec![
                layer("Cement Render", 15.0, false)?,
                layer("Concrete", 200.0, true)?,
                layer("Gypsum Plaster", 13.0, false)?,
            ],
        ));
        Ok(registry)
    }

    /// Adds a wall type, replacing any type with the same id.
    pub fn insert(&mut self, definition: WallTypeDefinition) {
        match self.types.iter_mut().find(|t| t.id == definition.id) {
            Some(existing) => *existing = definition,
            None => self.types.push(definition),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WallTypeDefinition> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Like [`WallTypeRegistry::get`] but fails for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::UnknownWallType`].
    pub fn require(&self, id: &str) -> Result<&WallTypeDefinition> {
        self.get(id)
            .ok_or_else(|| AssemblyError::UnknownWallType(id.to_owned()).into())
    }

    /// Fills in a drawing template's thickness from its wall type.
    ///
    /// Templates with their own layers, or without a type, come back as they
    /// are.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::UnknownWallType`] for an unregistered type.
    pub fn resolve_template(&self, template: &WallTemplate) -> Result<WallTemplate> {
        let mut resolved = template.clone();
        if resolved.wall_layers.as_ref().is_none_or(Vec::is_empty) {
            if let Some(id) = &template.wall_type_id {
                resolved.thickness = self.require(id)?.total_thickness;
            }
        }
        Ok(resolved)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WallTypeDefinition> {
        self.types.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
