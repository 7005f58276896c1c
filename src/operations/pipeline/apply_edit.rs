use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::math::Point2;
use crate::model::{Endpoint, Room, Wall, WallTemplate};
use crate::operations::assembly::WallTypeRegistry;
use crate::operations::detection::DetectRooms;
use crate::operations::editing::{
    IdGenerator, InsertWall, MoveWallEndpoint, RemoveWall, WallChanges,
};
use crate::operations::validation::{ValidateRooms, ValidationReport};

/// A structural edit requested by a drawing tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WallEdit {
    /// Draw a segment; overlapping walls are reused.
    #[serde(rename_all = "camelCase")]
    Insert {
        start: Point2,
        end: Point2,
        #[serde(default)]
        template: WallTemplate,
    },
    /// Drag a wall endpoint together with its junction.
    #[serde(rename_all = "camelCase")]
    MoveEndpoint {
        wall_id: String,
        endpoint: Endpoint,
        target: Point2,
    },
    #[serde(rename_all = "camelCase")]
    Remove { wall_id: String },
}

/// The proposed state after an edit.
///
/// When `accepted` is `false` the validator found blocking errors and the
/// caller is expected to keep its pre-edit walls and rooms.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub walls: Vec<Wall>,
    pub rooms: Vec<Room>,
    pub changes: WallChanges,
    pub report: ValidationReport,
    pub accepted: bool,
}

/// Runs one wall edit through topology editing, room detection and validation.
///
/// The inputs are never modified; the outcome carries the new state.
pub struct ApplyWallEdit<'a> {
    walls: &'a [Wall],
    rooms: &'a [Room],
    edit: WallEdit,
    incremental: bool,
    registry: Option<&'a WallTypeRegistry>,
    config: EngineConfig,
}

impl<'a> ApplyWallEdit<'a> {
    /// Creates an edit of the accepted state `(walls, rooms)`.
    #[must_use]
    pub fn new(walls: &'a [Wall], rooms: &'a [Room], edit: WallEdit) -> Self {
        Self {
            walls,
            rooms,
            edit,
            incremental: false,
            registry: None,
            config: EngineConfig::default(),
        }
    }

    /// Re-traces only the graph components touched by the edit.
    ///
    /// `rooms` must then be the detection result for `walls`.
    #[must_use]
    pub fn incremental(mut self, enabled: bool) -> Self {
        self.incremental = enabled;
        self
    }

    /// Resolves inserted walls' thickness from their wall type.
    #[must_use]
    pub fn with_registry(mut self, registry: &'a WallTypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets custom tolerances.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the edit.
    ///
    /// # Errors
    ///
    /// Returns an error when the edit references an unknown wall, or an
    /// inserted template names a wall type missing from the registry. Validation
    /// failures are not errors; they show up in [`EditOutcome::accepted`].
    pub fn execute(&self, ids: &mut dyn IdGenerator) -> Result<EditOutcome> {
        let mut walls = self.walls.to_vec();
        let changes = match &self.edit {
            WallEdit::Insert { start, end, template } => {
                let template = match self.registry {
                    Some(registry) => registry.resolve_template(template)?,
                    None => template.clone(),
                };
                InsertWall::new(*start, *end)
                    .with_template(template)
                    .with_config(self.config)
                    .execute(&mut walls, ids)?
            }
            WallEdit::MoveEndpoint {
                wall_id,
                endpoint,
                target,
            } => MoveWallEndpoint::new(wall_id, *endpoint, *target)
                .with_config(self.config)
                .execute(&mut walls)?,
            WallEdit::Remove { wall_id } => RemoveWall::new(wall_id)
                .with_config(self.config)
                .execute(&mut walls)?,
        };

        let touched = changes.touched();
        let mut detect = DetectRooms::new(&walls)
            .with_previous(self.rooms)
            .with_config(self.config);
        if self.incremental {
            detect = detect.with_changed_walls(&touched);
        }
        let rooms = detect.execute();

        let report = ValidateRooms::new(&rooms).with_config(self.config).execute();
        let accepted = report.is_valid();
        if !accepted {
            tracing::debug!(
                errors = report.errors.len(),
                first = %report.errors[0],
                "wall edit rejected by validation"
            );
        }

        Ok(EditOutcome {
            walls,
            rooms,
            changes,
            report,
            accepted,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::editing::SequentialIds;
    use approx::assert_relative_eq;

    fn draw(walls: &mut Vec<Wall>, rooms: &mut Vec<Room>, ids: &mut SequentialIds, a: (f64, f64), b: (f64, f64)) {
        let edit = WallEdit::Insert {
            start: Point2::new(a.0, a.1),
            end: Point2::new(b.0, b.1),
            template: WallTemplate::default(),
        };
        let outcome = ApplyWallEdit::new(walls, rooms, edit).execute(ids).unwrap();
        assert!(outcome.accepted);
        *walls = outcome.walls;
        *rooms = outcome.rooms;
    }

    #[test]
    fn drawing_a_room_then_dividing_it() {
        let mut walls = Vec::new();
        let mut rooms = Vec::new();
        let mut ids = SequentialIds::default();
        let corners = [(0.0, 0.0), (400.0, 0.0), (400.0, 300.0), (0.0, 300.0)];
        for i in 0..4 {
            draw(&mut walls, &mut rooms, &mut ids, corners[i], corners[(i + 1) % 4]);
        }
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "Room 1");
        rooms[0].name = "Lounge".into();

        draw(&mut walls, &mut rooms, &mut ids, (200.0, 0.0), (200.0, 300.0));
        assert_eq!(walls.len(), 7);
        assert_eq!(rooms.len(), 2);
        for room in &rooms {
            assert_relative_eq!(room.gross_area, 60_000.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn typed_walls_get_their_type_thickness() {
        let registry =
            WallTypeRegistry::with_defaults(&crate::operations::assembly::MaterialLibrary::default()).unwrap();
        let edit = WallEdit::Insert {
            start: Point2::new(0.0, 0.0),
            end: Point2::new(400.0, 0.0),
            template: WallTemplate {
                wall_type_id: Some("concrete-200".into()),
                ..WallTemplate::default()
            },
        };
        let mut ids = SequentialIds::default();
        let outcome = ApplyWallEdit::new(&[], &[], edit.clone())
            .with_registry(&registry)
            .execute(&mut ids)
            .unwrap();
        assert_relative_eq!(outcome.walls[0].thickness, 228.0, epsilon = 1e-9);

        let empty = WallTypeRegistry::new();
        assert!(ApplyWallEdit::new(&[], &[], edit)
            .with_registry(&empty)
            .execute(&mut ids)
            .is_err());
    }

    #[test]
    fn unknown_wall_is_error() {
        let edit = WallEdit::Remove { wall_id: "ghost".into() };
        let mut ids = SequentialIds::default();
        assert!(ApplyWallEdit::new(&[], &[], edit).execute(&mut ids).is_err());
    }

    #[test]
    fn edit_deserializes_from_json() {
        let edit: WallEdit = serde_json::from_str(
            r#"{"kind":"moveEndpoint","wallId":"w1","endpoint":"end","target":[10.0,20.0]}"#,
        )
        .unwrap();
        assert_eq!(
            edit,
            WallEdit::MoveEndpoint {
                wall_id: "w1".into(),
                endpoint: Endpoint::End,
                target: Point2::new(10.0, 20.0),
            }
        );
    }
}
