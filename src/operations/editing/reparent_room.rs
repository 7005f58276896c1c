use crate::config::EngineConfig;
use crate::error::{OperationError, Result, TopologyError};
use crate::model::Room;
use crate::operations::detection::BuildHierarchy;

/// Result of a manual reparent.
#[derive(Debug, Clone)]
pub struct ReparentOutcome {
    pub rooms: Vec<Room>,
    /// Set when the requested parent did not contain the room and the pin
    /// was corrected to the detected parent.
    pub warning: Option<String>,
}

/// Pins a room under a chosen parent, or clears the pin.
///
/// The hierarchy is rebuilt from the existing room polygons; walls are not
/// re-traced.
pub struct ReparentRoom<'a> {
    room_id: &'a str,
    parent_id: Option<&'a str>,
    config: EngineConfig,
}

impl<'a> ReparentRoom<'a> {
    /// Creates a reparent of `room_id`. `None` clears the manual pin.
    #[must_use]
    pub fn new(room_id: &'a str, parent_id: Option<&'a str>) -> Self {
        Self {
            room_id,
            parent_id,
            config: EngineConfig::default(),
        }
    }

    /// Sets custom tolerances.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the reparent.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::RoomNotFound`] when either id is unknown and
    /// [`OperationError::InvalidInput`] when a room is pinned under itself.
    pub fn execute(&self, rooms: &[Room]) -> Result<ReparentOutcome> {
        if !rooms.iter().any(|r| r.id == self.room_id) {
            return Err(TopologyError::RoomNotFound(self.room_id.to_owned()).into());
        }
        if let Some(parent) = self.parent_id {
            if parent == self.room_id {
                return Err(OperationError::InvalidInput(format!("room {parent} cannot contain itself")).into());
            }
            if !rooms.iter().any(|r| r.id == parent) {
                return Err(TopologyError::RoomNotFound(parent.to_owned()).into());
            }
        }

        let mut rooms = rooms.to_vec();
        for room in rooms.iter_mut().filter(|r| r.id == self.room_id) {
            room.manual_parent_room_id = self.parent_id.map(str::to_owned);
        }
        let rooms = BuildHierarchy::new(rooms).with_config(self.config).execute();

        let warning = self.parent_id.and_then(|requested| {
            let room = rooms.iter().find(|r| r.id == self.room_id)?;
            (room.parent_room_id.as_deref() != Some(requested)).then(|| {
                let requested_name = rooms
                    .iter()
                    .find(|r| r.id == requested)
                    .map_or(requested, |r| r.name.as_str());
                format!(
                    "\"{}\" does not lie inside \"{}\"; kept at its detected position",
                    room.name, requested_name
                )
            })
        });
        if let Some(message) = &warning {
            tracing::debug!(room = %self.room_id, "{message}");
        }

        Ok(ReparentOutcome { rooms, warning })
    }
}
