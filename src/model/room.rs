use serde::{Deserialize, Serialize};

use crate::math::Point2;

/// Role of a room in the nesting hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    /// A room without children.
    #[default]
    EnclosedSpace,
    /// A room with both a parent and children.
    RemainingArea,
    /// A top-level room with children.
    SurroundingArea,
}

impl RoomType {
    /// Classifies a room from its position in the hierarchy.
    #[must_use]
    pub fn classify(has_parent: bool, has_children: bool) -> Self {
        match (has_parent, has_children) {
            (_, false) => Self::EnclosedSpace,
            (true, true) => Self::RemainingArea,
            (false, true) => Self::SurroundingArea,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnclosedSpace => "enclosed-space",
            Self::RemainingArea => "remaining-area",
            Self::SurroundingArea => "surrounding-area",
        }
    }
}

/// A room derived from the wall set.
///
/// Rooms are recomputed on every structural edit; only the identity fields
/// (`id`, `name`, `color`, `space_type`, heights, `manual_parent_room_id`)
/// carry over between detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    /// Closed polygon, first vertex not repeated.
    pub vertices: Vec<Point2>,
    /// Boundary walls in cyclic order.
    pub wall_ids: Vec<String>,
    #[serde(default)]
    pub parent_room_id: Option<String>,
    #[serde(default)]
    pub child_room_ids: Vec<String>,
    pub gross_area: f64,
    pub net_area: f64,
    pub perimeter: f64,
    pub centroid: Point2,
    #[serde(default)]
    pub room_type: RoomType,
    #[serde(default)]
    pub space_type: String,
    #[serde(default)]
    pub manual_parent_room_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_height: Option<f64>,
}

impl Room {
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.child_room_ids.is_empty()
    }

    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent_room_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table() {
        assert_eq!(RoomType::classify(false, false), RoomType::EnclosedSpace);
        assert_eq!(RoomType::classify(true, false), RoomType::EnclosedSpace);
        assert_eq!(RoomType::classify(true, true), RoomType::RemainingArea);
        assert_eq!(RoomType::classify(false, true), RoomType::SurroundingArea);
    }

    #[test]
    fn room_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&RoomType::SurroundingArea).ok().as_deref(),
            Some("\"surrounding-area\"")
        );
        assert_eq!(RoomType::RemainingArea.as_str(), "remaining-area");
    }
}
