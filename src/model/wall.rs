use serde::{Deserialize, Serialize};

use super::assembly::{WallLayer, WallTypeDefinition};
use super::thermal::total_thickness;
use crate::math::distance_2d::distance;
use crate::math::{Point2, Vector2};

/// One of the two ends of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Endpoint {
    Start,
    End,
}

/// Kind of cut-out carried by a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpeningKind {
    Door,
    Window,
}

/// A door or window placed along a wall.
///
/// Openings do not take part in topology; they only follow their host wall
/// through splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    pub id: String,
    pub kind: OpeningKind,
    /// Position of the opening centre as a fraction of the wall length, in `[0, 1]`.
    pub position: f64,
    /// Opening width in plan units.
    pub width: f64,
}

/// A straight wall segment.
///
/// `connected_wall_ids` is derived state: editing operations rebuild it from
/// endpoint coincidence and callers should never edit it by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: String,
    pub start: Point2,
    pub end: Point2,
    /// Total thickness in millimetres.
    pub thickness: f64,
    /// Height in millimetres.
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_type_id: Option<String>,
    /// Instance-level layer stack overriding the referenced wall type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_layers: Option<Vec<WallLayer>>,
    #[serde(default)]
    pub is_wall_type_override: bool,
    #[serde(default)]
    pub connected_wall_ids: Vec<String>,
    #[serde(default)]
    pub openings: Vec<Opening>,
}

impl Wall {
    /// Creates a plain wall with default thickness and height and no assembly.
    #[must_use]
    pub fn new(id: impl Into<String>, start: Point2, end: Point2) -> Self {
        WallTemplate::default().instantiate(id, start, end)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// Vector from `start` to `end`.
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    /// Returns `true` when the wall is shorter than `epsilon`.
    #[must_use]
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.length() < epsilon
    }

    /// Point at parameter `t` along the wall (`0` = start, `1` = end).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.vector() * t
    }

    #[must_use]
    pub fn endpoint(&self, which: Endpoint) -> Point2 {
        match which {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    pub fn set_endpoint(&mut self, which: Endpoint, point: Point2) {
        match which {
            Endpoint::Start => self.start = point,
            Endpoint::End => self.end = point,
        }
    }
}

/// Assembly defaults applied to walls created by drawing tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WallTemplate {
    pub thickness: f64,
    pub height: f64,
    pub wall_type_id: Option<String>,
    pub wall_layers: Option<Vec<WallLayer>>,
}

impl Default for WallTemplate {
    fn default() -> Self {
        Self {
            thickness: 100.0,
            height: 2700.0,
            wall_type_id: None,
            wall_layers: None,
        }
    }
}

impl WallTemplate {
    /// Template for walls that follow `definition` exactly.
    #[must_use]
    pub fn for_type(definition: &WallTypeDefinition) -> Self {
        Self {
            thickness: definition.total_thickness,
            wall_type_id: Some(definition.id.clone()),
            ..Self::default()
        }
    }

    /// Creates a wall segment carrying these defaults.
    ///
    /// A layer override fixes the thickness to the sum of its layers. A bare
    /// `wall_type_id` cannot be looked up here, so the template's own
    /// thickness is used; resolve it against the wall type registry first.
    #[must_use]
    pub fn instantiate(&self, id: impl Into<String>, start: Point2, end: Point2) -> Wall {
        let thickness = match &self.wall_layers {
            Some(layers) if !layers.is_empty() => total_thickness(layers),
            _ => self.thickness,
        };
        Wall {
            id: id.into(),
            start,
            end,
            thickness,
            height: self.height,
            wall_type_id: self.wall_type_id.clone(),
            wall_layers: self.wall_layers.clone(),
            is_wall_type_override: false,
            connected_wall_ids: Vec::new(),
            openings: Vec::new(),
        }
    }
}
