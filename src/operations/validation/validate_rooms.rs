use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::math::intersect_2d::segments_intersect_strict;
use crate::math::polygon_2d::{
    is_point_strictly_inside_polygon, polygon_bounds, polygon_centroid, Bounds2,
};
use crate::math::{Point2, ORIENTATION_EPSILON};
use crate::model::Room;

/// What a validation finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    /// A child's gross area exceeds its parent's.
    ChildExceedsParent,
    /// A child covers almost all of its parent.
    ChildNearlyFillsParent,
    /// Two siblings overlap with positive area.
    SiblingOverlap,
    /// A room with children has no net area left.
    NetAreaCollapsed,
}

impl IssueKind {
    /// Returns `true` for findings that must block the edit.
    #[must_use]
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::ChildExceedsParent | Self::SiblingOverlap)
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Rooms involved, the primary one first.
    pub room_ids: Vec<String>,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Findings for one room list, split into blocking errors and warnings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns `true` when no blocking error was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, issue: ValidationIssue) {
        if issue.kind.is_blocking() {
            self.errors.push(issue);
        } else {
            self.warnings.push(issue);
        }
    }
}

/// Checks the containment and overlap invariants of a room hierarchy.
///
/// Siblings are rooms sharing the same parent, or all top-level rooms.
/// Rooms referencing a parent that is not in the list are skipped for the
/// parent checks.
pub struct ValidateRooms<'a> {
    rooms: &'a [Room],
    config: EngineConfig,
}

impl<'a> ValidateRooms<'a> {
    /// Creates a validation over `rooms`.
    #[must_use]
    pub fn new(rooms: &'a [Room]) -> Self {
        Self {
            rooms,
            config: EngineConfig::default(),
        }
    }

    /// Sets custom tolerances.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the validation.
    #[must_use]
    pub fn execute(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        let by_id: HashMap<&str, &Room> = self.rooms.iter().map(|r| (r.id.as_str(), r)).collect();

        for room in self.rooms {
            let Some(parent) = room.parent_room_id.as_deref().and_then(|id| by_id.get(id)) else {
                continue;
            };
            self.check_parent(room, parent, &mut report);
        }

        for room in self.rooms.iter().filter(|r| r.has_children()) {
            if room.net_area < self.config.min_face_area {
                report.push(ValidationIssue {
                    kind: IssueKind::NetAreaCollapsed,
                    room_ids: vec![room.id.clone()],
                    message: format!("\"{}\" has no area left outside its sub-rooms", room.name),
                });
            }
        }

        let mut groups: HashMap<Option<&str>, Vec<&Room>> = HashMap::new();
        for room in self.rooms {
            groups.entry(room.parent_room_id.as_deref()).or_default().push(room);
        }
        let mut groups: Vec<_> = groups.into_values().collect();
        groups.sort_by(|a, b| a[0].id.cmp(&b[0].id));
        for siblings in groups {
            self.check_siblings(&siblings, &mut report);
        }

        if !report.is_valid() {
            tracing::debug!(errors = report.errors.len(), "room validation failed");
        }
        report
    }

    fn check_parent(&self, room: &Room, parent: &Room, report: &mut ValidationReport) {
        let room_ids = vec![room.id.clone(), parent.id.clone()];
        if room.gross_area > parent.gross_area + self.config.area_epsilon {
            report.push(ValidationIssue {
                kind: IssueKind::ChildExceedsParent,
                room_ids,
                message: format!(
                    "\"{}\" is larger than its parent \"{}\"",
                    room.name, parent.name
                ),
            });
        } else if parent.gross_area > 0.0
            && room.gross_area / parent.gross_area >= self.config.nearly_full_ratio
        {
            report.push(ValidationIssue {
                kind: IssueKind::ChildNearlyFillsParent,
                room_ids,
                message: format!("\"{}\" nearly fills its parent \"{}\"", room.name, parent.name),
            });
        }
    }

    fn check_siblings(&self, siblings: &[&Room], report: &mut ValidationReport) {
        let bounds: Vec<Option<Bounds2>> = siblings.iter().map(|r| polygon_bounds(&r.vertices)).collect();
        for i in 0..siblings.len() {
            for j in (i + 1)..siblings.len() {
                let (Some(bi), Some(bj)) = (bounds[i], bounds[j]) else {
                    continue;
                };
                if !bi.overlaps(&bj, self.config.snap_tolerance) {
                    continue;
                }
                let (a, b) = (siblings[i], siblings[j]);
                if polygons_overlap(&a.vertices, &b.vertices, self.config.snap_tolerance) {
                    report.push(ValidationIssue {
                        kind: IssueKind::SiblingOverlap,
                        room_ids: vec![a.id.clone(), b.id.clone()],
                        message: format!("\"{}\" overlaps \"{}\"", a.name, b.name),
                    });
                }
            }
        }
    }
}

/// Returns `true` when two simple polygons share positive area.
///
/// Shared edges and touching corners do not count.
fn polygons_overlap(a: &[Point2], b: &[Point2], tolerance: f64) -> bool {
    let crossing = polygon_edges(a).any(|(a0, a1)| {
        polygon_edges(b).any(|(b0, b1)| segments_intersect_strict(&a0, &a1, &b0, &b1, ORIENTATION_EPSILON))
    });
    if crossing || has_probe_inside(b, a, tolerance) || has_probe_inside(a, b, tolerance) {
        return true;
    }

    // Identical outlines: every probe sits on the other boundary.
    is_point_strictly_inside_polygon(&polygon_centroid(a), b, tolerance)
        && is_point_strictly_inside_polygon(&polygon_centroid(b), a, tolerance)
}

fn polygon_edges(poly: &[Point2]) -> impl Iterator<Item = (Point2, Point2)> + '_ {
    let n = poly.len();
    (0..n).map(move |i| (poly[i], poly[(i + 1) % n]))
}

/// Tests the vertices and edge midpoints of `inner` against `outer`.
fn has_probe_inside(outer: &[Point2], inner: &[Point2], tolerance: f64) -> bool {
    inner
        .iter()
        .copied()
        .chain(polygon_edges(inner).map(|(p, q)| Point2::from((p.coords + q.coords) * 0.5)))
        .any(|p| is_point_strictly_inside_polygon(&p, outer, tolerance))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::signed_area;
    use crate::model::RoomType;

    fn rect_room(id: &str, parent: Option<&str>, x0: f64, y0: f64, x1: f64, y1: f64) -> Room {
        let vertices = vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ];
        let area = signed_area(&vertices);
        Room {
            id: id.into(),
            name: id.into(),
            wall_ids: Vec::new(),
            parent_room_id: parent.map(Into::into),
            child_room_ids: Vec::new(),
            gross_area: area,
            net_area: area,
            perimeter: 0.0,
            centroid: polygon_centroid(&vertices),
            room_type: RoomType::EnclosedSpace,
            space_type: String::new(),
            manual_parent_room_id: None,
            color: None,
            floor_height: None,
            ceiling_height: None,
            vertices,
        }
    }

    #[test]
    fn adjacent_rooms_are_valid() {
        let rooms = vec![
            rect_room("a", None, 0.0, 0.0, 200.0, 300.0),
            rect_room("b", None, 200.0, 0.0, 400.0, 300.0),
            rect_room("c", None, 400.0, 300.0, 500.0, 400.0),
        ];
        let report = ValidateRooms::new(&rooms).execute();
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn overlapping_siblings_are_errors() {
        let rooms = vec![
            rect_room("a", None, 0.0, 0.0, 200.0, 200.0),
            rect_room("b", None, 100.0, 100.0, 300.0, 300.0),
        ];
        let report = ValidateRooms::new(&rooms).execute();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, IssueKind::SiblingOverlap);
        assert_eq!(report.errors[0].room_ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn crossing_without_vertex_containment_is_detected() {
        // A plus sign: no vertex of either bar lies inside the other.
        let rooms = vec![
            rect_room("h", None, 0.0, 100.0, 300.0, 200.0),
            rect_room("v", None, 100.0, 0.0, 200.0, 300.0),
        ];
        assert!(!ValidateRooms::new(&rooms).execute().is_valid());
    }

    #[test]
    fn identical_siblings_overlap() {
        let rooms = vec![
            rect_room("a", None, 0.0, 0.0, 100.0, 100.0),
            rect_room("b", None, 0.0, 0.0, 100.0, 100.0),
        ];
        assert!(!ValidateRooms::new(&rooms).execute().is_valid());
    }

    #[test]
    fn child_larger_than_parent() {
        let mut parent = rect_room("p", None, 0.0, 0.0, 100.0, 100.0);
        parent.child_room_ids = vec!["c".into()];
        let child = rect_room("c", Some("p"), 0.0, 0.0, 200.0, 200.0);
        let report = ValidateRooms::new(&[parent, child]).execute();
        assert!(report
            .errors
            .iter()
            .any(|e| e.kind == IssueKind::ChildExceedsParent));
    }

    #[test]
    fn nearly_full_child_warns() {
        let mut parent = rect_room("p", None, 0.0, 0.0, 1000.0, 1000.0);
        parent.child_room_ids = vec!["c".into()];
        parent.net_area = 1_000_000.0 - 998_001.0;
        let child = rect_room("c", Some("p"), 0.5, 0.5, 999.5, 999.5);
        let report = ValidateRooms::new(&[parent, child]).execute();
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, IssueKind::ChildNearlyFillsParent);
        assert!(report.warnings[0].to_string().contains("nearly fills"));
    }

    #[test]
    fn collapsed_net_area_warns() {
        let mut parent = rect_room("p", None, 0.0, 0.0, 100.0, 100.0);
        parent.child_room_ids = vec!["c".into()];
        parent.net_area = 0.0;
        let child = rect_room("c", Some("p"), 0.0, 0.0, 50.0, 100.0);
        let report = ValidateRooms::new(&[parent, child]).execute();
        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.kind == IssueKind::NetAreaCollapsed));
    }

    #[test]
    fn children_of_different_parents_are_not_compared() {
        let rooms = vec![
            rect_room("a", Some("x"), 0.0, 0.0, 200.0, 200.0),
            rect_room("b", Some("y"), 100.0, 100.0, 300.0, 300.0),
        ];
        assert!(ValidateRooms::new(&rooms).execute().is_valid());
    }
}
