use std::collections::{HashMap, HashSet};

use super::hierarchy::BuildHierarchy;
use super::map_rooms::{dedupe_faces, MapRooms};
use super::trace_faces::{trace_graph, TracedFace};
use crate::config::EngineConfig;
use crate::model::{Room, Wall};
use crate::topology::WallGraph;

/// Recomputes the full room set from the wall set.
///
/// Runs face tracing, deduplication, identity mapping against the previous
/// rooms, and the hierarchy build. The result is ordered by canonical
/// boundary key and is fully determined by the inputs.
///
/// With [`DetectRooms::with_changed_walls`], only connected components of the
/// wall graph touched by the change are re-traced; rooms elsewhere are carried
/// over from `previous`. This requires `previous` to be the detection result
/// for the pre-edit walls, and yields the same rooms as a full recompute.
pub struct DetectRooms<'a> {
    walls: &'a [Wall],
    previous: &'a [Room],
    changed: Option<HashSet<&'a str>>,
    config: EngineConfig,
}

impl<'a> DetectRooms<'a> {
    /// Creates a detection over `walls` with no previous rooms.
    #[must_use]
    pub fn new(walls: &'a [Wall]) -> Self {
        Self {
            walls,
            previous: &[],
            changed: None,
            config: EngineConfig::default(),
        }
    }

    /// Sets the rooms from the last accepted state, used for identity continuity.
    #[must_use]
    pub fn with_previous(mut self, previous: &'a [Room]) -> Self {
        self.previous = previous;
        self
    }

    /// Restricts re-tracing to components touched by these wall ids.
    ///
    /// Ids of removed walls belong here too.
    #[must_use]
    pub fn with_changed_walls(mut self, changed: &'a [String]) -> Self {
        self.changed = Some(changed.iter().map(String::as_str).collect());
        self
    }

    /// Sets custom tolerances.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the detection.
    #[must_use]
    pub fn execute(&self) -> Vec<Room> {
        let graph = WallGraph::build(self.walls, self.config.snap_tolerance);
        let faces = if graph.can_enclose() {
            match &self.changed {
                None => trace_graph(&graph, &self.config, |_| true),
                Some(changed) => self.trace_incremental(&graph, changed),
            }
        } else {
            Vec::new()
        };

        let flat = MapRooms::new(dedupe_faces(faces), self.previous)
            .with_config(self.config)
            .execute();
        BuildHierarchy::new(flat).with_config(self.config).execute()
    }

    fn trace_incremental(&self, graph: &WallGraph, changed: &HashSet<&str>) -> Vec<TracedFace> {
        let components = graph.edge_components();
        let component_of: HashMap<&str, usize> = graph
            .edges()
            .iter()
            .zip(&components)
            .map(|(e, &c)| (e.wall_id.as_str(), c))
            .collect();

        let stale = |room: &Room| {
            room.wall_ids
                .iter()
                .any(|id| changed.contains(id.as_str()) || !component_of.contains_key(id.as_str()))
        };

        // A component is dirty when it holds a changed wall, or a wall of a
        // previous room that the change invalidated (e.g. a removed separator).
        let mut dirty: HashSet<usize> = graph
            .edges()
            .iter()
            .zip(&components)
            .filter(|(e, _)| changed.contains(e.wall_id.as_str()))
            .map(|(_, &c)| c)
            .collect();
        for room in self.previous.iter().filter(|r| stale(r)) {
            dirty.extend(room.wall_ids.iter().filter_map(|id| component_of.get(id.as_str())));
        }

        let mut faces = trace_graph(graph, &self.config, |e| dirty.contains(&components[e]));
        let carried = self.previous.iter().filter(|r| {
            !stale(r)
                && r.wall_ids
                    .iter()
                    .all(|id| component_of.get(id.as_str()).is_some_and(|c| !dirty.contains(c)))
        });
        faces.extend(carried.map(face_of_room));

        tracing::debug!(
            dirty = dirty.len(),
            faces = faces.len(),
            "incremental room trace"
        );
        faces
    }
}

fn face_of_room(room: &Room) -> TracedFace {
    TracedFace {
        wall_ids: room.wall_ids.clone(),
        vertices: room.vertices.clone(),
        signed_area: room.gross_area,
        perimeter: room.perimeter,
        centroid: room.centroid,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use approx::assert_relative_eq;

    fn wall(id: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Wall {
        Wall::new(id, Point2::new(x0, y0), Point2::new(x1, y1))
    }

    fn rectangle(prefix: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Wall> {
        vec![
            wall(&format!("{prefix}-s"), x0, y0, x1, y0),
            wall(&format!("{prefix}-e"), x1, y0, x1, y1),
            wall(&format!("{prefix}-n"), x1, y1, x0, y1),
            wall(&format!("{prefix}-w"), x0, y1, x0, y0),
        ]
    }

    #[test]
    fn nested_rectangles_hierarchy() {
        let mut walls = rectangle("outer", 0.0, 0.0, 400.0, 300.0);
        walls.extend(rectangle("inner", 100.0, 100.0, 300.0, 200.0));
        let rooms = DetectRooms::new(&walls).execute();
        assert_eq!(rooms.len(), 2);

        let outer = rooms.iter().find(|r| r.wall_ids.contains(&"outer-s".to_string())).unwrap();
        let inner = rooms.iter().find(|r| r.wall_ids.contains(&"inner-s".to_string())).unwrap();
        assert_relative_eq!(outer.gross_area, 120_000.0, epsilon = 1e-6);
        assert_relative_eq!(outer.net_area, 100_000.0, epsilon = 1e-6);
        assert_eq!(inner.parent_room_id.as_ref(), Some(&outer.id));
    }

    #[test]
    fn renamed_room_survives_unrelated_edit() {
        let mut walls = rectangle("a", 0.0, 0.0, 400.0, 300.0);
        let mut rooms = DetectRooms::new(&walls).execute();
        rooms[0].name = "Studio".into();

        walls.extend(rectangle("b", 1000.0, 0.0, 1200.0, 200.0));
        let again = DetectRooms::new(&walls).with_previous(&rooms).execute();
        assert_eq!(again.len(), 2);
        let studio = again.iter().find(|r| r.name == "Studio").unwrap();
        assert_eq!(studio.id, rooms[0].id);
        assert!(again.iter().any(|r| r.name == "Room 1"));
    }

    #[test]
    fn incremental_matches_full_recompute() {
        let mut walls = rectangle("a", 0.0, 0.0, 400.0, 300.0);
        walls.extend(rectangle("b", 1000.0, 0.0, 1200.0, 200.0));
        let before = DetectRooms::new(&walls).execute();

        // Split room b with a new wall.
        walls.retain(|w| w.id != "b-s" && w.id != "b-n");
        walls.push(wall("b-s1", 1000.0, 0.0, 1100.0, 0.0));
        walls.push(wall("b-s2", 1100.0, 0.0, 1200.0, 0.0));
        walls.push(wall("b-n1", 1200.0, 200.0, 1100.0, 200.0));
        walls.push(wall("b-n2", 1100.0, 200.0, 1000.0, 200.0));
        walls.push(wall("b-mid", 1100.0, 0.0, 1100.0, 200.0));
        let changed: Vec<String> = ["b-s", "b-n", "b-s1", "b-s2", "b-n1", "b-n2", "b-mid"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();

        let full = DetectRooms::new(&walls).with_previous(&before).execute();
        let incremental = DetectRooms::new(&walls)
            .with_previous(&before)
            .with_changed_walls(&changed)
            .execute();
        assert_eq!(full.len(), 3);
        assert_eq!(full, incremental);
    }

    #[test]
    fn incremental_handles_removed_separator() {
        let walls = vec![
            wall("s1", 0.0, 0.0, 200.0, 0.0),
            wall("s2", 200.0, 0.0, 400.0, 0.0),
            wall("e", 400.0, 0.0, 400.0, 300.0),
            wall("n2", 400.0, 300.0, 200.0, 300.0),
            wall("n1", 200.0, 300.0, 0.0, 300.0),
            wall("w", 0.0, 300.0, 0.0, 0.0),
            wall("mid", 200.0, 0.0, 200.0, 300.0),
        ];
        let before = DetectRooms::new(&walls).execute();
        assert_eq!(before.len(), 2);

        let after: Vec<Wall> = walls.into_iter().filter(|w| w.id != "mid").collect();
        let changed = vec!["mid".to_string()];
        let full = DetectRooms::new(&after).with_previous(&before).execute();
        let incremental = DetectRooms::new(&after)
            .with_previous(&before)
            .with_changed_walls(&changed)
            .execute();
        assert_eq!(full.len(), 1);
        assert_relative_eq!(full[0].gross_area, 120_000.0, epsilon = 1e-6);
        assert_eq!(full, incremental);
    }
}
