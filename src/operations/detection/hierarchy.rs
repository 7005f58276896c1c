use std::collections::{HashMap, HashSet};

use super::naming::{child_name, is_auto_generated_name};
use super::space_type::resolve_space_type;
use crate::config::EngineConfig;
use crate::math::polygon_2d::{is_point_inside_polygon_inclusive, polygon_bounds, Bounds2};
use crate::model::{Room, RoomType};

/// Builds the parent/child hierarchy of a flat room list.
///
/// A room's parent is the smallest strictly larger room that contains it:
/// bounding box first, then every vertex (boundary inclusive). A manual
/// parent pin wins when the pinned room passes the same containment test;
/// otherwise the pin is corrected to the detected parent. Afterwards child
/// names, net areas, room types and space types are derived.
pub struct BuildHierarchy {
    rooms: Vec<Room>,
    config: EngineConfig,
}

impl BuildHierarchy {
    /// Creates a hierarchy build over `rooms`. Existing parent/child links are ignored.
    #[must_use]
    pub fn new(rooms: Vec<Room>) -> Self {
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

    /// Executes the build.
    #[must_use]
    pub fn execute(self) -> Vec<Room> {
        let config = self.config;
        let mut rooms = self.rooms;
        let bounds: Vec<Option<Bounds2>> = rooms.iter().map(|r| polygon_bounds(&r.vertices)).collect();
        let index: HashMap<String, usize> = rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        let contains = |outer: usize, inner: usize| -> bool {
            outer != inner && room_contains(&rooms[outer], &rooms[inner], bounds[outer], bounds[inner], &config)
        };

        let parents: Vec<Option<usize>> = (0..rooms.len())
            .map(|i| {
                let detected = (0..rooms.len())
                    .filter(|&j| contains(j, i))
                    .min_by(|&a, &b| rooms[a].gross_area.total_cmp(&rooms[b].gross_area));
                let pinned = rooms[i]
                    .manual_parent_room_id
                    .as_ref()
                    .and_then(|id| index.get(id).copied())
                    .filter(|&j| contains(j, i));
                pinned.or(detected)
            })
            .collect();

        for (i, parent) in parents.iter().enumerate() {
            let parent_id = parent.map(|p| rooms[p].id.clone());
            let pin = &rooms[i].manual_parent_room_id;
            if pin.is_some() && *pin != parent_id {
                tracing::debug!(room = %rooms[i].id, ?pin, detected = ?parent_id, "correcting manual parent pin");
                rooms[i].manual_parent_room_id.clone_from(&parent_id);
            }
            rooms[i].parent_room_id = parent_id;
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); rooms.len()];
        for (i, parent) in parents.iter().enumerate() {
            if let Some(p) = parent {
                children[*p].push(i);
            }
        }
        for (i, kids) in children.iter().enumerate() {
            rooms[i].child_room_ids = kids.iter().map(|&c| rooms[c].id.clone()).collect();
        }

        for p in depth_order(&parents) {
            name_children(&mut rooms, p, &children[p]);
        }

        for (i, kids) in children.iter().enumerate() {
            let child_area: f64 = kids.iter().map(|&c| rooms[c].gross_area).sum();
            let room = &mut rooms[i];
            room.net_area = (room.gross_area - child_area).max(0.0);
            room.room_type = RoomType::classify(parents[i].is_some(), !kids.is_empty());
            room.space_type = resolve_space_type(
                &room.space_type,
                config.to_square_meters(room.net_area),
                parents[i].is_some(),
                !kids.is_empty(),
            );
        }

        rooms
    }
}

/// Returns `true` when `outer` is a valid parent for `inner`.
///
/// Equal areas never nest: the outer room must be strictly larger.
fn room_contains(
    outer: &Room,
    inner: &Room,
    outer_bounds: Option<Bounds2>,
    inner_bounds: Option<Bounds2>,
    config: &EngineConfig,
) -> bool {
    let (Some(ob), Some(ib)) = (outer_bounds, inner_bounds) else {
        return false;
    };
    outer.gross_area > inner.gross_area + config.area_epsilon
        && ob.contains(&ib, config.snap_tolerance)
        && inner
            .vertices
            .iter()
            .all(|v| is_point_inside_polygon_inclusive(v, &outer.vertices, config.snap_tolerance))
}

/// Room indices sorted shallow-first, stable within a depth.
fn depth_order(parents: &[Option<usize>]) -> Vec<usize> {
    let depth = |mut i: usize| {
        let mut d = 0;
        while let Some(p) = parents[i] {
            d += 1;
            i = p;
            if d > parents.len() {
                break;
            }
        }
        d
    };
    let mut order: Vec<usize> = (0..parents.len()).collect();
    order.sort_by_key(|&i| (depth(i), i));
    order
}

/// Gives auto-named children of `parent` sequential `"<Parent> - k"` names.
fn name_children(rooms: &mut [Room], parent: usize, kids: &[usize]) {
    let parent_name = rooms[parent].name.clone();
    let taken: HashSet<String> = kids
        .iter()
        .filter(|&&c| !is_auto_generated_name(&rooms[c].name))
        .map(|&c| rooms[c].name.clone())
        .collect();

    let mut k = 0;
    for &c in kids {
        if !is_auto_generated_name(&rooms[c].name) {
            continue;
        }
        let name = loop {
            k += 1;
            let candidate = child_name(&parent_name, k);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        rooms[c].name = name;
    }
}
