use std::collections::{HashMap, HashSet, VecDeque};

use super::canonical::{canonical_cycle_key, room_id_for_key};
use super::naming::RoomNamer;
use super::trace_faces::TracedFace;
use crate::config::EngineConfig;
use crate::math::distance_2d::distance;
use crate::model::{Room, RoomType};

/// Maximum relative area difference for the geometric identity fallback.
const IDENTITY_AREA_RATIO: f64 = 0.005;

/// A traced face together with its canonical boundary key.
#[derive(Debug, Clone)]
pub struct KeyedFace {
    pub key: String,
    pub face: TracedFace,
}

/// Collapses faces that describe the same wall loop.
///
/// Among faces sharing a canonical key the smallest area wins. The result is
/// ordered by key.
#[must_use]
pub fn dedupe_faces(faces: Vec<TracedFace>) -> Vec<KeyedFace> {
    let mut by_key: HashMap<String, TracedFace> = HashMap::new();
    for face in faces {
        let key = canonical_cycle_key(&face.wall_ids);
        match by_key.get(&key) {
            Some(existing) if existing.signed_area <= face.signed_area => {}
            _ => {
                by_key.insert(key, face);
            }
        }
    }
    let mut keyed: Vec<KeyedFace> = by_key
        .into_iter()
        .map(|(key, face)| KeyedFace { key, face })
        .collect();
    keyed.sort_by(|a, b| a.key.cmp(&b.key));
    keyed
}

/// Maps detected faces onto persistent room records.
///
/// Each face first looks for a previous room with the same canonical boundary
/// key and inherits its identity (id, name, color, space type, heights and
/// manual parent pin). Faces left unmatched may still inherit from an
/// unclaimed previous room with the same footprint, which keeps names stable
/// when a boundary wall was split and re-identified. Anything else becomes a
/// new room named `"Room N"`.
///
/// The returned rooms are flat: no parent or children yet.
pub struct MapRooms<'a> {
    faces: Vec<KeyedFace>,
    previous: &'a [Room],
    config: EngineConfig,
}

impl<'a> MapRooms<'a> {
    /// Creates a mapping over deduplicated faces.
    #[must_use]
    pub fn new(faces: Vec<KeyedFace>, previous: &'a [Room]) -> Self {
        Self {
            faces,
            previous,
            config: EngineConfig::default(),
        }
    }

    /// Sets custom tolerances.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the mapping.
    #[must_use]
    pub fn execute(self) -> Vec<Room> {
        let previous = self.previous;
        let mut buckets: HashMap<String, VecDeque<usize>> = HashMap::new();
        for (i, room) in previous.iter().enumerate() {
            buckets
                .entry(canonical_cycle_key(&room.wall_ids))
                .or_default()
                .push_back(i);
        }

        let mut claimed = vec![false; previous.len()];
        let mut matches: Vec<Option<usize>> = self
            .faces
            .iter()
            .map(|kf| {
                let idx = buckets.get_mut(&kf.key)?.pop_front()?;
                claimed[idx] = true;
                Some(idx)
            })
            .collect();

        for (kf, slot) in self.faces.iter().zip(matches.iter_mut()) {
            if slot.is_some() {
                continue;
            }
            *slot = find_footprint_match(&kf.face, previous, &claimed, &self.config);
            if let Some(idx) = *slot {
                claimed[idx] = true;
                tracing::debug!(room = %previous[idx].id, "room identity kept by footprint");
            }
        }

        let mut namer = RoomNamer::new(previous.iter().map(|r| r.name.as_str()));
        let mut used_ids: HashSet<String> = matches
            .iter()
            .flatten()
            .map(|&i| previous[i].id.clone())
            .collect();

        self.faces
            .into_iter()
            .zip(matches)
            .map(|(kf, matched)| match matched {
                Some(idx) => room_from_face(kf.face, &previous[idx], previous[idx].id.clone()),
                None => {
                    let id = fresh_id(&kf.key, &mut used_ids);
                    let name = namer.next_name();
                    new_room_from_face(kf.face, id, name)
                }
            })
            .collect()
    }
}

fn find_footprint_match(
    face: &TracedFace,
    previous: &[Room],
    claimed: &[bool],
    config: &EngineConfig,
) -> Option<usize> {
    previous.iter().enumerate().position(|(i, room)| {
        if claimed[i] {
            return false;
        }
        let scale = face.signed_area.max(room.gross_area);
        distance(&face.centroid, &room.centroid) <= config.snap_tolerance
            && (face.signed_area - room.gross_area).abs() <= scale * IDENTITY_AREA_RATIO
    })
}

fn fresh_id(key: &str, used: &mut HashSet<String>) -> String {
    let base = room_id_for_key(key);
    let mut id = base.clone();
    let mut n = 2;
    while used.contains(&id) {
        id = format!("{base}-{n}");
        n += 1;
    }
    used.insert(id.clone());
    id
}

fn new_room_from_face(face: TracedFace, id: String, name: String) -> Room {
    let area = face.signed_area;
    Room {
        id,
        name,
        vertices: face.vertices,
        wall_ids: face.wall_ids,
        parent_room_id: None,
        child_room_ids: Vec::new(),
        gross_area: area,
        net_area: area,
        perimeter: face.perimeter,
        centroid: face.centroid,
        room_type: RoomType::EnclosedSpace,
        space_type: String::new(),
        manual_parent_room_id: None,
        color: None,
        floor_height: None,
        ceiling_height: None,
    }
}

fn room_from_face(face: TracedFace, identity: &Room, id: String) -> Room {
    let mut room = new_room_from_face(face, id, identity.name.clone());
    room.manual_parent_room_id.clone_from(&identity.manual_parent_room_id);
    room.color.clone_from(&identity.color);
    room.space_type.clone_from(&identity.space_type);
    room.floor_height = identity.floor_height;
    room.ceiling_height = identity.ceiling_height;
    room
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn face(ids: &[&str], area: f64, cx: f64) -> TracedFace {
        TracedFace {
            wall_ids: ids.iter().map(|s| (*s).to_string()).collect(),
            vertices: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
            ],
            signed_area: area,
            perimeter: 0.0,
            centroid: Point2::new(cx, 0.0),
        }
    }

    #[test]
    fn dedupe_keeps_smallest_area() {
        let faces = vec![
            face(&["a", "b", "c"], 500.0, 0.0),
            face(&["c", "b", "a"], 100.0, 0.0),
            face(&["x", "y", "z"], 50.0, 0.0),
        ];
        let keyed = dedupe_faces(faces);
        assert_eq!(keyed.len(), 2);
        assert_eq!(keyed[0].key, "a|b|c");
        assert!((keyed[0].face.signed_area - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_rooms_are_numbered() {
        let keyed = dedupe_faces(vec![face(&["a", "b", "c"], 100.0, 0.0), face(&["d", "e", "f"], 100.0, 50.0)]);
        let rooms = MapRooms::new(keyed, &[]).execute();
        assert_eq!(rooms[0].name, "Room 1");
        assert_eq!(rooms[1].name, "Room 2");
        assert_ne!(rooms[0].id, rooms[1].id);
        assert!((rooms[0].net_area - rooms[0].gross_area).abs() < f64::EPSILON);
    }

    #[test]
    fn identity_survives_by_key() {
        let first = MapRooms::new(dedupe_faces(vec![face(&["a", "b", "c"], 100.0, 0.0)]), &[]).execute();
        let mut previous = first.clone();
        previous[0].name = "Kitchen".into();
        previous[0].id = "custom-id".into();
        previous[0].color = Some("#ff0000".into());
        previous[0].space_type = "Cooking".into();

        // Same loop traced from another start and direction, elsewhere in the plan.
        let again = MapRooms::new(dedupe_faces(vec![face(&["b", "a", "c"], 100.0, 900.0)]), &previous).execute();
        assert_eq!(again[0].id, "custom-id");
        assert_eq!(again[0].name, "Kitchen");
        assert_eq!(again[0].color.as_deref(), Some("#ff0000"));
        assert_eq!(again[0].space_type, "Cooking");
    }

    #[test]
    fn identity_survives_by_footprint() {
        let mut previous = MapRooms::new(dedupe_faces(vec![face(&["a", "b", "c"], 100.0, 0.0)]), &[]).execute();
        previous[0].name = "Hall".into();

        // Wall "a" was split into "a" and "a2": new key, same footprint.
        let rooms = MapRooms::new(dedupe_faces(vec![face(&["a", "a2", "b", "c"], 100.0, 0.1)]), &previous).execute();
        assert_eq!(rooms[0].name, "Hall");
        assert_eq!(rooms[0].id, previous[0].id);
    }

    #[test]
    fn numbering_skips_existing_names() {
        let mut previous = MapRooms::new(dedupe_faces(vec![face(&["a", "b", "c"], 100.0, 0.0)]), &[]).execute();
        previous[0].name = "Room 7".into();
        let rooms = MapRooms::new(
            dedupe_faces(vec![face(&["a", "b", "c"], 100.0, 0.0), face(&["d", "e", "f"], 100.0, 500.0)]),
            &previous,
        )
        .execute();
        assert_eq!(rooms[0].name, "Room 7");
        assert_eq!(rooms[1].name, "Room 8");
    }
}
