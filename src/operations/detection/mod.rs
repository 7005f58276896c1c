mod canonical;
mod detect_rooms;
mod hierarchy;
mod map_rooms;
mod naming;
mod space_type;
mod trace_faces;

pub use canonical::{canonical_cycle_key, room_id_for_key};
pub use detect_rooms::DetectRooms;
pub use hierarchy::BuildHierarchy;
pub use map_rooms::{dedupe_faces, KeyedFace, MapRooms};
pub use naming::{child_name, is_auto_generated_name, RoomNamer};
pub use space_type::{is_auto_space_type, resolve_space_type, suggest_space_type, AUTO_SPACE_TYPES};
pub use trace_faces::{TraceFaces, TracedFace};
