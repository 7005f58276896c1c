mod adjacency;
mod changes;
mod ids;
mod insert_wall;
mod move_endpoint;
mod remove_wall;
mod reparent_room;
mod split_wall;

pub use adjacency::rebuild_adjacency;
pub use changes::WallChanges;
pub use ids::{IdGenerator, SequentialIds};
pub use insert_wall::InsertWall;
pub use move_endpoint::MoveWallEndpoint;
pub use remove_wall::RemoveWall;
pub use reparent_room::{ReparentOutcome, ReparentRoom};
pub use split_wall::SplitWall;
