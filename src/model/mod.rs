pub mod assembly;
pub mod room;
pub mod thermal;
pub mod wall;

pub use assembly::{LayerRole, WallLayer, WallTypeDefinition};
pub use room::{Room, RoomType};
pub use thermal::{thermal_performance, total_thickness, ThermalPerformance};
pub use wall::{Endpoint, Opening, OpeningKind, Wall, WallTemplate};
