pub mod graph;
pub mod half_edge;

pub use graph::{GraphEdge, NodeData, NodeId, WallGraph};
pub use half_edge::{HalfEdge, HalfEdgeMesh};
