use std::collections::HashSet;

use crate::config::EngineConfig;
use crate::math::polygon_2d::{
    canonical_start_index, polygon_centroid, polygon_perimeter, signed_area,
};
use crate::math::Point2;
use crate::model::Wall;
use crate::topology::{HalfEdgeMesh, NodeId, WallGraph};

/// A minimal enclosed cycle of the wall graph: a candidate room.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedFace {
    /// Boundary walls in traversal order, consecutive repeats collapsed.
    pub wall_ids: Vec<String>,
    /// Outer boundary vertices, counter-clockwise, starting at the
    /// leftmost-bottom one. Inner loops hanging off the boundary by a wall
    /// are not part of the polygon; they trace as faces of their own.
    pub vertices: Vec<Point2>,
    /// Area enclosed by [`TracedFace::vertices`].
    pub signed_area: f64,
    pub perimeter: f64,
    pub centroid: Point2,
}

/// Extracts the bounded faces of the planar wall graph.
///
/// Every half-edge is walked at most once: starting from an unvisited
/// half-edge, the walk keeps taking the clockwise neighbour of the reverse
/// edge at each destination until it returns to the start. Walks longer than
/// [`EngineConfig::max_trace_steps`] are abandoned. Only faces with positive
/// signed area above [`EngineConfig::min_face_area`] survive, which drops the
/// unbounded outer face of every component along with slivers.
pub struct TraceFaces<'a> {
    walls: &'a [Wall],
    config: EngineConfig,
}

impl<'a> TraceFaces<'a> {
    /// Creates a new face tracing operation with default tolerances.
    #[must_use]
    pub fn new(walls: &'a [Wall]) -> Self {
        Self {
            walls,
            config: EngineConfig::default(),
        }
    }

    /// Sets custom tolerances.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the trace, returning the surviving faces in discovery order.
    #[must_use]
    pub fn execute(&self) -> Vec<TracedFace> {
        let graph = WallGraph::build(self.walls, self.config.snap_tolerance);
        if !graph.can_enclose() {
            return Vec::new();
        }
        trace_graph(&graph, &self.config, |_| true)
    }
}

/// Traces the faces of an already built graph.
///
/// Walks only start from half-edges whose graph edge passes `include_edge`;
/// since a walk never leaves its connected component, filtering by component
/// restricts the trace to those components.
pub(crate) fn trace_graph(
    graph: &WallGraph,
    config: &EngineConfig,
    include_edge: impl Fn(usize) -> bool,
) -> Vec<TracedFace> {
    let mesh = HalfEdgeMesh::new(graph);
    let mut visited = vec![false; mesh.len()];
    let mut faces = Vec::new();

    for start in 0..mesh.len() {
        if visited[start] || !include_edge(mesh.half_edge(start).edge) {
            continue;
        }
        let Some(cycle) = walk(&mesh, start, config.max_trace_steps, &mut visited) else {
            tracing::debug!(start, "face walk did not close, discarding");
            continue;
        };
        if let Some(face) = build_face(graph, &mesh, &cycle, config.min_face_area) {
            faces.push(face);
        }
    }

    faces
}

/// Walks the face orbit of `start`, marking every half-edge it touches.
fn walk(
    mesh: &HalfEdgeMesh,
    start: usize,
    max_steps: usize,
    visited: &mut [bool],
) -> Option<Vec<usize>> {
    let mut cycle = vec![start];
    visited[start] = true;
    let mut h = mesh.next(start)?;
    let mut steps = 1;

    while h != start {
        if steps >= max_steps || visited[h] {
            return None;
        }
        visited[h] = true;
        cycle.push(h);
        h = mesh.next(h)?;
        steps += 1;
    }

    Some(cycle)
}

fn build_face(
    graph: &WallGraph,
    mesh: &HalfEdgeMesh,
    cycle: &[usize],
    min_area: f64,
) -> Option<TracedFace> {
    let mut nodes: Vec<NodeId> = cycle.iter().map(|&h| mesh.half_edge(h).origin).collect();
    let mut edges: Vec<usize> = cycle.iter().map(|&h| mesh.half_edge(h).edge).collect();

    let positions: Vec<Point2> = nodes.iter().map(|&n| graph.position(n)).collect();
    let shift = canonical_start_index(&positions);
    nodes.rotate_left(shift);
    edges.rotate_left(shift);

    nodes.dedup();
    if nodes.len() > 1 && nodes.first() == nodes.last() {
        nodes.pop();
    }
    let distinct: HashSet<NodeId> = nodes.iter().copied().collect();
    if distinct.len() < 3 {
        return None;
    }

    let walk_vertices: Vec<Point2> = nodes.iter().map(|&n| graph.position(n)).collect();
    let walk_area = signed_area(&walk_vertices);
    if walk_area <= min_area {
        tracing::trace!(area = walk_area, "dropping face below minimum area");
        return None;
    }

    let vertices: Vec<Point2> = outer_loop(&nodes).iter().map(|&n| graph.position(n)).collect();
    let area = signed_area(&vertices);

    let mut wall_ids: Vec<String> = Vec::with_capacity(edges.len());
    for &e in &edges {
        let id = &graph.edges()[e].wall_id;
        if wall_ids.last() != Some(id) {
            wall_ids.push(id.clone());
        }
    }
    while wall_ids.len() > 1 && wall_ids.first() == wall_ids.last() {
        wall_ids.pop();
    }

    Some(TracedFace {
        wall_ids,
        perimeter: polygon_perimeter(&vertices),
        centroid: polygon_centroid(&vertices),
        signed_area: area,
        vertices,
    })
}

/// Reduces a closed node walk to its outer boundary loop.
///
/// Revisiting a node closes a sub-loop (a hole bridged to the boundary, or
/// the out-and-back run along a dangling wall) which is cut off. The walk
/// must start on the outer boundary, which holds for the canonical start.
fn outer_loop(nodes: &[NodeId]) -> Vec<NodeId> {
    let mut stack: Vec<NodeId> = Vec::with_capacity(nodes.len());
    for &n in nodes {
        if let Some(k) = stack.iter().position(|&s| s == n) {
            stack.truncate(k + 1);
        } else {
            stack.push(n);
        }
    }
    stack
}
