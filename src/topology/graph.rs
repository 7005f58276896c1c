use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

use crate::math::distance_2d::distance;
use crate::math::{Point2, Vector2};
use crate::model::Wall;

slotmap::new_key_type! {
    /// Unique identifier for a node (snapped wall endpoint) in a wall graph.
    pub struct NodeId;
}

/// A graph node: every wall endpoint that snapped to the same location.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Canonical position: the running centroid of all merged endpoints.
    pub position: Point2,
    sum: Vector2,
    count: usize,
}

impl NodeData {
    fn new(point: Point2) -> Self {
        Self {
            position: point,
            sum: point.coords,
            count: 1,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn absorb(&mut self, point: Point2) {
        self.sum += point.coords;
        self.count += 1;
        self.position = Point2::from(self.sum / self.count as f64);
    }

    /// Number of wall endpoints merged into this node.
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.count
    }
}

/// A graph edge, one per surviving wall.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub wall_id: String,
    pub from: NodeId,
    pub to: NodeId,
}

/// Planar graph of walls: nodes are snapped endpoints, edges are walls.
///
/// Endpoints are quantized to a grid whose cell size equals the snap
/// tolerance. Everything landing in one cell becomes one node; an endpoint in
/// an empty cell still joins a node in a neighbouring cell when it lies within
/// the tolerance, so points straddling a cell border are not split apart.
#[derive(Debug, Default)]
pub struct WallGraph {
    nodes: SlotMap<NodeId, NodeData>,
    node_order: Vec<NodeId>,
    edges: Vec<GraphEdge>,
    cells: HashMap<(i64, i64), NodeId>,
    tolerance: f64,
}

impl WallGraph {
    /// Builds the graph from the full wall list.
    ///
    /// Walls whose endpoints snap to the same node are dropped.
    #[must_use]
    pub fn build(walls: &[Wall], snap_tolerance: f64) -> Self {
        let mut graph = Self {
            tolerance: snap_tolerance.max(f64::MIN_POSITIVE),
            ..Self::default()
        };

        for wall in walls {
            let from = graph.snap(wall.start);
            let to = graph.snap(wall.end);
            if from == to {
                tracing::trace!(wall = %wall.id, "dropping degenerate wall");
                continue;
            }
            graph.edges.push(GraphEdge {
                wall_id: wall.id.clone(),
                from,
                to,
            });
        }

        graph
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_of(&self, p: Point2) -> (i64, i64) {
        (
            (p.x / self.tolerance).floor() as i64,
            (p.y / self.tolerance).floor() as i64,
        )
    }

    fn snap(&mut self, p: Point2) -> NodeId {
        let cell = self.cell_of(p);
        if let Some(&id) = self.cells.get(&cell) {
            self.nodes[id].absorb(p);
            return id;
        }

        let mut best: Option<(NodeId, f64)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(&id) = self.cells.get(&(cell.0 + dx, cell.1 + dy)) else {
                    continue;
                };
                let d = distance(&self.nodes[id].position, &p);
                if d <= self.tolerance && best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((id, d));
                }
            }
        }

        let id = if let Some((id, _)) = best {
            self.nodes[id].absorb(p);
            id
        } else {
            let id = self.nodes.insert(NodeData::new(p));
            self.node_order.push(id);
            id
        };
        self.cells.insert(cell, id);
        id
    }

    /// Returns the node data, or `None` if the id does not belong to this graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Node ids in creation order.
    #[must_use]
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_order
    }

    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// A minimal cycle needs at least three edges.
    #[must_use]
    pub fn can_enclose(&self) -> bool {
        self.edges.len() >= 3
    }

    /// Position of a node. Panics on foreign ids, which cannot occur for ids
    /// obtained from this graph's own edges.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Point2 {
        self.nodes[id].position
    }

    /// Labels every edge with the index of its connected component.
    ///
    /// Component indices follow the order in which edges first appear.
    #[must_use]
    pub fn edge_components(&self) -> Vec<usize> {
        let mut parent: SecondaryMap<NodeId, NodeId> = SecondaryMap::new();
        for &id in &self.node_order {
            parent.insert(id, id);
        }

        for e in &self.edges {
            let a = find(&mut parent, e.from);
            let b = find(&mut parent, e.to);
            if a != b {
                parent[a] = b;
            }
        }

        let mut labels: HashMap<NodeId, usize> = HashMap::new();
        self.edges
            .iter()
            .map(|e| {
                let root = find(&mut parent, e.from);
                let next = labels.len();
                *labels.entry(root).or_insert(next)
            })
            .collect()
    }
}

/// Union-find root lookup with path halving.
fn find(parent: &mut SecondaryMap<NodeId, NodeId>, mut id: NodeId) -> NodeId {
    while parent[id] != id {
        let grand = parent[parent[id]];
        parent[id] = grand;
        id = grand;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(id: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Wall {
        Wall::new(id, Point2::new(x0, y0), Point2::new(x1, y1))
    }

    #[test]
    fn shared_endpoints_merge() {
        let walls = vec![
            wall("a", 0.0, 0.0, 400.0, 0.0),
            wall("b", 400.1, 0.1, 400.0, 300.0),
            wall("c", 400.0, 300.0, 0.0, 300.0),
            wall("d", 0.0, 300.0, 0.0, 0.0),
        ];
        let g = WallGraph::build(&walls, 0.5);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert!(g.can_enclose());

        // The merged corner sits at the centroid of both endpoints.
        let corner = g.edges()[1].from;
        let p = g.position(corner);
        assert!((p.x - 400.05).abs() < 1e-9 && (p.y - 0.05).abs() < 1e-9, "p={p}");
        assert_eq!(g.node(corner).map(NodeData::endpoint_count), Some(2));
    }

    #[test]
    fn cell_border_straddle_still_merges() {
        // 0.49 and 0.51 fall into different cells of size 0.5.
        let walls = vec![
            wall("a", 0.49, 0.0, 10.0, 0.0),
            wall("b", 0.51, 0.0, 0.51, 10.0),
        ];
        let g = WallGraph::build(&walls, 0.5);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edges()[0].from, g.edges()[1].from);
    }

    #[test]
    fn degenerate_walls_dropped() {
        let walls = vec![
            wall("a", 0.0, 0.0, 0.1, 0.1),
            wall("b", 0.0, 0.0, 10.0, 0.0),
        ];
        let g = WallGraph::build(&walls, 0.5);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edges()[0].wall_id, "b");
        assert!(!g.can_enclose());
    }

    #[test]
    fn components_are_labelled_in_edge_order() {
        let walls = vec![
            wall("a", 0.0, 0.0, 10.0, 0.0),
            wall("x", 100.0, 100.0, 110.0, 100.0),
            wall("b", 10.0, 0.0, 10.0, 10.0),
        ];
        let g = WallGraph::build(&walls, 0.5);
        assert_eq!(g.edge_components(), vec![0, 1, 0]);
    }
}
