use std::cmp::Ordering;

use slotmap::SecondaryMap;

use super::graph::{NodeId, WallGraph};

/// One traversal direction of a wall.
#[derive(Debug, Clone)]
pub struct HalfEdge {
    pub origin: NodeId,
    pub target: NodeId,
    /// Index of the underlying edge in [`WallGraph::edges`].
    pub edge: usize,
    /// Absolute direction angle from origin to target, in `(-pi, pi]`.
    pub angle: f64,
}

/// Half-edge view of a [`WallGraph`].
///
/// Edge `i` yields half-edges `2i` (from → to) and `2i + 1` (to → from), so
/// the twin of `h` is `h ^ 1`. Outgoing half-edges at each node are kept
/// sorted by angle (counter-clockwise).
#[derive(Debug)]
pub struct HalfEdgeMesh {
    half_edges: Vec<HalfEdge>,
    fans: SecondaryMap<NodeId, Vec<usize>>,
    fan_slot: Vec<usize>,
}

impl HalfEdgeMesh {
    /// Builds both half-edges for every graph edge and sorts each node's fan.
    #[must_use]
    pub fn new(graph: &WallGraph) -> Self {
        let mut half_edges = Vec::with_capacity(graph.edge_count() * 2);
        for (i, e) in graph.edges().iter().enumerate() {
            let a = graph.position(e.from);
            let b = graph.position(e.to);
            let forward = (b.y - a.y).atan2(b.x - a.x);
            let backward = (a.y - b.y).atan2(a.x - b.x);
            half_edges.push(HalfEdge {
                origin: e.from,
                target: e.to,
                edge: i,
                angle: forward,
            });
            half_edges.push(HalfEdge {
                origin: e.to,
                target: e.from,
                edge: i,
                angle: backward,
            });
        }

        let mut fans: SecondaryMap<NodeId, Vec<usize>> = SecondaryMap::new();
        for (h, he) in half_edges.iter().enumerate() {
            if let Some(fan) = fans.get_mut(he.origin) {
                fan.push(h);
            } else {
                fans.insert(he.origin, vec![h]);
            }
        }

        let mut fan_slot = vec![0; half_edges.len()];
        for (_, fan) in &mut fans {
            fan.sort_by(|&x, &y| {
                half_edges[x]
                    .angle
                    .partial_cmp(&half_edges[y].angle)
                    .unwrap_or(Ordering::Equal)
                    .then(x.cmp(&y))
            });
            for (slot, &h) in fan.iter().enumerate() {
                fan_slot[h] = slot;
            }
        }

        Self {
            half_edges,
            fans,
            fan_slot,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.half_edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.half_edges.is_empty()
    }

    #[must_use]
    pub fn half_edge(&self, h: usize) -> &HalfEdge {
        &self.half_edges[h]
    }

    #[must_use]
    pub fn twin(h: usize) -> usize {
        h ^ 1
    }

    /// Next half-edge along the face to the left of `h`.
    ///
    /// At the destination node this is the clockwise neighbour of `h`'s twin,
    /// i.e. its predecessor in the counter-clockwise sorted fan.
    #[must_use]
    pub fn next(&self, h: usize) -> Option<usize> {
        let twin = Self::twin(h);
        let fan = self.fans.get(self.half_edges[h].target)?;
        if fan.is_empty() {
            return None;
        }
        let slot = self.fan_slot[twin];
        Some(fan[(slot + fan.len() - 1) % fan.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::model::Wall;

    fn square() -> WallGraph {
        let pts = [(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)];
        let walls: Vec<Wall> = (0..4)
            .map(|i| {
                let (x0, y0) = pts[i];
                let (x1, y1) = pts[(i + 1) % 4];
                Wall::new(format!("w{i}"), Point2::new(x0, y0), Point2::new(x1, y1))
            })
            .collect();
        WallGraph::build(&walls, 0.5)
    }

    #[test]
    fn twins_pair_up() {
        let mesh = HalfEdgeMesh::new(&square());
        assert_eq!(mesh.len(), 8);
        for h in 0..mesh.len() {
            let t = HalfEdgeMesh::twin(h);
            assert_eq!(mesh.half_edge(h).origin, mesh.half_edge(t).target);
            assert_eq!(mesh.half_edge(h).edge, mesh.half_edge(t).edge);
        }
    }

    #[test]
    fn forward_walk_turns_left() {
        let mesh = HalfEdgeMesh::new(&square());
        // w0 forward: (0,0) → (4,0); the interior face continues along w1.
        let next = mesh.next(0).unwrap();
        assert_eq!(next, 2);
        let mut h = 0;
        let mut steps = 0;
        loop {
            h = mesh.next(h).unwrap();
            steps += 1;
            if h == 0 {
                break;
            }
        }
        assert_eq!(steps, 4);
    }

    #[test]
    fn dead_end_turns_back() {
        let walls = vec![Wall::new("a", Point2::new(0.0, 0.0), Point2::new(5.0, 0.0))];
        let mesh = HalfEdgeMesh::new(&WallGraph::build(&walls, 0.5));
        assert_eq!(mesh.next(0), Some(1));
        assert_eq!(mesh.next(1), Some(0));
    }
}
