use super::adjacency::rebuild_adjacency;
use super::changes::WallChanges;
use crate::config::EngineConfig;
use crate::error::{Result, TopologyError};
use crate::math::distance_2d::distance;
use crate::math::Point2;
use crate::model::{Endpoint, Wall};

/// Drags a wall endpoint together with every endpoint joined to it.
///
/// All wall endpoints within the snap tolerance of the dragged one move to
/// the target, so the junction stays connected. Walls that collapse to zero
/// length are removed.
pub struct MoveWallEndpoint<'a> {
    wall_id: &'a str,
    endpoint: Endpoint,
    target: Point2,
    config: EngineConfig,
}

impl<'a> MoveWallEndpoint<'a> {
    /// Creates a move of `endpoint` of `wall_id` to `target`.
    #[must_use]
    pub fn new(wall_id: &'a str, endpoint: Endpoint, target: Point2) -> Self {
        Self {
            wall_id,
            endpoint,
            target,
            config: EngineConfig::default(),
        }
    }

    /// Sets custom tolerances.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the move.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WallNotFound`] for an unknown id.
    pub fn execute(&self, walls: &mut Vec<Wall>) -> Result<WallChanges> {
        let tol = self.config.snap_tolerance;
        let anchor = walls
            .iter()
            .find(|w| w.id == self.wall_id)
            .map(|w| w.endpoint(self.endpoint))
            .ok_or_else(|| TopologyError::WallNotFound(self.wall_id.to_owned()))?;

        let mut changes = WallChanges::default();
        for wall in walls.iter_mut() {
            let mut moved = false;
            for which in [Endpoint::Start, Endpoint::End] {
                if distance(&wall.endpoint(which), &anchor) <= tol {
                    wall.set_endpoint(which, self.target);
                    moved = true;
                }
            }
            if moved {
                changes.modified.push(wall.id.clone());
            }
        }

        walls.retain(|w| {
            let keep = !w.is_degenerate(tol);
            if !keep {
                tracing::debug!(wall = %w.id, "removing wall collapsed by endpoint move");
                changes.removed.push(w.id.clone());
            }
            keep
        });
        changes.modified.retain(|id| !changes.removed.contains(id));
        rebuild_adjacency(walls, tol);
        Ok(changes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn corner() -> Vec<Wall> {
        vec![
            Wall::new("a", Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)),
            Wall::new("b", Point2::new(100.0, 0.0), Point2::new(100.0, 100.0)),
            Wall::new("c", Point2::new(500.0, 500.0), Point2::new(600.0, 500.0)),
        ]
    }

    #[test]
    fn connected_endpoints_move_together() {
        let mut walls = corner();
        let changes = MoveWallEndpoint::new("a", Endpoint::End, Point2::new(150.0, 20.0))
            .execute(&mut walls)
            .unwrap();
        assert_eq!(changes.modified, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(walls[0].end, Point2::new(150.0, 20.0));
        assert_eq!(walls[1].start, Point2::new(150.0, 20.0));
        assert_eq!(walls[0].connected_wall_ids, vec!["b".to_string()]);
    }

    #[test]
    fn collapsed_wall_is_removed() {
        let mut walls = corner();
        let changes = MoveWallEndpoint::new("b", Endpoint::End, Point2::new(100.0, 0.0))
            .execute(&mut walls)
            .unwrap();
        assert_eq!(changes.removed, vec!["b".to_string()]);
        assert!(changes.modified.is_empty());
        assert_eq!(walls.len(), 2);
    }

    #[test]
    fn unknown_wall() {
        let mut walls = corner();
        assert!(MoveWallEndpoint::new("x", Endpoint::Start, Point2::origin())
            .execute(&mut walls)
            .is_err());
    }
}
