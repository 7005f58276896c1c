use super::adjacency::rebuild_adjacency;
use super::changes::WallChanges;
use crate::config::EngineConfig;
use crate::error::{Result, TopologyError};
use crate::model::Wall;

/// Deletes a wall and rebuilds adjacency.
pub struct RemoveWall<'a> {
    wall_id: &'a str,
    config: EngineConfig,
}

impl<'a> RemoveWall<'a> {
    #[must_use]
    pub fn new(wall_id: &'a str) -> Self {
        Self {
            wall_id,
            config: EngineConfig::default(),
        }
    }

    /// Sets custom tolerances.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the removal.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WallNotFound`] for an unknown id.
    pub fn execute(&self, walls: &mut Vec<Wall>) -> Result<WallChanges> {
        let index = walls
            .iter()
            .position(|w| w.id == self.wall_id)
            .ok_or_else(|| TopologyError::WallNotFound(self.wall_id.to_owned()))?;
        let removed = walls.remove(index);
        rebuild_adjacency(walls, self.config.snap_tolerance);
        Ok(WallChanges {
            removed: vec![removed.id],
            ..WallChanges::default()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    #[test]
    fn removes_and_disconnects() {
        let mut walls = vec![
            Wall::new("a", Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)),
            Wall::new("b", Point2::new(100.0, 0.0), Point2::new(100.0, 100.0)),
        ];
        crate::operations::editing::rebuild_adjacency(&mut walls, 0.5);
        let changes = RemoveWall::new("b").execute(&mut walls).unwrap();
        assert_eq!(changes.removed, vec!["b".to_string()]);
        assert_eq!(walls.len(), 1);
        assert!(walls[0].connected_wall_ids.is_empty());
        assert!(RemoveWall::new("b").execute(&mut walls).is_err());
    }
}
