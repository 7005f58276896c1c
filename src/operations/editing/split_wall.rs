use super::ids::{wall_ids, IdGenerator};
use crate::config::EngineConfig;
use crate::error::{GeometryError, OperationError, Result, TopologyError};
use crate::math::distance_2d::project_point_to_segment;
use crate::math::Point2;
use crate::model::{Opening, Wall};

/// Splits a wall in two at a point on its body.
///
/// The first part keeps the original id and the start point; the second part
/// gets a fresh id and is inserted right after the first. Both parts keep the
/// thickness, height and assembly data. Openings go to the part holding
/// their centre, with positions rescaled to the new length.
pub struct SplitWall<'a> {
    wall_id: &'a str,
    point: Point2,
    config: EngineConfig,
}

impl<'a> SplitWall<'a> {
    /// Creates a new split of `wall_id` at `point`.
    #[must_use]
    pub fn new(wall_id: &'a str, point: Point2) -> Self {
        Self {
            wall_id,
            point,
            config: EngineConfig::default(),
        }
    }

    /// Sets custom tolerances.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the split and returns the id of the new second part.
    ///
    /// Returns `Ok(None)` when the point lies within the snap tolerance of an
    /// endpoint, since there is nothing to split.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WallNotFound`] for an unknown id and
    /// [`OperationError::InvalidInput`] when the point is not on the wall.
    /// A wall shorter than the snap tolerance yields
    /// [`GeometryError::Degenerate`].
    pub fn execute(&self, walls: &mut Vec<Wall>, ids: &mut dyn IdGenerator) -> Result<Option<String>> {
        let index = walls
            .iter()
            .position(|w| w.id == self.wall_id)
            .ok_or_else(|| TopologyError::WallNotFound(self.wall_id.to_owned()))?;

        let tol = self.config.snap_tolerance;
        let wall = &walls[index];
        if wall.is_degenerate(tol) {
            return Err(GeometryError::Degenerate(format!("wall {} has no length to split", wall.id)).into());
        }
        let projection = project_point_to_segment(&self.point, &wall.start, &wall.end);
        if projection.distance > tol {
            return Err(OperationError::InvalidInput(format!(
                "split point is {:.3} away from wall {}",
                projection.distance, wall.id
            ))
            .into());
        }
        let length = wall.length();
        let t = projection.t;
        if t * length <= tol || (1.0 - t) * length <= tol {
            return Ok(None);
        }

        let new_id = ids.fresh_id(&wall_ids(walls));
        let original = &mut walls[index];
        let (first_openings, second_openings) = partition_openings(&original.openings, t);

        let mut second = original.clone();
        second.id.clone_from(&new_id);
        second.start = self.point;
        second.openings = second_openings;
        second.connected_wall_ids.clear();

        original.end = self.point;
        original.openings = first_openings;

        tracing::trace!(wall = %self.wall_id, new = %new_id, t, "split wall");
        walls.insert(index + 1, second);
        Ok(Some(new_id))
    }
}

fn partition_openings(openings: &[Opening], t: f64) -> (Vec<Opening>, Vec<Opening>) {
    let mut first = Vec::new();
    let mut second = Vec::new();
    for opening in openings {
        let mut moved = opening.clone();
        if opening.position < t {
            moved.position = opening.position / t;
            first.push(moved);
        } else {
            moved.position = (opening.position - t) / (1.0 - t);
            second.push(moved);
        }
    }
    (first, second)
}
