use super::adjacency::rebuild_adjacency;
use super::changes::WallChanges;
use super::ids::{wall_ids, IdGenerator};
use super::split_wall::SplitWall;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::math::distance_2d::{distance, project_point_to_segment};
use crate::math::intersect_2d::is_collinear_with;
use crate::math::{Point2, Vector2};
use crate::model::{Wall, WallTemplate};

/// A covered stretch of the new segment: distances along it plus the actual
/// wall endpoints at either end.
#[derive(Debug, Clone, Copy)]
struct Interval {
    s0: f64,
    p0: Point2,
    s1: f64,
    p1: Point2,
}

/// Inserts a wall segment into the wall set without duplicating geometry.
///
/// Existing walls passing through either endpoint are split there. Existing
/// walls collinear with the segment are split at its ends and reused where
/// they overlap it; only the uncovered stretches become new walls, built
/// from the [`WallTemplate`]. New walls are further split wherever an
/// existing wall ends on their body. Adjacency is rebuilt afterwards.
pub struct InsertWall {
    start: Point2,
    end: Point2,
    template: WallTemplate,
    config: EngineConfig,
}

impl InsertWall {
    /// Creates a new insertion of the segment `start → end`.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            template: WallTemplate::default(),
            config: EngineConfig::default(),
        }
    }

    /// Sets the assembly defaults for created walls.
    #[must_use]
    pub fn with_template(mut self, template: WallTemplate) -> Self {
        self.template = template;
        self
    }

    /// Sets custom tolerances.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the insertion.
    ///
    /// A segment shorter than the snap tolerance leaves the walls untouched.
    ///
    /// # Errors
    ///
    /// Propagates errors from the internal splits, which only fail on an
    /// inconsistent wall set.
    pub fn execute(&self, walls: &mut Vec<Wall>, ids: &mut dyn IdGenerator) -> Result<WallChanges> {
        let tol = self.config.snap_tolerance;
        let mut changes = WallChanges::default();
        let length = distance(&self.start, &self.end);
        if length <= tol {
            tracing::debug!(length, "ignoring degenerate wall insertion");
            return Ok(changes);
        }

        // Collinear walls reaching past either end are cut here too, so each
        // piece either lies inside the segment span or outside it.
        self.split_through(walls, self.start, ids, &mut changes)?;
        self.split_through(walls, self.end, ids, &mut changes)?;

        let mut covered: Vec<Interval> = Vec::new();
        for wall in walls.iter() {
            if let Some(interval) = self.overlaps_segment(wall) {
                changes.reused.push(wall.id.clone());
                covered.push(interval);
            }
        }
        let merged = merge_intervals(covered, tol);

        let mut gaps: Vec<(Point2, Point2)> = Vec::new();
        let mut cursor = (0.0, self.start);
        for interval in &merged {
            if interval.s0 - cursor.0 > tol {
                gaps.push((cursor.1, interval.p0));
            }
            if interval.s1 > cursor.0 {
                cursor = (interval.s1, interval.p1);
            }
        }
        if length - cursor.0 > tol {
            gaps.push((cursor.1, self.end));
        }

        let mut fresh = Vec::with_capacity(gaps.len());
        for (a, b) in gaps {
            let id = ids.fresh_id(&wall_ids(walls));
            walls.push(self.template.instantiate(id.clone(), a, b));
            changes.created.push(id.clone());
            fresh.push(id);
        }

        self.split_at_junctions(walls, fresh, ids, &mut changes)?;
        rebuild_adjacency(walls, tol);

        tracing::debug!(
            created = changes.created.len(),
            reused = changes.reused.len(),
            modified = changes.modified.len(),
            "inserted wall"
        );
        Ok(changes)
    }

    /// Splits every wall whose body passes through `point`.
    fn split_through(
        &self,
        walls: &mut Vec<Wall>,
        point: Point2,
        ids: &mut dyn IdGenerator,
        changes: &mut WallChanges,
    ) -> Result<()> {
        let targets: Vec<String> = walls.iter().map(|w| w.id.clone()).collect();
        for id in targets {
            split_if_interior(walls, &id, point, &self.config, ids, changes)?;
        }
        Ok(())
    }

    /// Splits new walls where another wall's endpoint touches their body.
    /// Zero-length walls never make a junction.
    fn split_at_junctions(
        &self,
        walls: &mut Vec<Wall>,
        mut pending: Vec<String>,
        ids: &mut dyn IdGenerator,
        changes: &mut WallChanges,
    ) -> Result<()> {
        while let Some(id) = pending.pop() {
            let endpoints: Vec<Point2> = walls
                .iter()
                .filter(|w| w.id != id && !w.is_degenerate(self.config.snap_tolerance))
                .flat_map(|w| [w.start, w.end])
                .collect();
            for point in endpoints {
                if let Some(new_id) = split_if_interior(walls, &id, point, &self.config, ids, changes)? {
                    pending.push(new_id);
                    pending.push(id.clone());
                    break;
                }
            }
        }
        Ok(())
    }

    /// Projection interval of a collinear wall onto the new segment, clamped
    /// to it, when the overlap has positive length.
    fn overlaps_segment(&self, wall: &Wall) -> Option<Interval> {
        let tol = self.config.snap_tolerance;
        if wall.is_degenerate(tol) || !is_collinear_with(&self.start, &self.end, &wall.start, &wall.end, tol) {
            return None;
        }
        let length = distance(&self.start, &self.end);
        let dir: Vector2 = (self.end - self.start) / length;
        let along = |p: &Point2| (p - self.start).dot(&dir);

        let (mut s0, mut p0, mut s1, mut p1) = (along(&wall.start), wall.start, along(&wall.end), wall.end);
        if s0 > s1 {
            std::mem::swap(&mut s0, &mut s1);
            std::mem::swap(&mut p0, &mut p1);
        }
        if s1 <= tol || s0 >= length - tol {
            return None;
        }
        if s0 < 0.0 {
            (s0, p0) = (0.0, self.start);
        }
        if s1 > length {
            (s1, p1) = (length, self.end);
        }
        Some(Interval { s0, p0, s1, p1 })
    }
}

/// Splits `id` at `point` when the point lies on its body, away from both ends.
fn split_if_interior(
    walls: &mut Vec<Wall>,
    id: &str,
    point: Point2,
    config: &EngineConfig,
    ids: &mut dyn IdGenerator,
    changes: &mut WallChanges,
) -> Result<Option<String>> {
    let Some(wall) = walls.iter().find(|w| w.id == id) else {
        return Ok(None);
    };
    if wall.is_degenerate(config.snap_tolerance) {
        return Ok(None);
    }
    if project_point_to_segment(&point, &wall.start, &wall.end).distance > config.snap_tolerance {
        return Ok(None);
    }
    let created = SplitWall::new(id, point).with_config(*config).execute(walls, ids)?;
    if let Some(new_id) = &created {
        changes.note_modified(id);
        changes.created.push(new_id.clone());
    }
    Ok(created)
}

fn merge_intervals(mut intervals: Vec<Interval>, tolerance: f64) -> Vec<Interval> {
    intervals.sort_by(|a, b| a.s0.total_cmp(&b.s0));
    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.s0 <= last.s1 + tolerance => {
                if interval.s1 > last.s1 {
                    last.s1 = interval.s1;
                    last.p1 = interval.p1;
                }
            }
            _ => merged.push(interval),
        }
    }
    merged
}
