use crate::math::distance_2d::distance;
use crate::model::Wall;

/// Recomputes `connected_wall_ids` for every wall.
///
/// Two walls are connected when any endpoint of one lies within `tolerance`
/// of any endpoint of the other. The lists follow wall order.
pub fn rebuild_adjacency(walls: &mut [Wall], tolerance: f64) {
    let ends: Vec<_> = walls.iter().map(|w| [w.start, w.end]).collect();
    let touches = |i: usize, j: usize| {
        ends[i]
            .iter()
            .any(|p| ends[j].iter().any(|q| distance(p, q) <= tolerance))
    };

    let connected: Vec<Vec<String>> = (0..walls.len())
        .map(|i| {
            (0..walls.len())
                .filter(|&j| j != i && touches(i, j))
                .map(|j| walls[j].id.clone())
                .collect()
        })
        .collect();

    for (wall, ids) in walls.iter_mut().zip(connected) {
        wall.connected_wall_ids = ids;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;

    #[test]
    fn corner_and_tee() {
        let mut walls = vec![
            Wall::new("a", Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)),
            Wall::new("b", Point2::new(100.0, 0.2), Point2::new(100.0, 100.0)),
            Wall::new("c", Point2::new(500.0, 0.0), Point2::new(600.0, 0.0)),
        ];
        walls[2].connected_wall_ids = vec!["stale".into()];
        rebuild_adjacency(&mut walls, 0.5);

        assert_eq!(walls[0].connected_wall_ids, vec!["b".to_string()]);
        assert_eq!(walls[1].connected_wall_ids, vec!["a".to_string()]);
        assert!(walls[2].connected_wall_ids.is_empty());
    }
}
