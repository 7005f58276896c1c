#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use geoplan::math::Point2;
use geoplan::model::{Endpoint, Room, Wall, WallTemplate};
use geoplan::operations::editing::{InsertWall, SequentialIds};
use geoplan::operations::pipeline::{ApplyWallEdit, WallEdit};

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn insert(a: Point2, b: Point2) -> WallEdit {
    WallEdit::Insert {
        start: a,
        end: b,
        template: WallTemplate::default(),
    }
}

/// Applies edits in both modes and checks they agree at every step.
fn run(edits: &[WallEdit]) -> (Vec<Wall>, Vec<Room>) {
    let mut ids_full = SequentialIds::default();
    let mut ids_incr = SequentialIds::default();
    let (mut walls, mut rooms) = (Vec::new(), Vec::new());
    let (mut walls_i, mut rooms_i): (Vec<Wall>, Vec<Room>) = (Vec::new(), Vec::new());

    for edit in edits {
        let full = ApplyWallEdit::new(&walls, &rooms, edit.clone())
            .execute(&mut ids_full)
            .unwrap();
        let incr = ApplyWallEdit::new(&walls_i, &rooms_i, edit.clone())
            .incremental(true)
            .execute(&mut ids_incr)
            .unwrap();
        assert_eq!(full.walls, incr.walls);
        assert_eq!(full.rooms, incr.rooms, "modes disagree after {edit:?}");
        assert!(full.accepted);

        (walls, rooms) = (full.walls, full.rooms);
        (walls_i, rooms_i) = (incr.walls, incr.rooms);
    }
    (walls, rooms)
}

fn two_rooms_and_a_shed() -> Vec<WallEdit> {
    vec![
        insert(p(0.0, 0.0), p(600.0, 0.0)),
        insert(p(600.0, 0.0), p(600.0, 400.0)),
        insert(p(600.0, 400.0), p(0.0, 400.0)),
        insert(p(0.0, 400.0), p(0.0, 0.0)),
        insert(p(1000.0, 0.0), p(1200.0, 0.0)),
        insert(p(1200.0, 0.0), p(1200.0, 200.0)),
        insert(p(1200.0, 200.0), p(1000.0, 200.0)),
        insert(p(1000.0, 200.0), p(1000.0, 0.0)),
        // Divide the house.
        insert(p(300.0, 0.0), p(300.0, 400.0)),
    ]
}

#[test]
fn incremental_matches_full_detection() {
    let (walls, rooms) = run(&two_rooms_and_a_shed());
    assert_eq!(walls.len(), 11);
    assert_eq!(rooms.len(), 3);
}

#[test]
fn removing_and_moving_stay_consistent() {
    let mut edits = two_rooms_and_a_shed();
    // The divider is wall-11: splitting the house walls takes wall-9 and wall-10.
    edits.push(WallEdit::MoveEndpoint {
        wall_id: "wall-5".into(),
        endpoint: Endpoint::Start,
        target: p(950.0, -50.0),
    });
    edits.push(WallEdit::Remove {
        wall_id: "wall-11".into(),
    });
    let (walls, rooms) = run(&edits);
    assert_eq!(walls.len(), 10);
    assert_eq!(rooms.len(), 2);
    let house = rooms.iter().find(|r| r.wall_ids.iter().any(|w| w == "wall-1")).unwrap();
    assert_relative_eq!(house.gross_area, 240_000.0, epsilon = 1e-6);
}

#[test]
fn redrawing_an_existing_wall_creates_nothing() {
    let (walls, rooms) = run(&two_rooms_and_a_shed()[..4]);
    let before = walls.len();
    let mut ids = SequentialIds::default();
    let outcome = ApplyWallEdit::new(&walls, &rooms, insert(p(600.0, 0.0), p(0.0, 0.0)))
        .execute(&mut ids)
        .unwrap();
    assert_eq!(outcome.walls.len(), before);
    assert!(outcome.changes.created.is_empty());
    assert_eq!(outcome.rooms, rooms);

    let total: f64 = outcome.walls.iter().map(Wall::length).sum();
    assert_relative_eq!(total, 2000.0, epsilon = 1e-9);
}

#[test]
fn overlapping_insert_is_split_not_duplicated() {
    let mut walls = vec![Wall::new("a", p(0.0, 0.0), p(400.0, 0.0))];
    let mut ids = SequentialIds::default();
    let changes = InsertWall::new(p(200.0, 0.0), p(600.0, 0.0))
        .execute(&mut walls, &mut ids)
        .unwrap();
    assert_eq!(walls.len(), 3);
    assert_eq!(changes.modified, vec!["a".to_string()]);
    let total: f64 = walls.iter().map(Wall::length).sum();
    assert_relative_eq!(total, 600.0, epsilon = 1e-9);
    // Every junction is shared.
    for wall in &walls {
        assert!(!wall.connected_wall_ids.is_empty());
    }
}

#[test]
fn crossing_rooms_are_rejected() {
    let (walls, rooms) = run(&two_rooms_and_a_shed()[..4]);
    let mut ids = SequentialIds::default();
    let mut state = (walls, rooms);
    let square = [
        (p(500.0, 300.0), p(800.0, 300.0)),
        (p(800.0, 300.0), p(800.0, 600.0)),
        (p(800.0, 600.0), p(500.0, 600.0)),
    ];
    for (a, b) in square {
        let outcome = ApplyWallEdit::new(&state.0, &state.1, insert(a, b))
            .execute(&mut ids)
            .unwrap();
        assert!(outcome.accepted);
        state = (outcome.walls, outcome.rooms);
    }
    // Closing the square creates a room whose walls cross the house walls.
    let outcome = ApplyWallEdit::new(&state.0, &state.1, insert(p(500.0, 600.0), p(500.0, 300.0)))
        .execute(&mut ids)
        .unwrap();
    assert!(!outcome.accepted);
    assert!(!outcome.report.errors.is_empty());
}
