//! Integration tests for a full puzzle session.
//!
//! Exercises: Level JSON → PuzzleState → drops/drags/belts → tick → Solved
//!
//! All tests are pure logic — no rendering, no browser.

use gearworks::SolverConfig;
use gearworks::sim::{
    Direction, Level, MOTOR_ID, NetworkOutcome, PuzzleEvent, PuzzleState, TARGET_ID,
    calculate_network, check_collision, tick,
};
use glam::Vec2;

// ── Helpers ────────────────────────────────────────────────────────────

/// Motor (12t, r30) at x=150 and target (12t, r30) at x=430 on one row.
/// Two 16-tooth gears (r40) at x=220 and x=300 plus a 12-tooth gear at
/// x=370 bridge them; four flips leave the target clockwise.
const LEVEL_JSON: &str = r#"{
    "name": "gear train",
    "motor": { "pos": [150.0, 250.0], "teeth": 12 },
    "target": {
        "pos": [430.0, 250.0],
        "teeth": 12,
        "required_direction": "clockwise"
    },
    "water_zones": [ { "x": 200.0, "y": 380.0, "width": 200.0, "height": 100.0 } ],
    "max_gears": 3,
    "max_belts": 1,
    "max_belt_length": 250.0,
    "toolbox": [8, 12, 16]
}"#;

fn state() -> PuzzleState {
    PuzzleState::new(Level::from_json(LEVEL_JSON).unwrap())
}

// ── Tests ──────────────────────────────────────────────────────────────

#[test]
fn test_gear_train_solves_level() {
    let config = SolverConfig::default();
    let mut state = state();

    // 150 + 30 + 40 = 220, 220 + 80 = 300, 300 + 40 + 30 = 370
    let a = state.drop_gear(16, Vec2::new(220.0, 250.0), &config).unwrap();
    let b = state.drop_gear(16, Vec2::new(300.0, 250.0), &config).unwrap();
    let c = state.drop_gear(12, Vec2::new(370.0, 250.0), &config).unwrap();
    assert_eq!(state.gears_remaining(), 0);

    let report = tick(&mut state, &config);
    assert_eq!(report.outcome, NetworkOutcome::Running);

    assert_eq!(state.gear(&a).unwrap().direction, Direction::CounterClockwise);
    assert_eq!(state.gear(&b).unwrap().direction, Direction::Clockwise);
    assert_eq!(state.gear(&c).unwrap().direction, Direction::CounterClockwise);

    let target = state.target().unwrap();
    assert_eq!(target.direction, Direction::Clockwise);
    assert_eq!(target.speed, 10.0);
    assert!(report.newly_solved);

    let events = state.drain_events();
    assert_eq!(events.len(), 4);
    assert_eq!(events.last(), Some(&PuzzleEvent::Solved));

    // Solved puzzles ignore further edits
    assert!(!state.remove_gear(&a));
}

#[test]
fn test_drop_pushes_overlapping_gear_into_mesh() {
    let config = SolverConfig::default();
    let mut state = state();

    // Dropped on top of the motor's rim; gets pushed out to mesh with it
    let id = state.drop_gear(16, Vec2::new(200.0, 250.0), &config).unwrap();
    let gear = state.gear(&id).unwrap();
    let motor = state.motor().unwrap();
    assert!(gear.pos.distance(motor.pos) >= gear.radius() + motor.radius());
    assert!(check_collision(gear, motor));

    tick(&mut state, &config);
    assert_eq!(state.gear(&id).unwrap().direction, Direction::CounterClockwise);
    assert_eq!(state.gear(&id).unwrap().speed, 7.5);
}

#[test]
fn test_water_and_bounds_drops_leave_budget_alone() {
    let config = SolverConfig::default();
    let mut state = state();

    assert!(state.drop_gear(8, Vec2::new(300.0, 420.0), &config).is_none());
    assert!(state.drop_gear(8, Vec2::new(5.0, 250.0), &config).is_none());
    assert!(state.drop_gear(8, Vec2::new(400.0, 560.0), &config).is_none());
    assert_eq!(state.gears_remaining(), 3);
    assert!(state.drain_events().is_empty());
}

#[test]
fn test_belt_too_long_is_refused() {
    let mut state = state();
    state.set_belt_mode(true);
    state.select_for_belt(MOTOR_ID);
    // 280 apart, max is 250
    assert!(state.select_for_belt(TARGET_ID).is_none());
    assert_eq!(state.belts_remaining(), 1);
}

#[test]
fn test_solver_snapshot_matches_tick() {
    let config = SolverConfig::default();
    let mut state = state();
    state.drop_gear(16, Vec2::new(220.0, 250.0), &config).unwrap();

    let snapshot = calculate_network(&state.gears, &state.belts, MOTOR_ID);
    tick(&mut state, &config);
    assert_eq!(snapshot, state.gears);
}

#[test]
fn test_level_with_missing_motor_is_idle() {
    let config = SolverConfig::default();
    let mut state = state();
    state.gears.retain(|g| g.id != MOTOR_ID);

    let report = tick(&mut state, &config);
    assert_eq!(report.outcome, NetworkOutcome::NoMotor);
    assert!(state.gears.iter().all(|g| g.speed == 0.0));
}
