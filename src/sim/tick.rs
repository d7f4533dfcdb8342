//! Fixed-interval simulation tick
//!
//! Each tick re-solves the whole network from the current gear/belt lists.
//! Nothing from the previous tick is reused, so gears added, moved or
//! removed between ticks can never leave stale speeds behind.

use super::level::{MOTOR_ID, TARGET_ID};
use super::network::{NetworkOutcome, solve};
use super::state::{PuzzleEvent, PuzzlePhase, PuzzleState};
use crate::settings::SolverConfig;

/// What one tick found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: NetworkOutcome,
    /// Target currently turns as required
    pub target_satisfied: bool,
    /// This tick moved the puzzle into `Solved`
    pub newly_solved: bool,
}

/// Advance the puzzle by one tick
pub fn tick(state: &mut PuzzleState, config: &SolverConfig) -> TickReport {
    state.time_ticks += 1;

    let solution = solve(config, &state.gears, &state.belts, MOTOR_ID);
    if solution.outcome != state.outcome {
        log::info!(
            "Network {:?} -> {:?} at tick {}",
            state.outcome,
            solution.outcome,
            state.time_ticks
        );
    }
    state.outcome = solution.outcome;
    state.gears = solution.gears;

    let target_satisfied = state
        .gear(TARGET_ID)
        .is_some_and(|gear| state.level.target.is_satisfied_by(gear));

    let newly_solved = target_satisfied && state.phase == PuzzlePhase::Playing;
    if newly_solved {
        state.phase = PuzzlePhase::Solved;
        state.pending_belt = None;
        state.push_event(PuzzleEvent::Solved);
        log::info!(
            "Level '{}' solved at tick {} with {} gears and {} belts",
            state.level.name,
            state.time_ticks,
            state.gears.len(),
            state.belts.len()
        );
    }

    TickReport {
        outcome: state.outcome,
        target_satisfied,
        newly_solved,
    }
}
