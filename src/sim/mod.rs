//! Deterministic gear simulation
//!
//! All puzzle logic lives here. This module must be pure and deterministic:
//! - Every tick re-solves from the current snapshot
//! - Stable iteration order (input order, then belt order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod gear;
pub mod level;
pub mod network;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::{check_collision, meshes_within, overlaps, resolve_collision, resolve_collision_with};
pub use gear::{Belt, Direction, Gear};
pub use level::{BeltSpec, GearSpec, Level, MOTOR_ID, TARGET_ID, TargetSpec};
pub use network::{
    NetworkOutcome, NetworkSolution, calculate_network, calculate_network_with, solve,
};
pub use placement::{Placement, PlayArea, WaterZone, is_valid_placement, placement_check};
pub use state::{PuzzleEvent, PuzzlePhase, PuzzleState};
pub use tick::{TickReport, tick};
