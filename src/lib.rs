//! Gearworks - gear-mesh solver for the mechanical puzzle mini-game
//!
//! Core modules:
//! - `sim`: Deterministic solver (meshing, belts, jams, placement, puzzle state)
//! - `settings`: Tunable solver configuration
//! - `error`: Level/config loading errors
//! - `wasm`: JSON bindings for the browser front end (wasm32 only)

pub mod error;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::LoadError;
pub use settings::SolverConfig;

use glam::Vec2;

/// Solver configuration constants
pub mod consts {
    /// Simulation tick period (the UI re-solves the network this often)
    pub const TICK_INTERVAL_MS: u32 = 100;

    /// Gear radius per tooth (radius is always proportional to tooth count)
    pub const RADIUS_PER_TOOTH: f32 = 2.5;

    /// Motor speed magnitude, the only energy source in the network
    pub const MOTOR_SPEED: f32 = 10.0;

    /// Allowed deviation from `r1 + r2` for two gears to count as meshing
    pub const MESH_TOLERANCE: f32 = 5.0;
    /// Extra gap added when pushing an overlapping gear apart.
    /// Must stay below MESH_TOLERANCE so pushed gears still mesh.
    pub const COLLISION_CLEARANCE: f32 = 2.0;
    /// Push-apart passes before accepting a best-effort position
    pub const MAX_COLLISION_ITERATIONS: u32 = 5;

    /// Minimum gap between a gear's rim and a water zone
    pub const WATER_CLEARANCE: f32 = 5.0;

    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Reserved strip at the bottom for the toolbox
    pub const TOOLBOX_MARGIN: f32 = 100.0;
    /// Visual framing on the remaining edges
    pub const FRAME_MARGIN: f32 = 20.0;
}

/// Radius of a gear with the given tooth count
#[inline]
pub fn radius_for_teeth(teeth: u32) -> f32 {
    teeth as f32 * consts::RADIUS_PER_TOOTH
}

/// Closest point on an axis-aligned rectangle to `p`
#[inline]
pub fn closest_point_on_rect(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    p.clamp(min, max)
}
