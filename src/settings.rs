//! Solver settings
//!
//! Tunables for meshing, collision and placement. Defaults come from
//! `crate::consts`; the front end may override any subset via JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::LoadError;

/// Tunable solver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Speed magnitude assigned to the motor gear
    pub motor_speed: f32,
    /// Meshing band around `r1 + r2`
    pub mesh_tolerance: f32,
    /// Gap added on top of the overlap when pushing gears apart
    pub collision_clearance: f32,
    /// Bounded number of push-apart passes
    pub max_collision_iterations: u32,
    /// Rim clearance from water zones
    pub water_clearance: f32,
    /// Tick period owned by the UI loop (informational for the solver)
    pub tick_interval_ms: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            motor_speed: MOTOR_SPEED,
            mesh_tolerance: MESH_TOLERANCE,
            collision_clearance: COLLISION_CLEARANCE,
            max_collision_iterations: MAX_COLLISION_ITERATIONS,
            water_clearance: WATER_CLEARANCE,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl SolverConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!("Loaded solver config: {:?}", config);
        Ok(config)
    }

    /// Reject values that would break meshing or placement
    pub fn validate(&self) -> Result<(), LoadError> {
        if !(self.motor_speed > 0.0) {
            return Err(LoadError::InvalidConfig(format!(
                "motor_speed must be positive, got {}",
                self.motor_speed
            )));
        }
        if !(self.mesh_tolerance > 0.0) {
            return Err(LoadError::InvalidConfig(format!(
                "mesh_tolerance must be positive, got {}",
                self.mesh_tolerance
            )));
        }
        // Pushed-apart gears must still land inside the meshing band
        if self.collision_clearance < 0.0 || self.collision_clearance >= self.mesh_tolerance {
            return Err(LoadError::InvalidConfig(format!(
                "collision_clearance must be in [0, mesh_tolerance), got {}",
                self.collision_clearance
            )));
        }
        if self.water_clearance < 0.0 {
            return Err(LoadError::InvalidConfig(format!(
                "water_clearance must not be negative, got {}",
                self.water_clearance
            )));
        }
        Ok(())
    }
}
