//! Level configuration
//!
//! A level is static data: where the motor and target sit, which scaffolding
//! gears and belts are pre-placed, where the water is, and what the player
//! may spend. Levels are produced elsewhere and arrive as JSON.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gear::{Belt, Direction, Gear};
use super::placement::{PlayArea, WaterZone};
use crate::error::LoadError;

/// Id of the motor gear in every level
pub const MOTOR_ID: &str = "motor";
/// Id of the target gear in every level
pub const TARGET_ID: &str = "target";

/// Position and size of a scaffolding gear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearSpec {
    pub pos: Vec2,
    pub teeth: u32,
}

/// The gear the player has to drive, and how
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub pos: Vec2,
    pub teeth: u32,
    pub required_direction: Direction,
    #[serde(default)]
    pub min_speed: Option<f32>,
}

impl TargetSpec {
    /// True if `gear` turns the required way at (at least) the required speed
    pub fn is_satisfied_by(&self, gear: &Gear) -> bool {
        gear.is_turning()
            && gear.direction == self.required_direction
            && self.min_speed.is_none_or(|min| gear.speed >= min)
    }
}

/// Pre-placed belt between two scaffolding gears
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeltSpec {
    pub from: String,
    pub to: String,
}

fn default_max_belt_length() -> f32 {
    300.0
}

/// One puzzle instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub name: String,
    pub motor: GearSpec,
    pub target: TargetSpec,
    #[serde(default)]
    pub fixed_gears: Vec<GearSpec>,
    #[serde(default)]
    pub belts: Vec<BeltSpec>,
    #[serde(default)]
    pub water_zones: Vec<WaterZone>,
    /// Player gear budget
    pub max_gears: u32,
    /// Player belt budget
    #[serde(default)]
    pub max_belts: u32,
    #[serde(default = "default_max_belt_length")]
    pub max_belt_length: f32,
    /// Tooth counts offered in the toolbox
    pub toolbox: Vec<u32>,
    #[serde(default)]
    pub play_area: PlayArea,
}

impl Level {
    /// Parse and validate a level
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        log::info!(
            "Loaded level '{}': {} fixed gears, {} belts, {} water zones",
            level.name,
            level.fixed_gears.len(),
            level.belts.len(),
            level.water_zones.len()
        );
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Id of the n-th pre-placed gear
    pub fn fixed_gear_id(index: usize) -> String {
        format!("fixed-{index}")
    }

    /// Check the level is solvable data (not that it is solvable as a puzzle)
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.motor.teeth == 0 {
            return Err(LoadError::ZeroTeeth(MOTOR_ID.to_string()));
        }
        if self.target.teeth == 0 {
            return Err(LoadError::ZeroTeeth(TARGET_ID.to_string()));
        }
        if let Some(i) = self.fixed_gears.iter().position(|g| g.teeth == 0) {
            return Err(LoadError::ZeroTeeth(Self::fixed_gear_id(i)));
        }
        if self.target.required_direction == Direction::Stopped {
            return Err(LoadError::TargetDirection);
        }
        if self.toolbox.is_empty() {
            return Err(LoadError::EmptyToolbox);
        }
        if self.toolbox.contains(&0) {
            return Err(LoadError::ZeroToolboxTeeth);
        }
        if !(self.max_belt_length > 0.0) {
            return Err(LoadError::BeltLength(self.max_belt_length));
        }
        if let Some(i) = self
            .water_zones
            .iter()
            .position(|z| !(z.width >= 0.0 && z.height >= 0.0))
        {
            return Err(LoadError::WaterZoneSize(i));
        }

        let ids: HashSet<String> = self.build_gears().into_iter().map(|g| g.id).collect();
        for belt in &self.belts {
            if !ids.contains(&belt.from) || !ids.contains(&belt.to) {
                return Err(LoadError::UnknownBeltEndpoint {
                    from: belt.from.clone(),
                    to: belt.to.clone(),
                });
            }
        }

        for gear in self.build_gears() {
            if !self.play_area.contains_disk(gear.pos, gear.radius()) {
                log::warn!("Level '{}': gear {} sits outside the play area", self.name, gear.id);
            }
        }

        Ok(())
    }

    /// Scaffolding gears: motor, target, then the pre-placed ones
    pub fn build_gears(&self) -> Vec<Gear> {
        let mut gears = Vec::with_capacity(self.fixed_gears.len() + 2);
        gears.push(Gear::new(MOTOR_ID, self.motor.pos, self.motor.teeth).fixed());
        gears.push(Gear::new(TARGET_ID, self.target.pos, self.target.teeth).fixed());
        for (i, spec) in self.fixed_gears.iter().enumerate() {
            gears.push(Gear::new(Self::fixed_gear_id(i), spec.pos, spec.teeth).fixed());
        }
        gears
    }

    /// Pre-placed belts with stable ids
    pub fn build_belts(&self) -> Vec<Belt> {
        self.belts
            .iter()
            .enumerate()
            .map(|(i, b)| Belt::new(format!("fixed-belt-{i}"), b.from.clone(), b.to.clone()).fixed())
            .collect()
    }

    /// True if the toolbox offers this size
    pub fn offers(&self, teeth: u32) -> bool {
        self.toolbox.contains(&teeth)
    }
}
