//! Gear and belt entities
//!
//! Kinematic state is an unsigned speed magnitude plus an explicit
//! `Direction`. Signed speed only exists at the boundary (`signed_speed`).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::radius_for_teeth;

/// Rotation direction of a gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Clockwise,
    CounterClockwise,
    #[default]
    Stopped,
}

impl Direction {
    /// Direction a meshing neighbor is forced into
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
            Direction::Stopped => Direction::Stopped,
        }
    }

    /// +1 clockwise, -1 counter-clockwise, 0 stopped
    pub fn sign(self) -> f32 {
        match self {
            Direction::Clockwise => 1.0,
            Direction::CounterClockwise => -1.0,
            Direction::Stopped => 0.0,
        }
    }

    /// Inverse of `Gear::signed_speed`
    pub fn from_signed(speed: f32) -> Self {
        if speed > 0.0 {
            Direction::Clockwise
        } else if speed < 0.0 {
            Direction::CounterClockwise
        } else {
            Direction::Stopped
        }
    }
}

/// A rotating disk in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gear {
    pub id: String,
    /// Center in scene coordinates
    pub pos: Vec2,
    /// Tooth count (>= 1), the mechanical ratio unit
    pub teeth: u32,
    /// Angular speed magnitude (never negative)
    #[serde(default)]
    pub speed: f32,
    #[serde(default)]
    pub direction: Direction,
    /// Scaffolding gear (motor, target, pre-placed): cannot move or be removed
    #[serde(default)]
    pub is_fixed: bool,
}

impl Gear {
    pub fn new(id: impl Into<String>, pos: Vec2, teeth: u32) -> Self {
        Self {
            id: id.into(),
            pos,
            teeth: teeth.max(1),
            speed: 0.0,
            direction: Direction::Stopped,
            is_fixed: false,
        }
    }

    /// Same gear, marked as part of the level scaffolding
    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    /// Radius derived from tooth count
    #[inline]
    pub fn radius(&self) -> f32 {
        radius_for_teeth(self.teeth)
    }

    /// Speed with direction folded into the sign (clockwise positive)
    #[inline]
    pub fn signed_speed(&self) -> f32 {
        self.speed * self.direction.sign()
    }

    /// Reset to rest
    pub fn stop(&mut self) {
        self.speed = 0.0;
        self.direction = Direction::Stopped;
    }

    pub fn is_turning(&self) -> bool {
        self.direction != Direction::Stopped && self.speed > 0.0
    }
}

/// A same-direction coupler between two gears that need not touch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Belt {
    pub id: String,
    pub from: String,
    pub to: String,
    /// Pre-placed by the level; does not count against the player's budget
    #[serde(default)]
    pub is_fixed: bool,
}

impl Belt {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            is_fixed: false,
        }
    }

    /// Same belt, marked as part of the level scaffolding
    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    /// True if either end is attached to `gear_id`
    pub fn touches(&self, gear_id: &str) -> bool {
        self.from == gear_id || self.to == gear_id
    }

    /// True if this belt joins `a` and `b` (in either order)
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Center-to-center length, `None` if an endpoint is missing
    pub fn length(&self, gears: &[Gear]) -> Option<f32> {
        let from = gears.iter().find(|g| g.id == self.from)?;
        let to = gears.iter().find(|g| g.id == self.to)?;
        Some(from.pos.distance(to.pos))
    }
}
