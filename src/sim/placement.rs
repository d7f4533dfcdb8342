//! Placement validity: play-area bounds and water zones
//!
//! Rules run in order: play area first, then water. Overlap with other gears
//! is not a rejection reason here; `collision` pushes gears apart instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::closest_point_on_rect;
use crate::consts::*;

/// Canvas size and the margins reserved around the usable area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    /// Toolbox strip
    pub margin_bottom: f32,
    pub margin_side: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            margin_top: FRAME_MARGIN,
            margin_bottom: TOOLBOX_MARGIN,
            margin_side: FRAME_MARGIN,
        }
    }
}

impl PlayArea {
    /// Top-left corner of the usable area
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.margin_side, self.margin_top)
    }

    /// Bottom-right corner of the usable area
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.width - self.margin_side, self.height - self.margin_bottom)
    }

    /// True if the whole disk fits inside the usable area
    pub fn contains_disk(&self, center: Vec2, radius: f32) -> bool {
        let min = self.min() + Vec2::splat(radius);
        let max = self.max() - Vec2::splat(radius);
        center.x >= min.x && center.x <= max.x && center.y >= min.y && center.y <= max.y
    }

    /// A drag released past the canvas bottom edge means "throw away"
    pub fn is_discard_drop(&self, pos: Vec2) -> bool {
        pos.y > self.height
    }
}

/// Rectangular exclusion region (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterZone {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WaterZone {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Distance from `p` to the nearest point of the rectangle (0 inside)
    pub fn distance_to(&self, p: Vec2) -> f32 {
        p.distance(closest_point_on_rect(p, self.min(), self.max()))
    }

    /// True if a disk (plus clearance) would touch the water
    pub fn blocks_disk(&self, center: Vec2, radius: f32, clearance: f32) -> bool {
        self.distance_to(center) < radius + clearance
    }
}

/// Outcome of a placement check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Valid,
    /// Disk crosses the usable-area boundary
    OutOfBounds,
    /// Disk touches the water zone at this index
    InWater(usize),
}

impl Placement {
    pub fn is_valid(self) -> bool {
        self == Placement::Valid
    }
}

/// Check a candidate disk against the play area, then every water zone
pub fn placement_check(
    center: Vec2,
    radius: f32,
    area: &PlayArea,
    zones: &[WaterZone],
    water_clearance: f32,
) -> Placement {
    if !area.contains_disk(center, radius) {
        return Placement::OutOfBounds;
    }

    zones
        .iter()
        .position(|zone| zone.blocks_disk(center, radius, water_clearance))
        .map_or(Placement::Valid, Placement::InWater)
}

/// Boolean form of `placement_check` with the default water clearance
pub fn is_valid_placement(center: Vec2, radius: f32, area: &PlayArea, zones: &[WaterZone]) -> bool {
    placement_check(center, radius, area, zones, WATER_CLEARANCE).is_valid()
}
