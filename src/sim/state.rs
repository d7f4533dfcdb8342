//! Puzzle state and player edits
//!
//! Holds the canonical gear/belt lists between ticks. Every edit comes from
//! a discrete pointer event on the UI thread; invalid edits are dropped
//! without touching the budget counters.

use glam::Vec2;

use super::collision::resolve_collision_with;
use super::gear::{Belt, Gear};
use super::level::{Level, MOTOR_ID, TARGET_ID};
use super::network::NetworkOutcome;
use super::placement::{Placement, placement_check};
use crate::settings::SolverConfig;

/// Current phase of the puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzlePhase {
    /// Player is building the machine
    Playing,
    /// Target reached its required motion; edits are ignored
    Solved,
}

/// Something the UI may want to react to (sounds, confetti)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleEvent {
    GearPlaced { id: String },
    GearRemoved { id: String },
    BeltAdded { id: String },
    BeltRemoved { id: String },
    Solved,
}

/// Complete puzzle state
#[derive(Debug, Clone)]
pub struct PuzzleState {
    pub level: Level,
    /// Scaffolding first, then player gears in placement order
    pub gears: Vec<Gear>,
    pub belts: Vec<Belt>,
    pub phase: PuzzlePhase,
    /// Clicks select belt endpoints instead of starting drags
    pub belt_mode: bool,
    /// First gear clicked in belt mode
    pub pending_belt: Option<String>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Outcome of the most recent solve
    pub outcome: NetworkOutcome,
    events: Vec<PuzzleEvent>,
    /// Next id suffix for player gears and belts
    next_id: u32,
}

impl PuzzleState {
    /// Fresh state for a level: scaffolding only, nothing turning yet
    pub fn new(level: Level) -> Self {
        let gears = level.build_gears();
        let belts = level.build_belts();
        Self {
            level,
            gears,
            belts,
            phase: PuzzlePhase::Playing,
            belt_mode: false,
            pending_belt: None,
            time_ticks: 0,
            outcome: NetworkOutcome::Running,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Throw away every player edit
    pub fn reset(&mut self) {
        *self = Self::new(self.level.clone());
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_id);
        self.next_id += 1;
        id
    }

    pub fn gear(&self, id: &str) -> Option<&Gear> {
        self.gears.iter().find(|g| g.id == id)
    }

    pub fn motor(&self) -> Option<&Gear> {
        self.gear(MOTOR_ID)
    }

    pub fn target(&self) -> Option<&Gear> {
        self.gear(TARGET_ID)
    }

    /// Gears the player may still place
    pub fn gears_remaining(&self) -> u32 {
        let placed = self.gears.iter().filter(|g| !g.is_fixed).count() as u32;
        self.level.max_gears.saturating_sub(placed)
    }

    /// Belts the player may still add
    pub fn belts_remaining(&self) -> u32 {
        let placed = self.belts.iter().filter(|b| !b.is_fixed).count() as u32;
        self.level.max_belts.saturating_sub(placed)
    }

    pub fn is_solved(&self) -> bool {
        self.phase == PuzzlePhase::Solved
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PuzzleEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: PuzzleEvent) {
        self.events.push(event);
    }

    fn check_placement(&self, pos: Vec2, radius: f32, config: &SolverConfig) -> Placement {
        placement_check(
            pos,
            radius,
            &self.level.play_area,
            &self.level.water_zones,
            config.water_clearance,
        )
    }

    /// Drop a toolbox gear at `pos`
    ///
    /// The drop point must be valid, then the gear is pushed out of any
    /// overlap and the resolved point must still be valid. Returns the new
    /// gear's id, or `None` if the drop was discarded.
    pub fn drop_gear(&mut self, teeth: u32, pos: Vec2, config: &SolverConfig) -> Option<String> {
        if self.is_solved() {
            return None;
        }
        if !self.level.offers(teeth) {
            log::debug!("Toolbox has no {}-tooth gear", teeth);
            return None;
        }
        if self.gears_remaining() == 0 {
            log::debug!("Gear budget exhausted");
            return None;
        }

        // Id is only allocated on commit
        let mut candidate = Gear::new("", pos, teeth);
        let placement = self.check_placement(pos, candidate.radius(), config);
        if !placement.is_valid() {
            log::debug!("Discarding drop at {:?}: {:?}", pos, placement);
            return None;
        }

        let resolved = resolve_collision_with(
            &candidate,
            &self.gears,
            config.max_collision_iterations,
            config.collision_clearance,
        );
        let placement = self.check_placement(resolved, candidate.radius(), config);
        if !placement.is_valid() {
            log::debug!("Discarding drop resolved to {:?}: {:?}", resolved, placement);
            return None;
        }

        candidate.id = self.next_entity_id("gear");
        candidate.pos = resolved;
        let id = candidate.id.clone();
        self.gears.push(candidate);
        self.push_event(PuzzleEvent::GearPlaced { id: id.clone() });
        Some(id)
    }

    /// Drag a player gear to `pos`
    ///
    /// Commits the resolved position only if it is valid; otherwise the gear
    /// stays where it was. Scaffolding gears never move.
    pub fn move_gear(&mut self, id: &str, pos: Vec2, config: &SolverConfig) -> bool {
        if self.is_solved() {
            return false;
        }
        let Some(index) = self.gears.iter().position(|g| g.id == id) else {
            return false;
        };
        if self.gears[index].is_fixed {
            return false;
        }

        let candidate = Gear {
            pos,
            ..self.gears[index].clone()
        };
        let resolved = resolve_collision_with(
            &candidate,
            &self.gears,
            config.max_collision_iterations,
            config.collision_clearance,
        );
        let placement = self.check_placement(resolved, candidate.radius(), config);
        if !placement.is_valid() {
            log::debug!("Abandoning drag of {} to {:?}: {:?}", id, resolved, placement);
            return false;
        }

        self.gears[index].pos = resolved;
        true
    }

    /// End of a drag: past the canvas bottom edge deletes the gear
    pub fn release_gear(&mut self, id: &str, pos: Vec2, config: &SolverConfig) -> bool {
        if self.level.play_area.is_discard_drop(pos) {
            return self.remove_gear(id);
        }
        self.move_gear(id, pos, config)
    }

    /// Remove a player gear and every belt attached to it
    pub fn remove_gear(&mut self, id: &str) -> bool {
        if self.is_solved() {
            return false;
        }
        let Some(index) = self.gears.iter().position(|g| g.id == id) else {
            return false;
        };
        if self.gears[index].is_fixed {
            return false;
        }

        self.gears.remove(index);

        let (detached, kept): (Vec<Belt>, Vec<Belt>) =
            std::mem::take(&mut self.belts).into_iter().partition(|b| b.touches(id));
        self.belts = kept;

        if self.pending_belt.as_deref() == Some(id) {
            self.pending_belt = None;
        }

        self.push_event(PuzzleEvent::GearRemoved { id: id.to_string() });
        for belt in detached {
            self.push_event(PuzzleEvent::BeltRemoved { id: belt.id });
        }
        true
    }

    /// Enter/leave belt mode; always forgets a half-made belt
    pub fn set_belt_mode(&mut self, enabled: bool) {
        self.belt_mode = enabled;
        self.pending_belt = None;
    }

    pub fn toggle_belt_mode(&mut self) {
        self.set_belt_mode(!self.belt_mode);
    }

    /// Click on a gear while in belt mode
    ///
    /// The first click remembers the gear, clicking it again cancels, and a
    /// click on a second gear tries to add the belt. Returns the new belt id.
    pub fn select_for_belt(&mut self, id: &str) -> Option<String> {
        if !self.belt_mode || self.gear(id).is_none() {
            return None;
        }

        match self.pending_belt.take() {
            None => {
                self.pending_belt = Some(id.to_string());
                None
            }
            Some(first) if first == id => None,
            Some(first) => self.add_belt(&first, id),
        }
    }

    /// Connect two distinct gears with a player belt
    pub fn add_belt(&mut self, from: &str, to: &str) -> Option<String> {
        if self.is_solved() || from == to {
            return None;
        }
        if self.belts_remaining() == 0 {
            log::debug!("Belt budget exhausted");
            return None;
        }
        if self.belts.iter().any(|b| b.connects(from, to)) {
            return None;
        }

        let mut belt = Belt::new("", from, to);
        let length = belt.length(&self.gears)?;
        if length > self.level.max_belt_length {
            log::debug!(
                "Belt {} -> {} too long: {:.1} > {:.1}",
                from,
                to,
                length,
                self.level.max_belt_length
            );
            return None;
        }

        belt.id = self.next_entity_id("belt");
        let id = belt.id.clone();
        self.belts.push(belt);
        self.push_event(PuzzleEvent::BeltAdded { id: id.clone() });
        Some(id)
    }

    /// Remove a player belt
    pub fn remove_belt(&mut self, id: &str) -> bool {
        if self.is_solved() {
            return false;
        }
        let Some(index) = self.belts.iter().position(|b| b.id == id && !b.is_fixed) else {
            return false;
        };
        self.belts.remove(index);
        self.push_event(PuzzleEvent::BeltRemoved { id: id.to_string() });
        true
    }
}
