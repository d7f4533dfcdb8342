//! Meshing and overlap checks between gear disks
//!
//! Two gears mesh when their centers sit within a small band around
//! `r1 + r2`. Anything closer than `r1 + r2` overlaps and gets pushed apart
//! when a gear is placed or dragged.

use glam::Vec2;

use super::gear::Gear;
use crate::consts::{COLLISION_CLEARANCE, MAX_COLLISION_ITERATIONS, MESH_TOLERANCE};

/// Below this center distance the push direction is undefined
const COINCIDENT_EPSILON: f32 = 0.0001;

/// True iff the two gears' teeth interlock (default tolerance)
#[inline]
pub fn check_collision(a: &Gear, b: &Gear) -> bool {
    meshes_within(a, b, MESH_TOLERANCE)
}

/// Meshing test with an explicit tolerance band
pub fn meshes_within(a: &Gear, b: &Gear, tolerance: f32) -> bool {
    let dist = a.pos.distance(b.pos);
    (dist - (a.radius() + b.radius())).abs() <= tolerance
}

/// True if the two disks are closer than touching
#[inline]
pub fn overlaps(a: &Gear, b: &Gear) -> bool {
    a.pos.distance(b.pos) < a.radius() + b.radius()
}

/// Push `moved` out of every gear it overlaps (default clearance)
///
/// Returns the resolved center. `max_iterations` defaults to
/// `MAX_COLLISION_ITERATIONS` when `None`.
pub fn resolve_collision(moved: &Gear, all_gears: &[Gear], max_iterations: Option<u32>) -> Vec2 {
    resolve_collision_with(
        moved,
        all_gears,
        max_iterations.unwrap_or(MAX_COLLISION_ITERATIONS),
        COLLISION_CLEARANCE,
    )
}

/// Bounded push-apart
///
/// Each pass translates the moved gear away from every overlapping gear by
/// the overlap plus `clearance`. Stops on the first overlap-free pass or when
/// the iteration bound runs out, in which case the last position is returned
/// as is. Inputs are never mutated.
pub fn resolve_collision_with(
    moved: &Gear,
    all_gears: &[Gear],
    max_iterations: u32,
    clearance: f32,
) -> Vec2 {
    let radius = moved.radius();
    let mut pos = moved.pos;

    for _ in 0..max_iterations {
        let mut pushed = false;

        for other in all_gears.iter().filter(|g| g.id != moved.id) {
            let min_dist = radius + other.radius();
            let delta = pos - other.pos;
            let dist = delta.length();

            if dist >= min_dist {
                continue;
            }

            // Stacked exactly on top of each other: push along +x
            let dir = if dist < COINCIDENT_EPSILON {
                Vec2::X
            } else {
                delta / dist
            };

            pos += dir * (min_dist - dist + clearance);
            pushed = true;
        }

        if !pushed {
            break;
        }
    }

    pos
}
