//! Gear network solver
//!
//! Propagates rotation outward from the motor with a breadth-first walk over
//! meshing contacts and belts. Meshing flips direction; belts keep it. Both
//! scale speed by `parent.teeth / child.teeth`, so the speed at the end of a
//! chain is the product of every ratio along the walk.
//!
//! If any gear is reached twice with conflicting directions the machine is
//! jammed and every gear is reported stopped. There is no partial result.

use std::collections::{HashMap, VecDeque};

use super::collision::meshes_within;
use super::gear::{Belt, Direction, Gear};
use crate::settings::SolverConfig;

/// Which branch the solver ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkOutcome {
    /// Consistent solution; unreached gears are stopped
    Running,
    /// Conflicting directions, everything stopped
    Jammed,
    /// Motor id not present, everything stopped
    NoMotor,
}

/// Result of a full solve
#[derive(Debug, Clone)]
pub struct NetworkSolution {
    /// Input gears in input order, with speed/direction filled in
    pub gears: Vec<Gear>,
    pub outcome: NetworkOutcome,
}

impl NetworkSolution {
    pub fn is_jammed(&self) -> bool {
        self.outcome == NetworkOutcome::Jammed
    }

    pub fn gear(&self, id: &str) -> Option<&Gear> {
        self.gears.iter().find(|g| g.id == id)
    }
}

/// How two gears are coupled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Mesh,
    Belt,
}

impl Link {
    /// Direction the far side of this link must turn
    fn carry(self, dir: Direction) -> Direction {
        match self {
            Link::Mesh => dir.opposite(),
            Link::Belt => dir,
        }
    }
}

/// Neighbor lists for every gear, built once per solve
///
/// Meshing neighbors come first (in gear order), then belt neighbors (in
/// belt order), so traversal order is stable for a given input.
struct Adjacency {
    links: Vec<Vec<(usize, Link)>>,
}

impl Adjacency {
    fn build(gears: &[Gear], belts: &[Belt], index: &HashMap<&str, usize>, tolerance: f32) -> Self {
        let n = gears.len();
        let mut links: Vec<Vec<(usize, Link)>> = vec![Vec::new(); n];

        for i in 0..n {
            for j in (i + 1)..n {
                if meshes_within(&gears[i], &gears[j], tolerance) {
                    links[i].push((j, Link::Mesh));
                    links[j].push((i, Link::Mesh));
                }
            }
        }

        for belt in belts {
            let (Some(&a), Some(&b)) = (index.get(belt.from.as_str()), index.get(belt.to.as_str())) else {
                log::debug!("Ignoring belt {} with a missing endpoint", belt.id);
                continue;
            };
            if a == b {
                continue;
            }
            links[a].push((b, Link::Belt));
            links[b].push((a, Link::Belt));
        }

        Self { links }
    }
}

/// Solve with the default configuration; returns only the gears
pub fn calculate_network(gears: &[Gear], belts: &[Belt], motor_id: &str) -> Vec<Gear> {
    solve(&SolverConfig::default(), gears, belts, motor_id).gears
}

/// Solve with an explicit configuration; returns only the gears
pub fn calculate_network_with(
    config: &SolverConfig,
    gears: &[Gear],
    belts: &[Belt],
    motor_id: &str,
) -> Vec<Gear> {
    solve(config, gears, belts, motor_id).gears
}

/// Full solve from scratch
///
/// Pure: the inputs are not modified and nothing is carried between calls.
pub fn solve(config: &SolverConfig, gears: &[Gear], belts: &[Belt], motor_id: &str) -> NetworkSolution {
    let mut solved: Vec<Gear> = gears.to_vec();
    for gear in &mut solved {
        gear.stop();
    }

    // First occurrence wins if ids repeat
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(gears.len());
    for (i, gear) in gears.iter().enumerate() {
        index.entry(gear.id.as_str()).or_insert(i);
    }

    let Some(&motor) = index.get(motor_id) else {
        log::debug!("Motor {} not in scene, network idle", motor_id);
        return NetworkSolution {
            gears: solved,
            outcome: NetworkOutcome::NoMotor,
        };
    };

    let adjacency = Adjacency::build(gears, belts, &index, config.mesh_tolerance);

    solved[motor].speed = config.motor_speed;
    solved[motor].direction = Direction::Clockwise;

    let mut visited = vec![false; solved.len()];
    visited[motor] = true;
    let mut queue = VecDeque::from([motor]);

    while let Some(current) = queue.pop_front() {
        let speed = solved[current].speed;
        let direction = solved[current].direction;
        let teeth = solved[current].teeth.max(1) as f32;

        for &(next, link) in &adjacency.links[current] {
            let expected = link.carry(direction);

            if visited[next] {
                if solved[next].direction != expected {
                    log::debug!(
                        "Jam: {} must turn {:?} via {:?} from {}, already {:?}",
                        solved[next].id,
                        expected,
                        link,
                        solved[current].id,
                        solved[next].direction
                    );
                    for gear in &mut solved {
                        gear.stop();
                    }
                    return NetworkSolution {
                        gears: solved,
                        outcome: NetworkOutcome::Jammed,
                    };
                }
                continue;
            }

            visited[next] = true;
            let next_gear = &mut solved[next];
            next_gear.direction = expected;
            next_gear.speed = speed * teeth / next_gear.teeth.max(1) as f32;
            queue.push_back(next);
        }
    }

    NetworkSolution {
        gears: solved,
        outcome: NetworkOutcome::Running,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn gear(id: &str, x: f32, y: f32, teeth: u32) -> Gear {
        Gear::new(id, Vec2::new(x, y), teeth)
    }

    fn find<'a>(gears: &'a [Gear], id: &str) -> &'a Gear {
        gears.iter().find(|g| g.id == id).unwrap()
    }

    /// Three 12-tooth gears (r = 30) meshing pairwise in an equilateral triangle
    fn triangle() -> Vec<Gear> {
        let h = 60.0 * (3.0f32).sqrt() / 2.0;
        vec![
            gear("a", 100.0, 100.0, 12),
            gear("b", 160.0, 100.0, 12),
            gear("c", 130.0, 100.0 + h, 12),
        ]
    }

    #[test]
    fn test_motor_alone() {
        let gears = vec![gear("motor", 0.0, 0.0, 12)];
        let out = calculate_network(&gears, &[], "motor");
        assert_eq!(out[0].direction, Direction::Clockwise);
        assert_eq!(out[0].speed, crate::consts::MOTOR_SPEED);
    }

    #[test]
    fn test_missing_motor_leaves_everything_idle() {
        let mut gears = vec![gear("a", 0.0, 0.0, 12), gear("b", 60.0, 0.0, 12)];
        // Stale kinematics from a previous tick must not survive
        gears[1].speed = 7.0;
        gears[1].direction = Direction::CounterClockwise;

        let solution = solve(&SolverConfig::default(), &gears, &[], "motor");
        assert_eq!(solution.outcome, NetworkOutcome::NoMotor);
        for g in &solution.gears {
            assert_eq!(g.speed, 0.0);
            assert_eq!(g.direction, Direction::Stopped);
        }
        // Positions and ids untouched
        assert_eq!(solution.gears[1].pos, gears[1].pos);
    }

    #[test]
    fn test_mesh_chain_alternates() {
        let gears = vec![
            gear("a", 0.0, 0.0, 12),
            gear("b", 60.0, 0.0, 12),
            gear("c", 120.0, 0.0, 12),
        ];
        let out = calculate_network(&gears, &[], "a");
        assert_eq!(find(&out, "a").direction, Direction::Clockwise);
        assert_eq!(find(&out, "b").direction, Direction::CounterClockwise);
        assert_eq!(find(&out, "c").direction, Direction::Clockwise);
    }

    #[test]
    fn test_ratio_halves_speed() {
        // 8 teeth (r 20) meshing 16 teeth (r 40)
        let gears = vec![gear("a", 0.0, 0.0, 8), gear("b", 60.0, 0.0, 16)];
        let out = calculate_network(&gears, &[], "a");
        assert_eq!(find(&out, "b").speed, find(&out, "a").speed / 2.0);
    }

    #[test]
    fn test_belt_keeps_direction() {
        // Far apart, only the belt couples them
        let gears = vec![gear("motor", 0.0, 0.0, 12), gear("small", 300.0, 0.0, 6)];
        let belts = vec![Belt::new("belt-1", "motor", "small")];
        let out = calculate_network(&gears, &belts, "motor");
        let motor = find(&out, "motor");
        let small = find(&out, "small");
        assert_eq!(small.direction, motor.direction);
        assert_eq!(small.speed, motor.speed * 2.0);
    }

    #[test]
    fn test_belt_works_in_reverse() {
        let gears = vec![gear("motor", 0.0, 0.0, 12), gear("other", 300.0, 0.0, 24)];
        let belts = vec![Belt::new("belt-1", "other", "motor")];
        let out = calculate_network(&gears, &belts, "motor");
        assert_eq!(find(&out, "other").direction, Direction::Clockwise);
        assert_eq!(find(&out, "other").speed, crate::consts::MOTOR_SPEED / 2.0);
    }

    #[test]
    fn test_odd_cycle_jams_whole_network() {
        let mut gears = triangle();
        // A belt-driven bystander that would otherwise spin
        gears.push(gear("far", 600.0, 400.0, 12));
        let belts = vec![Belt::new("belt-1", "a", "far")];

        let solution = solve(&SolverConfig::default(), &gears, &belts, "a");
        assert!(solution.is_jammed());
        for g in &solution.gears {
            assert_eq!(g.speed, 0.0);
            assert_eq!(g.direction, Direction::Stopped);
        }
    }

    #[test]
    fn test_even_cycle_runs() {
        let gears = vec![
            gear("a", 0.0, 0.0, 12),
            gear("b", 60.0, 0.0, 12),
            gear("c", 60.0, 60.0, 12),
            gear("d", 0.0, 60.0, 12),
        ];
        let solution = solve(&SolverConfig::default(), &gears, &[], "a");
        assert_eq!(solution.outcome, NetworkOutcome::Running);
        assert_eq!(find(&solution.gears, "c").direction, Direction::Clockwise);
        assert_eq!(find(&solution.gears, "d").direction, Direction::CounterClockwise);
    }

    #[test]
    fn test_belt_across_meshing_pair_jams() {
        let gears = vec![gear("a", 0.0, 0.0, 12), gear("b", 60.0, 0.0, 12)];
        let belts = vec![Belt::new("belt-1", "a", "b")];
        let solution = solve(&SolverConfig::default(), &gears, &belts, "a");
        assert!(solution.is_jammed());
    }

    #[test]
    fn test_disconnected_gear_idle_without_jam() {
        let gears = vec![
            gear("motor", 0.0, 0.0, 12),
            gear("b", 60.0, 0.0, 12),
            gear("loner", 500.0, 500.0, 8),
        ];
        let solution = solve(&SolverConfig::default(), &gears, &[], "motor");
        assert_eq!(solution.outcome, NetworkOutcome::Running);
        let loner = find(&solution.gears, "loner");
        assert_eq!(loner.speed, 0.0);
        assert_eq!(loner.direction, Direction::Stopped);
    }

    #[test]
    fn test_chain_speed_is_product_of_ratios() {
        // 12 -> 8 -> 16 -> 6, each pair just touching
        let gears = vec![
            gear("motor", 0.0, 0.0, 12),
            gear("g8", 50.0, 0.0, 8),
            gear("g16", 110.0, 0.0, 16),
            gear("g6", 165.0, 0.0, 6),
        ];
        let out = calculate_network(&gears, &[], "motor");
        assert_eq!(find(&out, "g8").speed, 15.0);
        assert_eq!(find(&out, "g16").speed, 7.5);
        assert_eq!(find(&out, "g6").speed, 20.0);
        assert_eq!(find(&out, "g6").direction, Direction::CounterClockwise);
    }

    #[test]
    fn test_output_keeps_input_order() {
        let gears = vec![
            gear("z", 120.0, 0.0, 12),
            gear("motor", 0.0, 0.0, 12),
            gear("m", 60.0, 0.0, 12),
        ];
        let out = calculate_network(&gears, &[], "motor");
        let ids: Vec<&str> = out.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["z", "motor", "m"]);
    }

    #[test]
    fn test_dangling_belt_ignored() {
        let gears = vec![gear("motor", 0.0, 0.0, 12)];
        let belts = vec![Belt::new("belt-1", "motor", "gone")];
        let solution = solve(&SolverConfig::default(), &gears, &belts, "motor");
        assert_eq!(solution.outcome, NetworkOutcome::Running);
    }

    #[test]
    fn test_custom_motor_speed() {
        let config = SolverConfig {
            motor_speed: 3.0,
            ..Default::default()
        };
        let gears = vec![gear("motor", 0.0, 0.0, 12), gear("b", 60.0, 0.0, 12)];
        let out = calculate_network_with(&config, &gears, &[], "motor");
        assert_eq!(find(&out, "b").speed, 3.0);
    }

    #[test]
    fn test_inputs_untouched() {
        let gears = triangle();
        let before = gears.clone();
        let _ = calculate_network(&gears, &[], "a");
        assert_eq!(gears, before);
    }

    proptest! {
        #[test]
        fn solve_is_deterministic(
            positions in proptest::collection::vec((0.0f32..400.0, 0.0f32..400.0, 4u32..24), 1..12),
        ) {
            let gears: Vec<Gear> = positions
                .iter()
                .enumerate()
                .map(|(i, &(x, y, t))| gear(&format!("g{i}"), x, y, t))
                .collect();
            let belts = vec![Belt::new("belt-1", "g0", format!("g{}", gears.len() - 1))];

            let first = solve(&SolverConfig::default(), &gears, &belts, "g0");
            let second = solve(&SolverConfig::default(), &gears, &belts, "g0");
            prop_assert_eq!(first.outcome, second.outcome);
            prop_assert_eq!(first.gears, second.gears);
        }

        #[test]
        fn meshing_pair_follows_tooth_ratio(teeth_a in 4u32..40, teeth_b in 4u32..40) {
            let a = gear("a", 0.0, 0.0, teeth_a);
            let b = gear("b", a.radius() + crate::radius_for_teeth(teeth_b), 0.0, teeth_b);
            let out = calculate_network(&[a, b], &[], "a");
            let expected = out[0].speed * teeth_a as f32 / teeth_b as f32;
            prop_assert!((out[1].speed - expected).abs() < 1e-4);
            prop_assert_eq!(out[1].direction, Direction::CounterClockwise);
        }
    }
}
