//! Gearworks entry point
//!
//! Native: loads a level (path argument, or the built-in demo), solves one
//! tick and prints every gear's motion. The browser build uses the `wasm`
//! bindings from the library instead.

#[cfg(not(target_arch = "wasm32"))]
const DEMO_LEVEL: &str = r#"{
    "name": "demo",
    "motor": { "pos": [150.0, 250.0], "teeth": 12 },
    "target": {
        "pos": [450.0, 250.0],
        "teeth": 12,
        "required_direction": "clockwise",
        "min_speed": 5.0
    },
    "fixed_gears": [ { "pos": [220.0, 250.0], "teeth": 16 } ],
    "water_zones": [ { "x": 300.0, "y": 330.0, "width": 120.0, "height": 100.0 } ],
    "max_gears": 3,
    "max_belts": 1,
    "toolbox": [8, 12, 16]
}"#;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use gearworks::SolverConfig;
    use gearworks::sim::{Level, PuzzleState, tick};

    env_logger::init();

    let json = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading level from {}", path);
            std::fs::read_to_string(path)?
        }
        None => DEMO_LEVEL.to_string(),
    };

    let level = Level::from_json(&json)?;
    let config = SolverConfig::default();
    let mut state = PuzzleState::new(level);
    let report = tick(&mut state, &config);

    println!("Level '{}': {:?}", state.level.name, report.outcome);
    for gear in &state.gears {
        println!(
            "  {:<10} teeth={:<3} pos=({:>6.1}, {:>6.1}) {:?} {:.2}",
            gear.id, gear.teeth, gear.pos.x, gear.pos.y, gear.direction, gear.speed
        );
    }
    println!(
        "Target {} (budget: {} gears, {} belts left)",
        if report.target_satisfied { "satisfied" } else { "not satisfied" },
        state.gears_remaining(),
        state.belts_remaining()
    );

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `gearworks::wasm::wasm_start`, this is just to satisfy the compiler
}
