//! Browser bindings
//!
//! The front end owns the gear/belt lists and calls in here with JSON
//! snapshots. Results come back as JSON; malformed input becomes a JS error.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::settings::SolverConfig;
use crate::sim::{self, Belt, Gear, PlayArea, WaterZone};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Logger may already be set if the module is re-initialized
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Gearworks solver ready");
}

fn parse<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("invalid {what}: {e}")))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `calculateNetwork(gears, belts, motorId) -> gears'`
#[wasm_bindgen(js_name = calculateNetwork)]
pub fn calculate_network(gears_json: &str, belts_json: &str, motor_id: &str) -> Result<String, JsValue> {
    let gears: Vec<Gear> = parse(gears_json, "gears")?;
    let belts: Vec<Belt> = parse(belts_json, "belts")?;
    to_json(&sim::calculate_network(&gears, &belts, motor_id))
}

/// Same as `calculateNetwork`, with a partial `SolverConfig` JSON
#[wasm_bindgen(js_name = calculateNetworkWith)]
pub fn calculate_network_with(
    config_json: &str,
    gears_json: &str,
    belts_json: &str,
    motor_id: &str,
) -> Result<String, JsValue> {
    let config = SolverConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let gears: Vec<Gear> = parse(gears_json, "gears")?;
    let belts: Vec<Belt> = parse(belts_json, "belts")?;
    to_json(&sim::calculate_network_with(&config, &gears, &belts, motor_id))
}

/// `resolveCollision(movedGear, allGears, maxIterations?) -> [x, y]`
#[wasm_bindgen(js_name = resolveCollision)]
pub fn resolve_collision(
    moved_json: &str,
    gears_json: &str,
    max_iterations: Option<u32>,
) -> Result<Vec<f32>, JsValue> {
    let moved: Gear = parse(moved_json, "gear")?;
    let gears: Vec<Gear> = parse(gears_json, "gears")?;
    let pos = sim::resolve_collision(&moved, &gears, max_iterations);
    Ok(vec![pos.x, pos.y])
}

/// `checkCollision(gearA, gearB) -> bool` (meshing band test)
#[wasm_bindgen(js_name = checkCollision)]
pub fn check_collision(a_json: &str, b_json: &str) -> Result<bool, JsValue> {
    let a: Gear = parse(a_json, "gear")?;
    let b: Gear = parse(b_json, "gear")?;
    Ok(sim::check_collision(&a, &b))
}

/// Placement validity for a disk of `teeth` at (x, y)
#[wasm_bindgen(js_name = isValidPlacement)]
pub fn is_valid_placement(
    x: f32,
    y: f32,
    teeth: u32,
    area_json: &str,
    zones_json: &str,
) -> Result<bool, JsValue> {
    let area: PlayArea = parse(area_json, "play area")?;
    let zones: Vec<WaterZone> = parse(zones_json, "water zones")?;
    Ok(sim::is_valid_placement(
        Vec2::new(x, y),
        crate::radius_for_teeth(teeth),
        &area,
        &zones,
    ))
}
