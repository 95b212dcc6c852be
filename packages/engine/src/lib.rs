//! Cave Engine - tile-grid cave simulation in WASM
//!
//! Architecture:
//! - core/        - random sources shared by every layer
//! - spatial/     - the cave grid and column streaming
//! - domain/      - element codes, level packs, settings, input, sound
//! - systems/     - per-element behaviors run by the world pass
//! - simulation/  - tick state machine, sessions, render diff, wasm facade

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

pub use spatial::grid;
pub use domain::elements;
pub use systems::behaviors;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Cave engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use simulation::{Engine, EngineCore, Phase, TickOutcome};

// Element codes the host needs to recognise in the tile buffer
#[wasm_bindgen]
pub fn el_space() -> u8 { elements::EL_SPACE }
#[wasm_bindgen]
pub fn el_cosmos() -> u8 { elements::EL_COSMOS }
#[wasm_bindgen]
pub fn el_wall() -> u8 { elements::EL_WALL }
#[wasm_bindgen]
pub fn el_player() -> u8 { elements::EL_PLAYER }
#[wasm_bindgen]
pub fn el_player_in_ship() -> u8 { elements::EL_PLAYER_IN_SHIP }
#[wasm_bindgen]
pub fn el_ship() -> u8 { elements::EL_SHIP }
#[wasm_bindgen]
pub fn el_ship_active() -> u8 { elements::EL_SHIP_ACTIVE }
#[wasm_bindgen]
pub fn el_screw() -> u8 { elements::EL_SCREW }
#[wasm_bindgen]
pub fn el_key() -> u8 { elements::EL_KEY }
#[wasm_bindgen]
pub fn el_ammo() -> u8 { elements::EL_AMMO }
#[wasm_bindgen]
pub fn el_life() -> u8 { elements::EL_LIFE }
#[wasm_bindgen]
pub fn el_box() -> u8 { elements::EL_BOX }
#[wasm_bindgen]
pub fn el_bomb() -> u8 { elements::EL_BOMB }
#[wasm_bindgen]
pub fn el_door_v() -> u8 { elements::EL_DOOR_V }
#[wasm_bindgen]
pub fn el_door_h() -> u8 { elements::EL_DOOR_H }
#[wasm_bindgen]
pub fn el_teleport_0() -> u8 { elements::EL_TELEPORT_0 }
