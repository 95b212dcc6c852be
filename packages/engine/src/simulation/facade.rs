use wasm_bindgen::prelude::*;

use crate::domain::config::EngineSettings;
use crate::domain::content::LevelPack;

use super::perf_stats::PerfStats;
use super::session;
use super::EngineCore;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Shared-memory views for the renderer. Pointers move when a buffer
/// reallocates, so re-read after loading a pack.
#[wasm_bindgen]
pub struct BufferLayout {
    tiles_ptr: u32,
    tiles_len: u32,
    visuals_ptr: u32,
    visuals_len: u32,
    dirty_list_ptr: u32,
    dirty_list_len: u32,
}

#[wasm_bindgen]
impl BufferLayout {
    #[wasm_bindgen(getter)]
    pub fn tiles_ptr(&self) -> u32 { self.tiles_ptr }
    #[wasm_bindgen(getter)]
    pub fn tiles_len(&self) -> u32 { self.tiles_len }

    #[wasm_bindgen(getter)]
    pub fn visuals_ptr(&self) -> u32 { self.visuals_ptr }
    #[wasm_bindgen(getter)]
    pub fn visuals_len(&self) -> u32 { self.visuals_len }

    /// Valid for the last `collect_dirty_tiles` call only.
    #[wasm_bindgen(getter)]
    pub fn dirty_list_ptr(&self) -> u32 { self.dirty_list_ptr }
    #[wasm_bindgen(getter)]
    pub fn dirty_list_len(&self) -> u32 { self.dirty_list_len }
}

#[wasm_bindgen]
pub struct Engine {
    core: EngineCore,
}

#[wasm_bindgen]
impl Engine {
    /// Engine over a pack given as raw element-info and cave bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(info: &[u8], caves: &[u8]) -> Result<Engine, JsValue> {
        let pack = LevelPack::from_bytes(info, caves).map_err(js_error)?;
        Ok(Self::with_pack(pack))
    }

    /// Engine over a JSON bundle `{ name?, info, caves }`.
    #[wasm_bindgen(js_name = fromBundle)]
    pub fn from_bundle(json: String) -> Result<Engine, JsValue> {
        let pack = LevelPack::from_bundle_json(&json).map_err(js_error)?;
        Ok(Self::with_pack(pack))
    }

    /// Applies camelCase settings JSON; missing fields keep their defaults.
    pub fn configure(&mut self, json: String) -> Result<(), JsValue> {
        let settings = EngineSettings::from_json(&json).map_err(js_error)?;
        self.core.apply_settings(settings);
        Ok(())
    }

    pub fn load_pack_bundle(&mut self, json: String) -> Result<(), JsValue> {
        self.core.load_pack_bundle_json(&json).map_err(js_error)
    }

    pub fn new_game(&mut self) {
        self.core.new_game();
    }

    /// Returns 0 to keep going, 1 when every cave is cleared, 2 when out of lives.
    pub fn tick(&mut self, frames: u32) -> u8 {
        self.core.tick(frames).id()
    }

    /// Button ids: up 0, down 1, left 2, right 3, fire 4, suicide 5.
    pub fn press(&mut self, button: u8) -> bool {
        self.core.press(button)
    }

    pub fn release(&mut self, button: u8) -> bool {
        self.core.release(button)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> u8 { self.core.phase().id() }

    #[wasm_bindgen(getter)]
    pub fn cave_index(&self) -> u32 { self.core.cave_index() as u32 }

    #[wasm_bindgen(getter)]
    pub fn cave_count(&self) -> u32 { self.core.cave_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn scroll_y(&self) -> i32 { self.core.scroll_y() }

    #[wasm_bindgen(getter)]
    pub fn flash_active(&self) -> bool { self.core.flash_active() }

    #[wasm_bindgen(getter)]
    pub fn redraw_requested(&self) -> bool { self.core.redraw_requested() }

    #[wasm_bindgen(getter)]
    pub fn pack_name(&self) -> Option<String> {
        self.core.pack().name().map(str::to_string)
    }

    /// HUD counters as JSON: score, screws, lives, keys, ammo, cave.
    pub fn info_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.core.info()).map_err(js_error)
    }

    /// Sound cue ids fired since the last call, oldest first.
    pub fn take_sound_cues(&mut self) -> Vec<u8> {
        self.core.take_sound_cues().into_iter().map(|cue| cue.id()).collect()
    }

    /// Six palette bytes of the current cave.
    pub fn cave_colors(&self) -> Vec<u8> {
        self.core.cave_colors().to_vec()
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.core.set_seed(seed);
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === Rendering ===

    /// Refreshes the visual buffer and lists the tiles that changed.
    pub fn collect_dirty_tiles(&mut self) -> usize {
        self.core.collect_dirty_tiles()
    }

    pub fn tiles_ptr(&self) -> *const u8 {
        self.core.tiles_ptr()
    }

    pub fn visuals_ptr(&self) -> *const u8 {
        self.core.visuals_ptr()
    }

    pub fn dirty_list_ptr(&self) -> *const u32 {
        self.core.dirty_list_ptr()
    }

    pub fn buffer_layout(&self) -> BufferLayout {
        let tiles = self.core.grid().size() as u32;
        BufferLayout {
            tiles_ptr: self.core.tiles_ptr() as u32,
            tiles_len: tiles,
            visuals_ptr: self.core.visuals_ptr() as u32,
            visuals_len: self.core.visuals().len() as u32,
            dirty_list_ptr: self.core.dirty_list_ptr() as u32,
            dirty_list_len: self.core.dirty_tiles().len() as u32,
        }
    }
}

impl Engine {
    fn with_pack(pack: LevelPack) -> Self {
        Self {
            core: EngineCore::with_store(pack, EngineSettings::default(), session::default_store()),
        }
    }

    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EngineCore {
        &mut self.core
    }
}
