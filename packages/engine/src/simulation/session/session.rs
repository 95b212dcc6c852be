//! Session flow: save slot, cave switching and new games.
//!
//! The save slot remembers the furthest cave reached. The value is the cave
//! index stored twice (high and low half) and xor-ed with a fixed password,
//! so a hand-edited or truncated value falls back to the first cave.

use std::collections::HashMap;

use crate::domain::content::STANDARD_CAVE_COUNT;
use crate::domain::state::InfoState;

use super::{EngineCore, Phase};

const SAVE_KEY: &str = "cave-engine:save";
const SAVE_PASSWORD: u32 = 0x216F_6C4F;

/// Key/value persistence for the save slot.
pub trait SaveStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
    fn delete(&mut self, key: &str);
}

/// In-process store; the default off the browser.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.save(key, value);
        store
    }
}

impl SaveStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Browser `localStorage`. Storage errors (private mode, quota) are ignored.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn delete(&mut self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

pub fn default_store() -> Box<dyn SaveStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(LocalStorage)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(MemoryStore::new())
    }
}

/// Save key of a pack; only the stock pack uses the bare key.
pub fn save_key(cave_count: usize) -> String {
    if cave_count == STANDARD_CAVE_COUNT {
        SAVE_KEY.to_string()
    } else {
        format!("{}_{}", SAVE_KEY, cave_count)
    }
}

pub fn encode_save(index: usize) -> String {
    let index = index as u32 & 0xFFFF;
    (((index << 16) | index) ^ SAVE_PASSWORD).to_string()
}

fn decode_save(value: &str, cave_count: usize) -> Option<usize> {
    let raw = value.trim().parse::<u32>().ok()? ^ SAVE_PASSWORD;
    let (high, low) = (raw >> 16, raw & 0xFFFF);
    if high != low || low as usize >= cave_count {
        return None;
    }
    Some(low as usize)
}

/// Cave to start from; anything unreadable means the first cave.
pub fn load_saved_cave(store: &dyn SaveStore, cave_count: usize) -> usize {
    let key = save_key(cave_count);
    let Some(value) = store.load(&key) else {
        tracing::debug!(key = %key, "no saved cave");
        return 0;
    };
    match decode_save(&value, cave_count) {
        Some(index) => {
            tracing::info!(key = %key, cave = index, "saved cave restored");
            index
        }
        None => {
            tracing::warn!(key = %key, value = %value, "corrupt save slot, starting from the first cave");
            0
        }
    }
}

pub(super) fn new_game(engine: &mut EngineCore) {
    engine.state.info = InfoState {
        lives: engine.settings.starting_lives,
        ..InfoState::default()
    };
    engine.state.life_collected_at = None;
    engine.state.teleport = 0;
    engine.state.leave_requested = false;
    engine.demolished = false;
    engine.cues.clear();

    let index = engine.state.cave_index;
    tracing::info!(cave = index, lives = engine.state.info.lives, "new game");
    go_to_cave(engine, index);
    engine.set_phase(Phase::EnterCave);
}

/// Switches the live cave, saving progress on every fourth cave of big packs.
pub(super) fn go_to_cave(engine: &mut EngineCore, index: usize) {
    let count = engine.pack.cave_count();
    if index != engine.state.cave_index && (count <= 4 || index & 3 == 0) {
        let key = save_key(count);
        engine.store.save(&key, &encode_save(index));
        tracing::debug!(key = %key, cave = index, "progress saved");
    }

    engine.state.set_player_pos(None);
    engine.state.cave_index = index;
    let glyph = if count > 4 { index >> 2 } else { index };
    engine.wall_glyph = 0x40 | (glyph & 0x3F) as u8;

    engine.state.counter = 0;
    engine.state.no_fire_timer = 0;
    engine.state.flash_timer = 0;
    engine.state.demolish_timer = 0;
    engine.tick7 = 0;
    engine.tick4 = 0;
    engine.mark_all_dirty();
    tracing::info!(cave = index, caves = count, "cave selected");
}

/// Last cave left: the session is over and the slot starts fresh.
pub(super) fn finish(engine: &mut EngineCore) {
    let count = engine.pack.cave_count();
    engine.store.delete(&save_key(count));
    engine.state.cave_index = 0;
    engine.set_phase(Phase::Complete);
    tracing::info!(score = engine.state.info.score, caves = count, "all caves cleared");
}
