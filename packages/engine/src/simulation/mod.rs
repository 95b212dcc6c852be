//! Cave engine - tick state machine around the world grid
//!
//! `EngineCore` only orchestrates: element rules live in `systems::behaviors`,
//! the per-tick sequence in `step/`, save slots and cave switching in
//! `session/`, and the presentation diff in `render/`.

use std::sync::Arc;

use crate::behaviors::{BehaviorRegistry, LOOK_DOWN};
use crate::core::RandomSource;
use crate::domain::config::EngineSettings;
use crate::domain::content::{LevelPack, PackError, PALETTE_BYTES};
use crate::domain::input::EventSource;
use crate::domain::sound::SoundCue;
use crate::domain::state::{InfoState, PlayState};
use crate::elements::ElementCode;
use crate::grid::Grid;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/tick.rs"]
mod tick;
#[path = "step/pass.rs"]
mod pass;
#[path = "step/demolish.rs"]
mod demolish;
#[path = "step/streaming.rs"]
mod streaming;
#[path = "session/session.rs"]
pub mod session;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::Engine;
pub use perf_stats::PerfStats;
pub use session::{MemoryStore, SaveStore};

use perf_timer::PerfTimer;

/// Engine phase. `Complete` is terminal until the next `new_game`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Invalid,
    EnterCave,
    Play,
    LeaveCave,
    Complete,
}

impl Phase {
    pub fn id(self) -> u8 {
        match self {
            Phase::Invalid => 0,
            Phase::EnterCave => 1,
            Phase::Play => 2,
            Phase::LeaveCave => 3,
            Phase::Complete => 4,
        }
    }
}

/// What the screen switcher should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Every cave of the pack is cleared.
    Advance,
    /// Out of lives.
    Regress,
}

impl TickOutcome {
    pub fn id(self) -> u8 {
        match self {
            TickOutcome::Continue => 0,
            TickOutcome::Advance => 1,
            TickOutcome::Regress => 2,
        }
    }
}

/// Last presented visual per tile plus the tiles that changed since.
struct RenderBuffers {
    drawn: Vec<u8>,
    visuals: Vec<u8>,
    dirty_list: Vec<u32>,
}

/// The simulation engine
pub struct EngineCore {
    pack: Arc<LevelPack>,
    grid: Grid,
    behaviors: BehaviorRegistry,
    settings: EngineSettings,
    state: PlayState,
    rng: Box<dyn RandomSource>,
    input: Box<dyn EventSource>,
    store: Box<dyn SaveStore>,
    cues: Vec<SoundCue>,

    // Tick machine
    phase: Phase,
    draw_x: u32,
    tick7: u32,
    tick4: u32,
    demolished: bool,
    wall_glyph: u8,
    redraw: bool,

    render: RenderBuffers,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl EngineCore {
    /// Engine with a seeded generator, a button latch and an in-memory save slot.
    pub fn new(pack: LevelPack, settings: EngineSettings) -> Self {
        init::create_engine_core(pack, settings, Box::new(MemoryStore::new()))
    }

    /// Same as [`EngineCore::new`] but persisting the cave index in `store`.
    pub fn with_store(pack: LevelPack, settings: EngineSettings, store: Box<dyn SaveStore>) -> Self {
        init::create_engine_core(pack, settings, store)
    }

    /// Replaces the level pack and drops back to `Invalid`.
    pub fn load_pack_bundle_json(&mut self, json: &str) -> Result<(), PackError> {
        let pack = LevelPack::from_bundle_json(json)?;
        init::replace_pack(self, pack);
        Ok(())
    }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn phase(&self) -> Phase { self.phase }

    pub fn cave_index(&self) -> usize { self.state.cave_index }

    pub fn cave_count(&self) -> usize { self.pack.cave_count() }

    pub fn info(&self) -> InfoState { self.state.info }

    pub fn state(&self) -> &PlayState { &self.state }

    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn pack(&self) -> &LevelPack { &self.pack }

    pub fn settings(&self) -> &EngineSettings { &self.settings }

    pub fn scroll_y(&self) -> i32 { self.state.scroll.y }

    /// True while the background flashes after the ship powered up.
    pub fn flash_active(&self) -> bool { self.state.flash_timer > 0 }

    /// True when the last tick changed anything worth presenting.
    pub fn redraw_requested(&self) -> bool { self.redraw }

    pub fn cave_colors(&self) -> [u8; PALETTE_BYTES] {
        self.pack.cave(self.state.cave_index).colors
    }

    pub fn save_store(&self) -> &dyn SaveStore { self.store.as_ref() }

    // === Session ===

    /// Resets the HUD and enters the saved cave.
    pub fn new_game(&mut self) {
        session::new_game(self);
    }

    /// Advances the engine by one tick. `frames` is the number of display
    /// frames elapsed and only affects the scroll speed.
    pub fn tick(&mut self, frames: u32) -> TickOutcome {
        tick::tick(self, frames)
    }

    /// Drains the sound cues fired since the last call, oldest first.
    pub fn take_sound_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    // === Input ===

    pub fn press(&mut self, button_id: u8) -> bool {
        commands::press(self, button_id)
    }

    pub fn release(&mut self, button_id: u8) -> bool {
        commands::release(self, button_id)
    }

    pub fn set_input(&mut self, input: Box<dyn EventSource>) {
        commands::set_input(self, input);
    }

    pub fn set_rng(&mut self, rng: Box<dyn RandomSource>) {
        commands::set_rng(self, rng);
    }

    // === Settings ===

    pub fn set_seed(&mut self, seed: u32) {
        settings::set_seed(self, seed);
    }

    pub fn apply_settings(&mut self, settings: EngineSettings) {
        settings::apply_settings(self, settings);
    }

    /// Enable or disable per-tick perf metrics
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === Presentation ===

    /// Visual code of `tile` for the current animation frame.
    pub fn visual_at(&self, tile: usize) -> Option<u8> {
        render_extract::visual_of(self, tile)
    }

    /// Diffs visuals against the last collected frame; returns the number of
    /// changed tiles, listed in `dirty_tiles()`.
    pub fn collect_dirty_tiles(&mut self) -> usize {
        render_extract::collect_dirty_tiles(self)
    }

    pub fn dirty_tiles(&self) -> &[u32] { &self.render.dirty_list }

    pub fn visuals(&self) -> &[u8] { &self.render.visuals }

    pub fn tiles_ptr(&self) -> *const ElementCode { self.grid.tiles_ptr() }

    pub fn visuals_ptr(&self) -> *const u8 { self.render.visuals.as_ptr() }

    pub fn dirty_list_ptr(&self) -> *const u32 { self.render.dirty_list.as_ptr() }
}

// Private tick-machine methods
impl EngineCore {
    /// Enters `phase`, resetting what the phase starts from.
    fn set_phase(&mut self, phase: Phase) {
        match phase {
            Phase::EnterCave | Phase::LeaveCave => {
                self.draw_x = self.grid.width();
                if phase == Phase::EnterCave {
                    let template = self.pack.cave(self.state.cave_index);
                    self.state.player_move = 0;
                    self.state.player_look = LOOK_DOWN;
                    self.state.info.cave = self.state.cave_index as u32 + 1;
                    self.state.info.screws = template.screws;
                    self.state.info.ammo = 0;
                    self.state.info.keys = 0;
                }
            }
            Phase::Play => self.demolished = false,
            Phase::Invalid | Phase::Complete => {}
        }
        tracing::debug!(?phase, cave = self.state.cave_index, "phase change");
        self.phase = phase;
    }

    fn go_to_cave(&mut self, index: usize) {
        session::go_to_cave(self, index);
    }

    fn run_pass(&mut self) -> bool {
        pass::run_pass(self)
    }

    fn demolish_cave(&mut self) -> bool {
        demolish::demolish_cave(self)
    }

    fn stream_column(&mut self) {
        streaming::stream_column(self);
    }

    fn mark_all_dirty(&mut self) {
        render_extract::mark_all_dirty(self);
    }

    fn mark_rows_dirty(&mut self, top_px: i32, height_px: i32) {
        render_extract::mark_rows_dirty(self, top_px, height_px);
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
