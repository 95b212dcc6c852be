use std::sync::Arc;

use crate::behaviors::BehaviorRegistry;
use crate::core::XorShift32;
use crate::domain::config::EngineSettings;
use crate::domain::content::{LevelPack, CAVE_HEIGHT, CAVE_TILES, CAVE_WIDTH};
use crate::domain::input::ControlLatch;
use crate::domain::state::PlayState;
use crate::grid::Grid;

use super::perf_stats::PerfStats;
use super::render_extract::{VISUAL_BLANK, VISUAL_DIRTY};
use super::session::{self, SaveStore};
use super::{EngineCore, Phase, RenderBuffers};

pub(super) fn create_engine_core(
    pack: LevelPack,
    settings: EngineSettings,
    store: Box<dyn SaveStore>,
) -> EngineCore {
    let settings = settings.sanitized();
    let mut core = EngineCore {
        pack: Arc::new(pack),
        grid: Grid::new(CAVE_WIDTH, CAVE_HEIGHT),
        behaviors: BehaviorRegistry::new(),
        rng: Box::new(XorShift32::new(settings.seed)),
        settings,
        state: PlayState::new(CAVE_WIDTH, CAVE_HEIGHT),
        input: Box::new(ControlLatch::new()),
        store,
        cues: Vec::with_capacity(16),

        phase: Phase::Invalid,
        draw_x: 0,
        tick7: 0,
        tick4: 0,
        demolished: false,
        wall_glyph: 0x40,
        redraw: false,

        render: RenderBuffers {
            drawn: vec![VISUAL_DIRTY; CAVE_TILES],
            visuals: vec![VISUAL_BLANK; CAVE_TILES],
            dirty_list: Vec::with_capacity(CAVE_TILES),
        },
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    };
    core.state.cave_index = session::load_saved_cave(core.store.as_ref(), core.pack.cave_count());
    core
}

pub(super) fn replace_pack(engine: &mut EngineCore, pack: LevelPack) {
    engine.pack = Arc::new(pack);
    engine.grid.fill(crate::elements::EL_COSMOS);
    engine.state = PlayState::new(CAVE_WIDTH, CAVE_HEIGHT);
    engine.state.cave_index = session::load_saved_cave(engine.store.as_ref(), engine.pack.cave_count());
    engine.cues.clear();
    engine.phase = Phase::Invalid;
    engine.mark_all_dirty();
    tracing::info!(caves = engine.pack.cave_count(), name = ?engine.pack.name(), "level pack replaced");
}
