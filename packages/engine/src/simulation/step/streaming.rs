use super::session;
use super::{EngineCore, Phase, TickOutcome};

/// Reveals (entering) or erases (leaving) column `draw_x`.
pub(super) fn stream_column(engine: &mut EngineCore) {
    let x = engine.draw_x;
    match engine.phase {
        Phase::EnterCave => {
            let life_taken = engine.state.life_taken_here();
            let template = engine.pack.cave(engine.state.cave_index);
            let load = engine.grid.load_column(x, &template, life_taken);
            if let Some(tile) = load.player {
                engine.state.set_player_pos(Some(tile));
            }
        }
        Phase::LeaveCave => engine.grid.clear_column(x),
        Phase::Invalid | Phase::Play | Phase::Complete => return,
    }
    if engine.perf_enabled {
        engine.perf_stats.columns_streamed += 1;
    }
}

/// Phase transition once every column has been streamed.
pub(super) fn finish_sweep(engine: &mut EngineCore) -> TickOutcome {
    match engine.phase {
        Phase::EnterCave => {
            tracing::info!(cave = engine.state.cave_index, screws = engine.state.info.screws, "cave entered");
            engine.set_phase(Phase::Play);
            TickOutcome::Continue
        }
        Phase::LeaveCave => {
            let next = engine.state.cave_index + 1;
            if next < engine.pack.cave_count() {
                engine.go_to_cave(next);
                engine.set_phase(Phase::EnterCave);
                TickOutcome::Continue
            } else {
                session::finish(engine);
                TickOutcome::Advance
            }
        }
        Phase::Invalid | Phase::Play | Phase::Complete => TickOutcome::Continue,
    }
}
