use crate::behaviors::WALK_FRAME_BIT;

use super::{demolish, streaming};
use super::{EngineCore, Phase, PerfTimer, TickOutcome};

/// One tick: counters, flash, demolish countdown, scroll, then the phase work.
pub(super) fn tick(engine: &mut EngineCore, frames: u32) -> TickOutcome {
    if engine.perf_enabled {
        engine.perf_stats.reset();
    }
    let timer = PerfTimer::start_if(engine.perf_enabled);
    engine.redraw = false;

    if matches!(engine.phase, Phase::Invalid | Phase::Complete) {
        return TickOutcome::Continue;
    }
    let cues_before = engine.cues.len();

    let mut redraw = advance_counters(engine);

    if countdown_flash(engine) {
        redraw = true;
    }

    let (demolish_redraw, mut outcome) = demolish::countdown(engine);
    if demolish_redraw {
        redraw = true;
    }

    if let Some((top, height)) = engine.state.scroll.advance(frames) {
        engine.mark_rows_dirty(top, height);
        redraw = true;
    }

    match engine.phase {
        Phase::EnterCave | Phase::LeaveCave => {
            engine.tick4 = (engine.tick4 + 1) % engine.settings.reveal_every;
            if engine.tick4 == 0 {
                if engine.draw_x > 0 {
                    engine.draw_x -= 1;
                    engine.stream_column();
                } else {
                    outcome = streaming::finish_sweep(engine);
                }
                redraw = true;
            }
        }
        Phase::Play => {
            if engine.tick7 == 0 && engine.run_pass() {
                redraw = true;
            }
        }
        Phase::Invalid | Phase::Complete => {}
    }

    engine.redraw = redraw;
    if let Some(timer) = timer {
        engine.perf_stats.cues = engine.cues.len().saturating_sub(cues_before) as u32;
        engine.perf_stats.tick_ms = timer.elapsed_ms();
    }
    outcome
}

/// Pass-cadence counter; on wrap flips the walking frame and bumps the
/// world counter. Returns whether the frame needs repainting.
fn advance_counters(engine: &mut EngineCore) -> bool {
    engine.tick7 += 1;
    if engine.tick7 < engine.settings.pass_every {
        return false;
    }
    engine.tick7 = 0;

    let state = &mut engine.state;
    let mut redraw = false;
    if state.player_move != 0 && state.teleport == 0 {
        state.player_look ^= WALK_FRAME_BIT;
        redraw = true;
    }
    state.counter += 1;
    // animation frames advance on every other count
    if state.counter & 1 == 0 {
        redraw = true;
    }
    state.counter &= 0xFF;
    redraw
}

fn countdown_flash(engine: &mut EngineCore) -> bool {
    if engine.state.flash_timer == 0 {
        return false;
    }
    engine.state.flash_timer -= 1;
    if engine.state.flash_timer > 0 {
        return false;
    }
    engine.mark_all_dirty();
    true
}
