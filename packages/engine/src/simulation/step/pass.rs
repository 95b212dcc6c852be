use crate::behaviors::UpdateContext;
use crate::elements::{CODE_MASK, EL_PLAYER_ATTRACTED_RT, PROCESSED_BIT};

use super::{EngineCore, Phase, PerfTimer};

/// One raster sweep over the cave.
///
/// A tile with a raw table entry runs its behavior and then takes its
/// ambient successor. A code without an entry but with the guard bit was
/// moved ahead of the cursor earlier in this sweep: it only loses the bit.
pub(super) fn run_pass(engine: &mut EngineCore) -> bool {
    let timer = PerfTimer::start_if(engine.perf_enabled);
    let pending_teleport = engine.state.teleport;
    let flash_before = engine.state.flash_timer;
    engine.state.player_alive = pending_teleport != 0;

    let mut changed = false;
    let mut teleport_seen = false;
    let mut calls = 0u32;
    let mut successors = 0u32;
    let mut clears = 0u32;

    let EngineCore { pack, grid, behaviors, settings, state, rng, input, cues, .. } = engine;
    let table = pack.table();
    let surprises = pack.surprises();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let tile = grid.index(x, y);
            let code = grid.tiles[tile];
            match table.entry(code) {
                Some(info) => {
                    if let Some(kind) = info.behavior {
                        calls += 1;
                        let mut ctx = UpdateContext {
                            grid: &mut *grid,
                            table,
                            surprises,
                            state: &mut *state,
                            settings: &*settings,
                            rng: &mut **rng,
                            events: &mut **input,
                            cues: &mut *cues,
                            tile,
                            code,
                            x,
                            y,
                        };
                        if behaviors.update(kind, &mut ctx) {
                            changed = true;
                        }
                    }
                    if let Some(next) = info.next {
                        grid.tiles[tile] = next;
                        successors += 1;
                        changed = true;
                    }
                }
                None if code & PROCESSED_BIT != 0 => {
                    clears += 1;
                    // the attracted player has no behavior on the frame it is pulled right
                    if grid.clear_guard(tile) == EL_PLAYER_ATTRACTED_RT {
                        state.player_alive = true;
                    }
                }
                None => {}
            }
            if pending_teleport != 0 && grid.tiles[tile] & CODE_MASK == pending_teleport {
                teleport_seen = true;
            }
        }
    }

    let cave = engine.state.cave_index;
    if pending_teleport != 0 && engine.state.teleport == pending_teleport && !teleport_seen {
        tracing::warn!(cave, teleport = pending_teleport, "no teleport left to exit from, player lost");
        engine.state.teleport = 0;
    }

    if !engine.state.player_alive && engine.state.teleport == 0 && engine.state.demolish_timer == 0 {
        engine.state.demolish_timer = engine.settings.demolish_ticks;
        tracing::debug!(cave, "player lost, demolish armed");
    }

    if flash_before == 0 && engine.state.flash_timer > 0 {
        engine.mark_all_dirty();
    }

    if std::mem::take(&mut engine.state.leave_requested) {
        tracing::info!(cave, score = engine.state.info.score, "leaving cave");
        engine.set_phase(Phase::LeaveCave);
    }

    if let Some(timer) = timer {
        let stats = &mut engine.perf_stats;
        stats.passes += 1;
        stats.behavior_calls += calls;
        stats.successor_writes += successors;
        stats.guard_clears += clears;
        stats.pass_ms += timer.elapsed_ms();
    }
    changed
}
