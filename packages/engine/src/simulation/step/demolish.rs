use crate::domain::sound::SoundCue;
use crate::elements::{CODE_MASK, DEMOLISH_SURVIVORS, EL_ANIM_DISAPPEAR_A};

use super::{EngineCore, Phase, TickOutcome};

/// Demolish countdown. The first expiry blows the cave up and rearms the
/// timer; the second costs a life and re-enters the cave, or ends the
/// session when none are left.
pub(super) fn countdown(engine: &mut EngineCore) -> (bool, TickOutcome) {
    if engine.state.demolish_timer == 0 {
        return (false, TickOutcome::Continue);
    }
    engine.state.demolish_timer -= 1;
    if engine.state.demolish_timer > 0 {
        return (false, TickOutcome::Continue);
    }

    let mut redraw = false;
    let mut outcome = TickOutcome::Continue;
    if engine.demolished {
        let cave = engine.state.cave_index;
        engine.state.info.lives = engine.state.info.lives.saturating_sub(1);
        if engine.state.info.lives > 0 {
            tracing::info!(cave, lives = engine.state.info.lives, "cave restarts");
            engine.set_phase(Phase::EnterCave);
        } else {
            tracing::info!(cave, score = engine.state.info.score, "out of lives");
            engine.set_phase(Phase::Invalid);
            outcome = TickOutcome::Regress;
        }
    } else {
        redraw = engine.demolish_cave();
        engine.state.demolish_timer = engine.settings.demolish_ticks;
    }
    engine.demolished = !engine.demolished;
    (redraw, outcome)
}

/// Turns everything but the background and barrier posts into debris.
pub(super) fn demolish_cave(engine: &mut EngineCore) -> bool {
    let mut changed = false;
    for tile in 0..engine.grid.size() {
        if DEMOLISH_SURVIVORS.contains(&(engine.grid.tiles[tile] & CODE_MASK)) {
            continue;
        }
        engine.grid.tiles[tile] = EL_ANIM_DISAPPEAR_A + engine.rng.below(4) as u8;
        changed = true;
    }
    engine.cues.push(SoundCue::BlowUp);
    // a pending teleport would bring the player back
    engine.state.teleport = 0;
    tracing::debug!(cave = engine.state.cave_index, changed, "cave demolished");
    changed
}
