//! Shared helpers: headings, shots, blasts and creature stepping.

use super::UpdateContext;
use crate::domain::input::Direction;
use crate::domain::sound::SoundCue;
use crate::elements::*;

/// Index delta of one step in `dir`; 0 for `Direction::None`.
#[inline]
pub fn step(dir: Direction, row: isize) -> isize {
    match dir {
        Direction::Up => -row,
        Direction::Down => row,
        Direction::Left => -1,
        Direction::Right => 1,
        Direction::None => 0,
    }
}

#[inline]
pub fn bullet_for(dir: Direction) -> ElementCode {
    match dir {
        Direction::Up => EL_BULLET_UP,
        Direction::Down => EL_BULLET_DN,
        Direction::Left => EL_BULLET_LT,
        Direction::Right | Direction::None => EL_BULLET_RT,
    }
}

/// Beam body a shot fired in `dir` may overwrite as if it were space.
#[inline]
pub fn crossing_beam(dir: Direction) -> ElementCode {
    match dir {
        Direction::Up | Direction::Down => EL_BEAM_H,
        _ => EL_BEAM_V,
    }
}

/// Beam body laid along `dir`.
#[inline]
pub fn beam_body(dir: Direction) -> ElementCode {
    match dir {
        Direction::Up | Direction::Down => EL_BEAM_V,
        _ => EL_BEAM_H,
    }
}

#[inline]
pub fn opposite(dir: Direction) -> Direction {
    match dir {
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
        Direction::None => Direction::None,
    }
}

/// Puts a shot into `target`, or hits whatever stands there.
///
/// With `fire` set, space (and `passable`, when given) is overwritten by the
/// shot. Otherwise shootable occupants are hit: bombs ignite, question marks
/// resolve, anything else disappears. Returns false with a tap when the
/// occupant cannot be shot.
pub fn fire_bullet_beam(
    ctx: &mut UpdateContext,
    target: isize,
    fire: Option<ElementCode>,
    passable: Option<ElementCode>,
) -> bool {
    let elem = ctx.get(target);
    if let Some(fire) = fire {
        if elem == EL_SPACE || Some(elem) == passable {
            ctx.set(target, fire);
            return true;
        }
    }
    if !ctx.is_shootable(elem) {
        ctx.cue(SoundCue::Tap);
        return false;
    }
    match elem {
        EL_BOMB => ctx.set(target, EL_ANIM_BOMB),
        EL_QUESTION => question_shot(ctx, target),
        _ => {
            ctx.cue(SoundCue::Shot);
            ctx.set(target, EL_ANIM_DISAPPEAR_A);
        }
    }
    true
}

/// Sends a blast into `target` when it is space or shootable.
pub fn fire_blast(ctx: &mut UpdateContext, target: isize, fire: ElementCode) -> bool {
    let elem = ctx.get(target);
    if elem == EL_SPACE || ctx.is_shootable(elem) {
        if blast_passes(ctx, target, elem) {
            ctx.set(target, fire);
        }
        return true;
    }
    false
}

/// A blast ignites a bomb and stops there (false); a question mark it hits
/// is swept away before it can resolve.
pub fn blast_passes(ctx: &mut UpdateContext, target: isize, elem: ElementCode) -> bool {
    if elem == EL_BOMB {
        ctx.set(target, EL_ANIM_BOMB);
        return false;
    }
    if elem == EL_QUESTION {
        question_shot(ctx, target);
    }
    true
}

pub fn question_shot(ctx: &mut UpdateContext, target: isize) {
    ctx.cue(SoundCue::Shot);
    ctx.set(target, EL_ANIM_QUESTION);
}

/// Kills the player standing next to `from`.
pub fn kill_adjacent_player(ctx: &mut UpdateContext, from: isize) -> bool {
    let row = ctx.row();
    for delta in [-1, 1, -row, row] {
        let tile = from + delta;
        if ctx.get(tile) == EL_PLAYER {
            ctx.cue(SoundCue::Shot);
            ctx.set(tile, EL_ANIM_DISAPPEAR_A);
            return true;
        }
    }
    false
}

/// One candidate of a creature step; `delta == 0` changes the code in place.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub delta: isize,
    pub code: ElementCode,
}

impl Move {
    #[inline]
    pub fn to(delta: isize, code: ElementCode) -> Self {
        Self { delta, code }
    }

    #[inline]
    pub fn stay(code: ElementCode) -> Self {
        Self { delta: 0, code }
    }
}

/// Takes the first candidate whose target is space (a stay always matches).
/// Neighbors of the start and of the destination are checked for the player.
/// With `shoots`, fires downwards one time in eight afterwards.
pub fn creature_move(ctx: &mut UpdateContext, from: isize, moves: &[Move], shoots: bool) -> bool {
    kill_adjacent_player(ctx, from);
    let mut changed = false;
    let mut tile = from;
    for m in moves {
        if m.delta != 0 && ctx.get(from + m.delta) != EL_SPACE {
            continue;
        }
        if m.delta != 0 {
            ctx.set(tile, EL_SPACE);
            tile += m.delta;
            ctx.set(tile, guard_forward(m.code, m.delta));
            kill_adjacent_player(ctx, tile);
        } else {
            ctx.set(tile, m.code);
        }
        changed = true;
        break;
    }
    if shoots && ctx.random(8) == 0 {
        let below = tile + ctx.row();
        if fire_bullet_beam(ctx, below, Some(EL_BULLET_DN | PROCESSED_BIT), Some(EL_BEAM_H)) {
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::*;

    #[test]
    fn unshootable_target_taps() {
        let mut bench = Bench::new();
        bench.put(1, 1, EL_BULLET_RT);
        bench.put(2, 1, EL_KEY);
        bench.run(1, 1);
        assert_eq!(bench.at(2, 1), EL_KEY);
        assert_eq!(bench.at(1, 1), EL_ANIM_DISAPPEAR_F);
        assert_eq!(bench.cues, vec![SoundCue::Tap]);
    }

    #[test]
    fn crossing_beams_count_as_space_for_shots() {
        assert_eq!(crossing_beam(Direction::Up), EL_BEAM_H);
        assert_eq!(beam_body(Direction::Up), EL_BEAM_V);
        assert_eq!(step(Direction::Down, 16), 16);
        assert_eq!(opposite(Direction::Left), Direction::Right);
    }
}
