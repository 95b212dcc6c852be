//! PlayerBehavior - the controlled player, the landing ship and the
//! transitional animations that keep the player counted as alive.

use super::common::{bullet_for, crossing_beam, fire_bullet_beam, step};
use super::{Behavior, UpdateContext};
use crate::domain::input::{Command, Direction};
use crate::domain::sound::SoundCue;
use crate::elements::*;

/// Player looks per facing; bit 4 selects the walking frame.
pub const LOOK_RIGHT: u8 = 0x04;
pub const LOOK_LEFT: u8 = 0x05;
pub const LOOK_DOWN: u8 = 0x06;
pub const LOOK_UP: u8 = 0x07;
pub const WALK_FRAME_BIT: u8 = 0x10;

const MAX_AMMO: u32 = 99;
const AMMO_PACK: u32 = 9;

const SCORE_KEY: u32 = 75;
const SCORE_DOOR: u32 = 100;
const SCORE_SCREW: u32 = 100;
const SCORE_SPARE_SCREW: u32 = 250;
const SCORE_SHIP: u32 = 1000;
const SCORE_AMMO: u32 = 50;
const SCORE_LIFE: u32 = 200;

pub struct PlayerBehavior;

impl PlayerBehavior {
    pub fn new() -> Self {
        Self
    }

    fn control(&self, ctx: &mut UpdateContext) -> bool {
        ctx.state.player_alive = true;
        ctx.state.player_move = 0;
        ctx.state.no_fire_timer = ctx.state.no_fire_timer.saturating_sub(1);

        let event = ctx.events.poll();
        match event.command {
            Command::Nop => return false,
            Command::Suicide => {
                // postpones the demolition while held
                ctx.state.demolish_timer = ctx.settings.demolish_ticks;
                return false;
            }
            _ => {}
        }
        if event.dir == Direction::None {
            return false;
        }
        let fire = event.command == Command::Fire;
        let go = event.command != Command::Turn;
        move_player(ctx, event.dir, go, fire)
    }

    /// Player still inside the ship waits for the scroll to settle.
    fn land(&self, ctx: &mut UpdateContext) -> bool {
        ctx.state.player_alive = true;
        if !ctx.state.scroll.settled() {
            return false;
        }
        ctx.cue(SoundCue::Enter);
        let here = ctx.here();
        ctx.set(here, EL_ANIM_PLAYER_LAND);
        ctx.events.poll();
        true
    }

    fn confirm_alive(&self, ctx: &mut UpdateContext) -> bool {
        ctx.state.player_alive = true;
        // drop an event queued while the player could not act
        ctx.events.poll();
        false
    }
}

impl Behavior for PlayerBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool {
        match ctx.code {
            EL_PLAYER => self.control(ctx),
            EL_PLAYER_IN_SHIP => self.land(ctx),
            _ => self.confirm_alive(ctx),
        }
    }
}

impl Default for PlayerBehavior {
    fn default() -> Self {
        Self::new()
    }
}

fn look_for(dir: Direction) -> u8 {
    match dir {
        Direction::Up => LOOK_UP,
        Direction::Left => LOOK_LEFT,
        Direction::Right => LOOK_RIGHT,
        Direction::Down | Direction::None => LOOK_DOWN,
    }
}

fn inert_for(dir: Direction) -> ElementCode {
    match dir {
        Direction::Up => EL_INERT_BOX_UP,
        Direction::Down => EL_INERT_BOX_DN,
        Direction::Left => EL_INERT_BOX_LT,
        Direction::Right | Direction::None => EL_INERT_BOX_RT,
    }
}

/// Turns, shoots, walks or interacts in `dir`.
fn move_player(ctx: &mut UpdateContext, dir: Direction, go: bool, fire: bool) -> bool {
    if fire && ctx.state.no_fire_timer > 0 {
        return false;
    }
    ctx.state.player_look = (ctx.state.player_look & WALK_FRAME_BIT) | look_for(dir);
    if !go {
        return false;
    }

    let delta = step(dir, ctx.row());
    let from = ctx.here();
    let target = from + delta;

    if fire {
        if ctx.state.info.ammo == 0 {
            // marching on the spot
            ctx.state.player_move = delta;
            return false;
        }
        ctx.state.no_fire_timer = ctx.settings.fire_cooldown;
        ctx.state.info.ammo -= 1;
        ctx.cue(SoundCue::Shoot);
        let bullet = guard_forward(bullet_for(dir), delta);
        return fire_bullet_beam(ctx, target, Some(bullet), Some(crossing_beam(dir)));
    }

    let there = ctx.get(target);
    let mut placed = guard_forward(EL_PLAYER, delta);

    let passable = there == EL_SPACE || push(ctx, target, delta, there, guard_forward(inert_for(dir), delta));
    if !passable {
        match there {
            _ if is_teleport(there) => {
                ctx.state.teleport = there;
                ctx.cue(SoundCue::Teleport);
                ctx.set(from, EL_ANIM_DISAPPEAR_D);
                ctx.set(target, there | PROCESSED_BIT);
                ctx.state.player_move = delta;
                return true;
            }
            EL_KEY => {
                ctx.state.info.keys += 1;
                ctx.state.info.score += SCORE_KEY;
                ctx.cue(SoundCue::Key);
            }
            EL_DOOR_H | EL_DOOR_V => {
                if ctx.state.info.keys > 0 {
                    ctx.state.info.keys -= 1;
                    ctx.state.info.score += SCORE_DOOR;
                    ctx.cue(SoundCue::Door);
                    ctx.set(target, EL_ANIM_DOOR_OPEN);
                }
                return true;
            }
            EL_SCREW => {
                if ctx.state.info.screws > 0 {
                    ctx.state.info.screws -= 1;
                    ctx.state.info.score += SCORE_SCREW;
                } else {
                    ctx.state.info.score += SCORE_SPARE_SCREW;
                }
                ctx.cue(SoundCue::Screw);
            }
            EL_SHIP_ACTIVE | EL_SHIP_ACTIVE_ALT => {
                // the blinking ship stays on the board
                placed = there;
                ctx.state.info.score += SCORE_SHIP;
                ctx.cue(SoundCue::Leave);
                ctx.state.leave_requested = true;
            }
            EL_AMMO => {
                ctx.state.info.ammo = (ctx.state.info.ammo + AMMO_PACK).min(MAX_AMMO);
                ctx.state.info.score += SCORE_AMMO;
                ctx.cue(SoundCue::Ammo);
            }
            EL_LIFE => {
                ctx.state.info.lives += 1;
                ctx.state.info.score += SCORE_LIFE;
                ctx.state.life_collected_at = Some(ctx.state.cave_index);
                ctx.cue(SoundCue::Life);
            }
            _ => return true,
        }
    }

    ctx.set(from, EL_SPACE);
    ctx.set(target, placed);
    ctx.state.set_player_pos(Some(target as usize));

    let row = ctx.row();
    for side in [-row, row, -1, 1] {
        if is_creature(ctx.get(target + side)) {
            ctx.cue(SoundCue::Shot);
            ctx.set(target, EL_ANIM_DISAPPEAR_A);
            return true;
        }
    }

    let mut right = target + 1;
    while ctx.get(right) == EL_SPACE {
        right += 1;
    }
    if ctx.get(right) == EL_MAGNET_RT {
        ctx.set(target, EL_PLAYER_ATTRACTED_RT | PROCESSED_BIT);
        ctx.cue(SoundCue::Magnet);
    } else {
        ctx.cue(SoundCue::Stamp);
    }
    ctx.state.player_move = delta;
    true
}

/// Shoves a pushable element at `target` one step further if there is room.
/// The caller overwrites `target` on success.
fn push(ctx: &mut UpdateContext, target: isize, delta: isize, there: ElementCode, inert: ElementCode) -> bool {
    if !is_pushable(there) {
        return false;
    }
    let beyond = target + delta;
    if ctx.get(beyond) != EL_SPACE {
        return false;
    }
    ctx.set(beyond, if there == EL_INERT_BOX { inert } else { there });
    ctx.cue(SoundCue::Push);
    true
}
