//! WeaponBehavior - fixed, rotating and moving cannons, lasers and blasters.

use super::common::{bullet_for, crossing_beam, fire_blast, fire_bullet_beam, step};
use super::{Behavior, UpdateContext};
use crate::domain::input::Direction;
use crate::domain::sound::SoundCue;
use crate::elements::*;

/// Out of 256: chance of a fixed gun firing on a pass.
const FIRE_ODDS: u32 = 18;

pub struct WeaponBehavior;

impl WeaponBehavior {
    pub fn new() -> Self {
        Self
    }

    /// Fixed cannons and lasers: 18 in 256 to fire.
    fn shoot(
        &self,
        ctx: &mut UpdateContext,
        loud: bool,
        from: isize,
        delta: isize,
        fire: ElementCode,
        passable: Option<ElementCode>,
    ) -> bool {
        if ctx.random(256) >= FIRE_ODDS {
            return false;
        }
        if loud {
            ctx.cue(SoundCue::Shoot);
        }
        fire_bullet_beam(ctx, from + delta, Some(fire), passable)
    }

    fn cannon(&self, ctx: &mut UpdateContext, dir: Direction) -> bool {
        let delta = step(dir, ctx.row());
        let bullet = guard_forward(bullet_for(dir), delta);
        let from = ctx.here();
        self.shoot(ctx, true, from, delta, bullet, Some(crossing_beam(dir)))
    }

    fn laser(&self, ctx: &mut UpdateContext, dir: Direction) -> bool {
        let delta = step(dir, ctx.row());
        let head = match dir {
            Direction::Up => EL_BEAM_UP,
            Direction::Down => EL_BEAM_DN,
            Direction::Left => EL_BEAM_LT,
            Direction::Right | Direction::None => EL_BEAM_RT,
        };
        let from = ctx.here();
        self.shoot(ctx, false, from, delta, guard_forward(head, delta), None)
    }

    /// Turns a quarter on every fourth counter value with odds 1 in 4,
    /// otherwise fires silently with odds 1 in 8.
    fn rotating(&self, ctx: &mut UpdateContext, dir: Direction) -> bool {
        let (clockwise, anticlockwise) = match dir {
            Direction::Up => (EL_CANNON_ROT_RT, EL_CANNON_ROT_LT),
            Direction::Down => (EL_CANNON_ROT_LT, EL_CANNON_ROT_RT),
            Direction::Left => (EL_CANNON_ROT_UP, EL_CANNON_ROT_DN),
            Direction::Right | Direction::None => (EL_CANNON_ROT_DN, EL_CANNON_ROT_UP),
        };
        let from = ctx.here();
        if ctx.state.counter & 3 != 0 || ctx.random(4) != 0 {
            if ctx.random(8) != 0 {
                return false;
            }
            let delta = step(dir, ctx.row());
            let bullet = guard_forward(bullet_for(dir), delta);
            return fire_bullet_beam(ctx, from + delta, Some(bullet), Some(crossing_beam(dir)));
        }
        let turned = if ctx.random(2) != 0 { clockwise } else { anticlockwise };
        ctx.set(from, turned);
        true
    }

    /// Steps (or turns around) on odd counter values; may fire upwards every pass.
    fn moving(&self, ctx: &mut UpdateContext) -> bool {
        let (delta, turnover) = if ctx.code == EL_CANNON_MOV_RT {
            (1, EL_CANNON_MOV_LT)
        } else {
            (-1, EL_CANNON_MOV_RT)
        };
        let mut tile = ctx.here();
        let mut changed = ctx.state.counter & 1 != 0;
        if changed {
            if ctx.get(tile + delta) == EL_SPACE {
                ctx.set(tile, EL_SPACE);
                tile += delta;
                ctx.set(tile, guard_forward(ctx.code, delta));
            } else {
                ctx.set(tile, turnover);
            }
        }
        let up = -ctx.row();
        if self.shoot(ctx, true, tile, up, EL_BULLET_UP, Some(EL_BEAM_H)) {
            changed = true;
        }
        changed
    }

    fn blaster(&self, ctx: &mut UpdateContext, dir: Direction) -> bool {
        if ctx.random(256) >= FIRE_ODDS {
            return false;
        }
        let delta = step(dir, ctx.row());
        let blast = match dir {
            Direction::Up => EL_BLAST_UP,
            Direction::Down => EL_BLAST_DN,
            Direction::Left => EL_BLAST_LT,
            Direction::Right | Direction::None => EL_BLAST_RT,
        };
        let target = ctx.here() + delta;
        fire_blast(ctx, target, guard_forward(blast, delta))
    }
}

impl Behavior for WeaponBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool {
        use Direction::*;
        match ctx.code {
            EL_CANNON_UP => self.cannon(ctx, Up),
            EL_CANNON_DN => self.cannon(ctx, Down),
            EL_CANNON_LT => self.cannon(ctx, Left),
            EL_CANNON_RT => self.cannon(ctx, Right),
            EL_CANNON_ROT_UP => self.rotating(ctx, Up),
            EL_CANNON_ROT_DN => self.rotating(ctx, Down),
            EL_CANNON_ROT_LT => self.rotating(ctx, Left),
            EL_CANNON_ROT_RT => self.rotating(ctx, Right),
            EL_CANNON_MOV_LT | EL_CANNON_MOV_RT => self.moving(ctx),
            EL_LASER_UP => self.laser(ctx, Up),
            EL_LASER_DN => self.laser(ctx, Down),
            EL_LASER_LT => self.laser(ctx, Left),
            EL_LASER_RT => self.laser(ctx, Right),
            EL_BLASTER_UP => self.blaster(ctx, Up),
            EL_BLASTER_DN => self.blaster(ctx, Down),
            EL_BLASTER_LT => self.blaster(ctx, Left),
            EL_BLASTER_RT => self.blaster(ctx, Right),
            _ => false,
        }
    }
}

impl Default for WeaponBehavior {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::*;

    #[test]
    fn cannon_fires_only_below_the_odds() {
        let mut bench = Bench::new().with_rng(vec![18]);
        bench.put(2, 2, EL_CANNON_RT);
        assert!(!bench.run(2, 2));
        assert_eq!(bench.at(3, 2), EL_SPACE);

        let mut bench = Bench::new().with_rng(vec![17]);
        bench.put(2, 2, EL_CANNON_RT);
        assert!(bench.run(2, 2));
        assert_eq!(bench.at(3, 2), EL_BULLET_RT | PROCESSED_BIT);
        assert_eq!(bench.cues, vec![SoundCue::Shoot]);
    }

    #[test]
    fn vertical_shot_passes_a_horizontal_beam() {
        let mut bench = Bench::new().with_rng(vec![0]);
        bench.put(2, 2, EL_CANNON_UP);
        bench.put(2, 1, EL_BEAM_H);
        assert!(bench.run(2, 2));
        assert_eq!(bench.at(2, 1), EL_BULLET_UP);
    }

    #[test]
    fn laser_is_silent() {
        let mut bench = Bench::new().with_rng(vec![0]);
        bench.put(2, 2, EL_LASER_LT);
        assert!(bench.run(2, 2));
        assert_eq!(bench.at(1, 2), EL_BEAM_LT);
        assert!(bench.cues.is_empty());
    }

    #[test]
    fn rotating_cannon_only_draws_the_turn_on_quarter_counts() {
        // counter 1: no turn draw, fire draw 0 shoots
        let mut bench = Bench::new().with_rng(vec![0]);
        bench.state.counter = 1;
        bench.put(2, 2, EL_CANNON_ROT_DN);
        assert!(bench.run(2, 2));
        assert_eq!(bench.at(2, 3), EL_BULLET_DN | PROCESSED_BIT);
        assert_eq!(bench.rng.draws(), 1);

        // counter 4: turn draw 0, side draw 1 turns clockwise
        let mut bench = Bench::new().with_rng(vec![0, 1]);
        bench.state.counter = 4;
        bench.put(2, 2, EL_CANNON_ROT_UP);
        assert!(bench.run(2, 2));
        assert_eq!(bench.at(2, 2), EL_CANNON_ROT_RT);
    }

    #[test]
    fn moving_cannon_bounces_on_odd_counts() {
        let mut bench = Bench::new().with_rng(vec![255]);
        bench.state.counter = 1;
        bench.put(2, 2, EL_CANNON_MOV_RT);
        assert!(bench.run(2, 2));
        assert_eq!(bench.at(3, 2), EL_CANNON_MOV_RT | PROCESSED_BIT);

        bench.put(2, 2, EL_CANNON_MOV_RT);
        bench.put(3, 2, EL_BOX);
        assert!(bench.run(2, 2));
        assert_eq!(bench.at(2, 2), EL_CANNON_MOV_LT);

        bench.state.counter = 2;
        assert!(!bench.run(2, 2));
    }

    #[test]
    fn blaster_blast_ignites_a_bomb() {
        let mut bench = Bench::new().with_rng(vec![3]);
        bench.put(2, 2, EL_BLASTER_DN);
        bench.put(2, 3, EL_BOMB);
        assert!(bench.run(2, 2));
        assert_eq!(bench.at(2, 3), EL_ANIM_BOMB);
    }
}
