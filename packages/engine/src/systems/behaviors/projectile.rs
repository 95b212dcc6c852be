//! ProjectileBehavior - bullets, laser beams, blasts and sliding inert boxes.
//!
//! Each advances one tile per pass. Laser beams leave a body behind and come
//! back as a bullet once their head hits something; the bullets therefore
//! treat the beam body of their own axis as air.

use super::common::{beam_body, bullet_for, fire_blast, fire_bullet_beam, opposite, step};
use super::{Behavior, UpdateContext};
use crate::domain::input::Direction;
use crate::domain::sound::SoundCue;
use crate::elements::*;

pub struct ProjectileBehavior;

impl ProjectileBehavior {
    pub fn new() -> Self {
        Self
    }

    fn bullet(&self, ctx: &mut UpdateContext, dir: Direction) -> bool {
        let delta = step(dir, ctx.row());
        let fire = guard_forward(ctx.code, delta);
        let from = ctx.here();
        let target = from + delta;
        let elem = ctx.get(target);
        if elem == EL_SPACE {
            ctx.set(from, EL_SPACE);
            ctx.set(target, fire);
        } else {
            let left = if elem == EL_BEAM_V || elem == EL_BEAM_H { EL_SPACE } else { EL_ANIM_DISAPPEAR_F };
            ctx.set(from, left);
            fire_bullet_beam(ctx, target, Some(fire), Some(beam_body(dir)));
        }
        true
    }

    fn beam(&self, ctx: &mut UpdateContext, dir: Direction) -> bool {
        let delta = step(dir, ctx.row());
        let fire = guard_forward(ctx.code, delta);
        let from = ctx.here();
        let target = from + delta;
        if ctx.get(target) == EL_SPACE {
            ctx.set(from, beam_body(dir));
            ctx.set(target, fire);
        } else {
            ctx.set(from, bullet_for(opposite(dir)));
            fire_bullet_beam(ctx, target, Some(fire), None);
        }
        true
    }

    fn blast(&self, ctx: &mut UpdateContext, dir: Direction) -> bool {
        let delta = step(dir, ctx.row());
        let fire = guard_forward(ctx.code, delta);
        let from = ctx.here();
        let target = from + delta;
        if ctx.get(target) == EL_SPACE {
            ctx.set(target, fire);
        } else {
            fire_blast(ctx, target, fire);
        }
        ctx.set(from, EL_ANIM_DISAPPEAR_B);
        true
    }

    fn inert_box(&self, ctx: &mut UpdateContext, dir: Direction) -> bool {
        let delta = step(dir, ctx.row());
        let moving = guard_forward(ctx.code, delta);
        let from = ctx.here();
        let target = from + delta;
        if ctx.get(target) == EL_SPACE {
            ctx.set(from, EL_SPACE);
            ctx.set(target, moving);
            ctx.cue(SoundCue::Push);
        } else {
            ctx.set(from, EL_INERT_BOX);
            fire_bullet_beam(ctx, target, None, None);
        }
        true
    }
}

impl Behavior for ProjectileBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool {
        use Direction::*;
        match ctx.code {
            EL_BULLET_UP => self.bullet(ctx, Up),
            EL_BULLET_DN => self.bullet(ctx, Down),
            EL_BULLET_LT => self.bullet(ctx, Left),
            EL_BULLET_RT => self.bullet(ctx, Right),
            EL_BEAM_UP => self.beam(ctx, Up),
            EL_BEAM_DN => self.beam(ctx, Down),
            EL_BEAM_LT => self.beam(ctx, Left),
            EL_BEAM_RT => self.beam(ctx, Right),
            EL_BLAST_UP => self.blast(ctx, Up),
            EL_BLAST_DN => self.blast(ctx, Down),
            EL_BLAST_LT => self.blast(ctx, Left),
            EL_BLAST_RT => self.blast(ctx, Right),
            EL_INERT_BOX_UP => self.inert_box(ctx, Up),
            EL_INERT_BOX_DN => self.inert_box(ctx, Down),
            EL_INERT_BOX_LT => self.inert_box(ctx, Left),
            EL_INERT_BOX_RT => self.inert_box(ctx, Right),
            _ => false,
        }
    }
}

impl Default for ProjectileBehavior {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::*;

    #[test]
    fn bullet_flies_and_hits_a_creature() {
        let mut bench = Bench::new();
        bench.put(1, 1, EL_BULLET_LT);
        assert!(bench.run(1, 1));
        assert_eq!(bench.at(0, 1), EL_BULLET_LT);
        assert_eq!(bench.at(1, 1), EL_SPACE);

        bench.put(4, 4, EL_BULLET_DN);
        bench.put(4, 5, EL_CREATURE_HS_LT);
        bench.run(4, 4);
        assert_eq!(bench.at(4, 4), EL_ANIM_DISAPPEAR_F);
        assert_eq!(bench.at(4, 5), EL_ANIM_DISAPPEAR_A);
        assert_eq!(bench.cues, vec![SoundCue::Shot]);
    }

    #[test]
    fn returning_bullet_eats_the_beam_body() {
        let mut bench = Bench::new();
        bench.put(3, 2, EL_BULLET_RT);
        bench.put(4, 2, EL_BEAM_H);
        bench.run(3, 2);
        assert_eq!(bench.at(3, 2), EL_SPACE);
        assert_eq!(bench.at(4, 2), EL_BULLET_RT | PROCESSED_BIT);
    }

    #[test]
    fn beam_head_extends_then_turns_into_a_bullet() {
        let mut bench = Bench::new();
        bench.put(3, 3, EL_BEAM_UP);
        bench.run(3, 3);
        assert_eq!(bench.at(3, 2), EL_BEAM_UP);
        assert_eq!(bench.at(3, 3), EL_BEAM_V);

        bench.put(3, 1, EL_KEY);
        bench.run(3, 2);
        assert_eq!(bench.at(3, 2), EL_BULLET_DN);
        assert_eq!(bench.at(3, 1), EL_KEY);
        assert_eq!(bench.cues, vec![SoundCue::Tap]);
    }

    #[test]
    fn blast_leaves_smoke_behind() {
        let mut bench = Bench::new();
        bench.put(2, 2, EL_BLAST_RT);
        bench.run(2, 2);
        assert_eq!(bench.at(2, 2), EL_ANIM_DISAPPEAR_B);
        assert_eq!(bench.at(3, 2), EL_BLAST_RT | PROCESSED_BIT);
    }

    #[test]
    fn blast_sweeps_a_question_mark() {
        let mut bench = Bench::new();
        bench.put(2, 2, EL_BLAST_LT);
        bench.put(1, 2, EL_QUESTION);
        bench.run(2, 2);
        assert_eq!(bench.at(1, 2), EL_BLAST_LT);
        assert_eq!(bench.cues, vec![SoundCue::Shot]);
    }

    #[test]
    fn inert_box_slides_until_it_hits() {
        let mut bench = Bench::new();
        bench.put(2, 2, EL_INERT_BOX_RT);
        bench.run(2, 2);
        assert_eq!(bench.at(3, 2), EL_INERT_BOX_RT | PROCESSED_BIT);

        bench.put(3, 2, EL_INERT_BOX_RT);
        bench.put(4, 2, EL_BOMB);
        bench.run(3, 2);
        assert_eq!(bench.at(3, 2), EL_INERT_BOX);
        assert_eq!(bench.at(4, 2), EL_ANIM_BOMB);
    }
}
