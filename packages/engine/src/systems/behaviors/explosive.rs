//! ExplosiveBehavior - bomb blasts and resolving surprises.

use super::{Behavior, UpdateContext};
use crate::domain::sound::SoundCue;
use crate::elements::*;

const SCORE_JACKPOT: u32 = 500;

pub struct ExplosiveBehavior;

impl ExplosiveBehavior {
    pub fn new() -> Self {
        Self
    }

    /// Blows up the 3x3 block around the bomb. Walls survive, neighbours
    /// survive unless blowable, and neighbouring bombs go off in turn.
    fn explode(&self, ctx: &mut UpdateContext) -> bool {
        ctx.cue(SoundCue::BlowUp);
        let r = ctx.row();
        let center = ctx.here();
        let mut changed = false;
        for delta in [-r - 1, -r, -r + 1, -1, 0, 1, r - 1, r, r + 1] {
            let tile = center + delta;
            let elem = ctx.get(tile);
            if elem == EL_WALL {
                continue;
            }
            let blowable = ctx.table.entry(elem).map_or(false, |info| info.blowable);
            if delta != 0 && !blowable {
                continue;
            }
            let debris = if elem == EL_BOMB {
                EL_ANIM_BOMB | PROCESSED_BIT
            } else if delta == 0 {
                EL_ANIM_DISAPPEAR_C
            } else if delta.abs() == 1 || delta.abs() == r {
                EL_ANIM_DISAPPEAR_B
            } else {
                EL_ANIM_DISAPPEAR_A
            };
            ctx.set(tile, debris);
            changed = true;
        }
        changed
    }

    /// Draws one outcome from the surprise pool. Outcome 0 is the jackpot:
    /// magnets turn into walls, doors and most creatures vanish, and a life
    /// appears in place of the surprise.
    fn surprise(&self, ctx: &mut UpdateContext) -> bool {
        let draw = ctx.random(ctx.surprises.len() as u32) as usize;
        let mut outcome = ctx.surprises.get(draw).copied().unwrap_or(EL_SPACE);
        if outcome == 0 {
            for pos in (0..ctx.grid.size()).rev() {
                let elem = ctx.grid.tiles[pos] & CODE_MASK;
                let replacement = match elem {
                    EL_MAGNET_LT | EL_MAGNET_RT => EL_WALL,
                    EL_DOOR_H | EL_DOOR_V | EL_CREATURE_LH_UP..=EL_CREATURE_HV_DN => EL_ANIM_DISAPPEAR_A,
                    _ => continue,
                };
                ctx.grid.tiles[pos] = replacement;
            }
            ctx.state.info.score += SCORE_JACKPOT;
            ctx.cue(SoundCue::Launch);
            outcome = EL_LIFE;
        }
        let here = ctx.here();
        ctx.set(here, outcome);
        true
    }
}

impl Behavior for ExplosiveBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool {
        match ctx.code {
            EL_ANIM_BOMB => self.explode(ctx),
            EL_QUESTION_SURPRISE => self.surprise(ctx),
            _ => false,
        }
    }
}

impl Default for ExplosiveBehavior {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::*;

    #[test]
    fn blast_pattern_spares_walls_and_unblowables() {
        let mut bench = Bench::new();
        bench.put(3, 3, EL_ANIM_BOMB);
        bench.put(2, 2, EL_BOX);
        bench.put(3, 2, EL_KEY);
        bench.put(4, 2, EL_WALL);
        bench.put(2, 3, EL_BOMB);
        bench.put(4, 3, EL_SPACE);
        bench.put(3, 4, EL_BOX);
        bench.put(4, 4, EL_CREATURE_LH_UP);
        assert!(bench.run(3, 3));

        assert_eq!(bench.at(3, 3), EL_ANIM_DISAPPEAR_C);
        assert_eq!(bench.at(2, 2), EL_ANIM_DISAPPEAR_A);
        assert_eq!(bench.at(3, 2), EL_ANIM_DISAPPEAR_B);
        assert_eq!(bench.at(4, 2), EL_WALL);
        assert_eq!(bench.at(2, 3), EL_ANIM_BOMB | PROCESSED_BIT);
        assert_eq!(bench.at(4, 3), EL_SPACE);
        assert_eq!(bench.at(3, 4), EL_ANIM_DISAPPEAR_B);
        assert_eq!(bench.at(4, 4), EL_ANIM_DISAPPEAR_A);
        assert_eq!(bench.cues, vec![SoundCue::BlowUp]);
    }

    #[test]
    fn second_blast_on_the_same_debris_changes_nothing() {
        let mut bench = Bench::new();
        bench.put(3, 3, EL_ANIM_BOMB);
        for (x, y) in [(2, 2), (3, 2), (4, 2), (2, 3), (4, 3), (2, 4), (3, 4), (4, 4)] {
            bench.put(x, y, EL_BOX);
        }
        bench.run(3, 3);
        let after_first = bench.grid.tiles.clone();

        bench.put(3, 3, EL_ANIM_BOMB);
        bench.run(3, 3);
        assert_eq!(bench.grid.tiles, after_first);
    }

    #[test]
    fn surprise_resolves_to_the_drawn_outcome() {
        let mut bench = Bench::new().with_rng(vec![0]);
        bench.put(1, 1, EL_QUESTION_SURPRISE);
        assert!(bench.run(1, 1));
        assert_eq!(bench.at(1, 1), EL_KEY);
    }

    #[test]
    fn jackpot_clears_the_cave_and_grants_a_life() {
        let mut bench = Bench::new().with_rng(vec![31]);
        bench.put(1, 1, EL_QUESTION_SURPRISE);
        bench.put(5, 0, EL_MAGNET_LT);
        bench.put(6, 0, EL_DOOR_H | PROCESSED_BIT);
        bench.put(5, 5, EL_CREATURE_HV_DN);
        bench.put(6, 5, EL_CREATURE_HS_LT);
        bench.run(1, 1);

        assert_eq!(bench.at(1, 1), EL_LIFE);
        assert_eq!(bench.at(5, 0), EL_WALL);
        assert_eq!(bench.at(6, 0), EL_ANIM_DISAPPEAR_A);
        assert_eq!(bench.at(5, 5), EL_ANIM_DISAPPEAR_A);
        assert_eq!(bench.at(6, 5), EL_CREATURE_HS_LT);
        assert_eq!(bench.state.info.score, 500);
        assert_eq!(bench.cues, vec![SoundCue::Launch]);
    }
}
