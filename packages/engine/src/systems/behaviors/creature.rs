//! CreatureBehavior - wall followers, bats, shooters and the eyes.
//!
//! Wall followers try to turn towards their hand first, then go straight,
//! and otherwise turn the other way on the spot. Bats shuttle along one
//! axis; shooters do the same horizontally and fire downwards at random.

use super::common::{creature_move, Move};
use super::{Behavior, UpdateContext};
use crate::elements::*;

pub struct CreatureBehavior;

impl CreatureBehavior {
    pub fn new() -> Self {
        Self
    }

    fn wander(&self, ctx: &mut UpdateContext) -> bool {
        let r = ctx.row();
        let me = ctx.code;
        let g = |code: ElementCode| code | PROCESSED_BIT;
        let (moves, count, shoots) = match me {
            EL_CREATURE_LH_UP => (
                [Move::to(-1, EL_CREATURE_LH_LT), Move::to(-r, me), Move::stay(EL_CREATURE_LH_RT)],
                3,
                false,
            ),
            EL_CREATURE_LH_DN => (
                [Move::to(1, g(EL_CREATURE_LH_RT)), Move::to(r, me), Move::stay(EL_CREATURE_LH_LT)],
                3,
                false,
            ),
            EL_CREATURE_LH_RT => (
                [Move::to(-r, EL_CREATURE_LH_UP), Move::to(1, me), Move::stay(EL_CREATURE_LH_DN)],
                3,
                false,
            ),
            EL_CREATURE_LH_LT => (
                [Move::to(r, g(EL_CREATURE_LH_DN)), Move::to(-1, me), Move::stay(EL_CREATURE_LH_UP)],
                3,
                false,
            ),
            EL_CREATURE_RH_DN => (
                [Move::to(-1, EL_CREATURE_RH_LT), Move::to(r, me), Move::stay(EL_CREATURE_RH_RT)],
                3,
                false,
            ),
            EL_CREATURE_RH_UP => (
                [Move::to(1, g(EL_CREATURE_RH_RT)), Move::to(-r, me), Move::stay(g(EL_CREATURE_RH_LT))],
                3,
                false,
            ),
            EL_CREATURE_RH_LT => (
                [Move::to(-r, EL_CREATURE_RH_UP), Move::to(-1, me), Move::stay(EL_CREATURE_RH_DN)],
                3,
                false,
            ),
            EL_CREATURE_RH_RT => (
                [Move::to(r, g(EL_CREATURE_RH_DN)), Move::to(1, me), Move::stay(EL_CREATURE_RH_UP)],
                3,
                false,
            ),
            EL_CREATURE_HV_LT => ([Move::to(-1, me), Move::stay(g(EL_CREATURE_HV_RT)), Move::stay(me)], 2, false),
            EL_CREATURE_HV_RT => ([Move::to(1, me), Move::stay(g(EL_CREATURE_HV_LT)), Move::stay(me)], 2, false),
            EL_CREATURE_HV_UP => ([Move::to(-r, me), Move::stay(g(EL_CREATURE_HV_DN)), Move::stay(me)], 2, false),
            EL_CREATURE_HV_DN => ([Move::to(r, me), Move::stay(g(EL_CREATURE_HV_UP)), Move::stay(me)], 2, false),
            EL_CREATURE_HS_LT => ([Move::to(-1, me), Move::stay(EL_CREATURE_HS_RT), Move::stay(me)], 2, true),
            EL_CREATURE_HS_RT => ([Move::to(1, me), Move::stay(EL_CREATURE_HS_LT), Move::stay(me)], 2, true),
            _ => return false,
        };
        let from = ctx.here();
        creature_move(ctx, from, &moves[..count], shoots)
    }

    /// Half of the time the eyes close in on the player (row first, then
    /// column); otherwise, or when that fails while already in the player's
    /// column, they try one of four directions, or rest (odds 4 in 8).
    fn stalk(&self, ctx: &mut UpdateContext) -> bool {
        let r = ctx.row();
        let me = ctx.code;
        let from = ctx.here();
        let (x, y) = (ctx.x as i32, ctx.y as i32);
        let (px, py) = (ctx.state.player.x, ctx.state.player.y);

        if ctx.random(2) != 0 {
            let mut moves = [Move::stay(me); 2];
            let mut count = 0;
            if y != py {
                moves[count] = Move::to(if y > py { -r } else { r }, me);
                count += 1;
            }
            if x != px {
                moves[count] = Move::to(if x > px { -1 } else { 1 }, me);
                count += 1;
            }
            let changed = creature_move(ctx, from, &moves[..count], false);
            if changed || x != px {
                return changed;
            }
        }

        match [-r, r, -1, 1].get(ctx.random(8) as usize) {
            Some(&delta) => creature_move(ctx, from, &[Move::to(delta, me)], false),
            None => false,
        }
    }
}

impl Behavior for CreatureBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool {
        if ctx.code == EL_EYES {
            self.stalk(ctx)
        } else {
            self.wander(ctx)
        }
    }
}

impl Default for CreatureBehavior {
    fn default() -> Self {
        Self::new()
    }
}
