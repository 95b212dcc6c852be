//! TransportBehavior - teleports and magnets moving the player around.

use super::{Behavior, UpdateContext};
use crate::domain::sound::SoundCue;
use crate::elements::*;

pub struct TransportBehavior;

impl TransportBehavior {
    pub fn new() -> Self {
        Self
    }

    /// Lets the pending player out of a teleport with the entry number,
    /// ahead in the direction of travel or, failing that, to either side and
    /// then back. Stays shut while all of them are blocked.
    fn teleport(&self, ctx: &mut UpdateContext) -> bool {
        if ctx.code != ctx.state.teleport {
            return false;
        }
        let r = ctx.row();
        let from = ctx.here();
        let travel = ctx.state.player_move;

        let mut exit = from + travel;
        if ctx.get(exit) != EL_SPACE {
            let fallbacks: [isize; 3] = match travel {
                t if t == -r => [1, -1, r],
                t if t == r => [-1, 1, -r],
                -1 => [r, -r, 1],
                1 => [-r, r, -1],
                _ => return false,
            };
            match fallbacks.iter().map(|d| from + d).find(|&t| ctx.get(t) == EL_SPACE) {
                Some(tile) => exit = tile,
                None => return false,
            }
        }

        ctx.set(exit, EL_ANIM_PLAYER_TELEPORT);
        ctx.state.set_player_pos(Some(exit as usize));
        ctx.state.teleport = 0;
        ctx.state.player_move = 0;
        true
    }

    /// Left magnet grabs the player found past empty tiles on its right.
    fn magnet(&self, ctx: &mut UpdateContext) -> bool {
        if ctx.y as i32 != ctx.state.player.y {
            return false;
        }
        let mut tile = ctx.here() + 1;
        while ctx.get(tile) == EL_SPACE {
            tile += 1;
        }
        if ctx.get(tile) != EL_PLAYER {
            return false;
        }
        ctx.set(tile, EL_PLAYER_ATTRACTED_LT | PROCESSED_BIT);
        ctx.state.player_alive = true;
        ctx.cue(SoundCue::Magnet);
        true
    }

    /// Pulls the attracted player one tile; stuck against something, the
    /// player is crushed.
    fn attract(&self, ctx: &mut UpdateContext) -> bool {
        let delta = if ctx.code == EL_PLAYER_ATTRACTED_RT { 1 } else { -1 };
        let from = ctx.here();
        let target = from + delta;
        if ctx.get(target) == EL_SPACE {
            let pulled = guard_forward(ctx.code, delta);
            ctx.set(from, EL_SPACE);
            ctx.set(target, pulled);
            ctx.state.player_alive = true;
        } else {
            ctx.set(from, EL_ANIM_PLAYER_ATTRACTED);
            ctx.cue(SoundCue::Shot);
        }
        true
    }
}

impl Behavior for TransportBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool {
        match ctx.code {
            EL_MAGNET_LT => self.magnet(ctx),
            EL_PLAYER_ATTRACTED_LT | EL_PLAYER_ATTRACTED_RT => self.attract(ctx),
            code if is_teleport(code) => self.teleport(ctx),
            _ => false,
        }
    }
}

impl Default for TransportBehavior {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::*;

    const TELEPORT_4: ElementCode = EL_TELEPORT_0 + 4;

    #[test]
    fn matching_teleport_lets_the_player_out_ahead() {
        let mut bench = Bench::new();
        bench.put(5, 2, TELEPORT_4);
        bench.state.teleport = TELEPORT_4;
        bench.state.player_move = 1;
        assert!(bench.run(5, 2));
        assert_eq!(bench.at(6, 2), EL_ANIM_PLAYER_TELEPORT);
        assert_eq!(bench.state.teleport, 0);
        assert_eq!(bench.state.player_move, 0);
        assert_eq!(bench.state.player.tile, Some(bench.grid.index(6, 2)));
    }

    #[test]
    fn blocked_exit_tries_the_sides_then_back() {
        let mut bench = Bench::new();
        bench.put(5, 2, TELEPORT_4);
        bench.put(6, 2, EL_BOX);
        bench.put(5, 1, EL_BOX);
        bench.state.teleport = TELEPORT_4;
        bench.state.player_move = 1;
        assert!(bench.run(5, 2));
        assert_eq!(bench.at(5, 3), EL_ANIM_PLAYER_TELEPORT);
    }

    #[test]
    fn fully_blocked_or_other_numbers_stay_shut() {
        let mut bench = Bench::new();
        bench.put(5, 2, TELEPORT_4);
        for (x, y) in [(6, 2), (4, 2), (5, 1), (5, 3)] {
            bench.put(x, y, EL_BOX);
        }
        bench.state.teleport = TELEPORT_4;
        bench.state.player_move = -8;
        assert!(!bench.run(5, 2));
        assert_eq!(bench.state.teleport, TELEPORT_4);

        bench.state.teleport = EL_TELEPORT_0;
        bench.put(5, 1, EL_SPACE);
        assert!(!bench.run(5, 2));
        assert_eq!(bench.at(5, 1), EL_SPACE);
    }

    #[test]
    fn left_magnet_grabs_the_player_in_its_row() {
        let mut bench = Bench::new();
        bench.put(1, 3, EL_MAGNET_LT);
        let player = bench.put(5, 3, EL_PLAYER);
        bench.state.set_player_pos(Some(player));
        assert!(bench.run(1, 3));
        assert_eq!(bench.at(5, 3), EL_PLAYER_ATTRACTED_LT | PROCESSED_BIT);
        assert!(bench.state.player_alive);
        assert_eq!(bench.cues, vec![SoundCue::Magnet]);
    }

    #[test]
    fn attracted_player_slides_then_gets_stuck() {
        let mut bench = Bench::new();
        bench.put(1, 3, EL_MAGNET_LT);
        bench.put(3, 3, EL_PLAYER_ATTRACTED_LT);
        bench.run(3, 3);
        assert_eq!(bench.at(2, 3), EL_PLAYER_ATTRACTED_LT);
        bench.run(2, 3);
        assert_eq!(bench.at(2, 3), EL_ANIM_PLAYER_ATTRACTED);
        assert_eq!(bench.cues, vec![SoundCue::Shot]);
    }
}
