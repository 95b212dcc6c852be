//! MachineryBehavior - the escape ship and force-field barriers.

use super::{Behavior, UpdateContext};
use crate::domain::sound::SoundCue;
use crate::elements::*;

pub struct MachineryBehavior;

impl MachineryBehavior {
    pub fn new() -> Self {
        Self
    }

    /// Powers up once every screw of the cave is collected.
    fn ship(&self, ctx: &mut UpdateContext) -> bool {
        if ctx.state.info.screws != 0 {
            return false;
        }
        ctx.cue(SoundCue::Launch);
        let here = ctx.here();
        ctx.set(here, EL_SHIP_ACTIVE);
        ctx.state.flash_timer = ctx.settings.flash_ticks;
        true
    }

    fn blink(&self, ctx: &mut UpdateContext) -> bool {
        if ctx.state.counter & 3 != 0 {
            return false;
        }
        let here = ctx.here();
        ctx.set(here, ctx.code ^ (EL_SHIP_ACTIVE ^ EL_SHIP_ACTIVE_ALT));
        true
    }

    /// Shifts the barrier pattern between the two end posts one tile to the
    /// left, wrapping the first tile around to the right end.
    fn barrier(&self, ctx: &mut UpdateContext) -> bool {
        let mut tile = ctx.here() + 1;
        let first = ctx.get(tile);
        while ctx.grid.contains(tile) && ctx.get(tile) != EL_BARRIER_RT {
            let mut next = ctx.get(tile + 1);
            if next == EL_BARRIER_RT {
                next = first;
            }
            if next == EL_BARRIER {
                ctx.set(tile, EL_BARRIER);
            } else if ctx.get(tile) == EL_BARRIER {
                ctx.set(tile, EL_SPACE);
            }
            tile += 1;
        }
        true
    }
}

impl Behavior for MachineryBehavior {
    fn update(&self, ctx: &mut UpdateContext) -> bool {
        match ctx.code {
            EL_SHIP => self.ship(ctx),
            EL_SHIP_ACTIVE | EL_SHIP_ACTIVE_ALT => self.blink(ctx),
            EL_BARRIER_LT => self.barrier(ctx),
            _ => false,
        }
    }
}

impl Default for MachineryBehavior {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::*;

    #[test]
    fn ship_waits_for_the_last_screw() {
        let mut bench = Bench::new();
        bench.state.info.screws = 2;
        bench.put(4, 4, EL_SHIP);
        assert!(!bench.run(4, 4));

        bench.state.info.screws = 0;
        assert!(bench.run(4, 4));
        assert_eq!(bench.at(4, 4), EL_SHIP_ACTIVE);
        assert_eq!(bench.state.flash_timer, 3);
        assert_eq!(bench.cues, vec![SoundCue::Launch]);
    }

    #[test]
    fn active_ship_blinks_every_fourth_count() {
        let mut bench = Bench::new();
        bench.put(4, 4, EL_SHIP_ACTIVE);
        bench.state.counter = 2;
        assert!(!bench.run(4, 4));
        bench.state.counter = 8;
        assert!(bench.run(4, 4));
        assert_eq!(bench.at(4, 4), EL_SHIP_ACTIVE_ALT);
        assert!(bench.run(4, 4));
        assert_eq!(bench.at(4, 4), EL_SHIP_ACTIVE);
    }

    #[test]
    fn barrier_pattern_rotates_left() {
        let mut bench = Bench::new();
        bench.put(0, 1, EL_BARRIER_LT);
        bench.put(1, 1, EL_BARRIER);
        bench.put(2, 1, EL_SPACE);
        bench.put(3, 1, EL_BARRIER);
        bench.put(4, 1, EL_SPACE);
        bench.put(5, 1, EL_BARRIER_RT);
        assert!(bench.run(0, 1));
        let row: Vec<ElementCode> = (1..5).map(|x| bench.at(x, 1)).collect();
        assert_eq!(row, vec![EL_SPACE, EL_BARRIER, EL_SPACE, EL_BARRIER]);
    }

    #[test]
    fn barrier_without_end_post_stops_at_the_grid_edge() {
        let mut bench = Bench::new();
        bench.put(6, 5, EL_BARRIER_LT);
        bench.put(7, 5, EL_BARRIER);
        assert!(bench.run(6, 5));
        assert_eq!(bench.at(7, 5), EL_SPACE);
    }
}
