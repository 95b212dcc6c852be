//! Mutable play state shared by the tick machine and the behaviors.

use serde::Serialize;

use crate::domain::content::LOOK_PLAYER_MARKER;
use crate::elements::ElementCode;

/// Pixel height of one tile row.
pub const TILE_PX: i32 = 16;
/// Height of the visible cave window in pixels.
pub const VIEW_HEIGHT: i32 = 161;
const SCROLL_MARGIN: i32 = 2 * TILE_PX;
const SCROLL_MARGIN_DEST: i32 = 5 * TILE_PX;

/// HUD counters; survive cave transitions within a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InfoState {
    pub score: u32,
    pub screws: u32,
    pub lives: u32,
    pub keys: u32,
    pub ammo: u32,
    pub cave: u32,
}

/// Cached player position; `tile == None` while unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerPos {
    pub tile: Option<usize>,
    pub x: i32,
    pub y: i32,
}

impl PlayerPos {
    pub const UNKNOWN: PlayerPos = PlayerPos { tile: None, x: -1, y: -1 };
}

/// Vertical scroll position and target, in pixels from the top of the cave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollState {
    pub y: i32,
    pub dest: i32,
    max: i32,
}

impl ScrollState {
    pub fn new(rows: u32) -> Self {
        Self {
            y: 0,
            dest: 0,
            max: (rows as i32 * TILE_PX - (VIEW_HEIGHT & !1)).max(0),
        }
    }

    #[inline]
    pub fn settled(&self) -> bool {
        self.y == self.dest
    }

    /// Stops at the current row boundary.
    fn halt(&mut self) {
        self.dest = self.y - self.y % TILE_PX;
    }

    /// Retargets so that pixel row `player_y` stays clear of the window margins.
    fn follow(&mut self, player_y: i32) {
        if self.dest > player_y - SCROLL_MARGIN {
            self.dest = (player_y - SCROLL_MARGIN_DEST).max(0);
        } else if self.dest + VIEW_HEIGHT < player_y + SCROLL_MARGIN + 2 {
            self.dest = (player_y + SCROLL_MARGIN_DEST - (VIEW_HEIGHT & !1)).min(self.max);
        }
    }

    /// Moves toward the target by at most `frames * 2` pixels.
    /// Returns the exposed band `(top, height)` in cave pixels, if any.
    pub fn advance(&mut self, frames: u32) -> Option<(i32, i32)> {
        if self.settled() {
            return None;
        }
        let mut delta = (frames as i32).saturating_mul(2);
        if delta >= VIEW_HEIGHT {
            delta = (VIEW_HEIGHT - 1) & !1;
        }
        let dirty_top = if self.y < self.dest {
            delta = delta.min(self.dest - self.y);
            let top = self.y + VIEW_HEIGHT;
            self.y += delta;
            top
        } else {
            delta = delta.min(self.y - self.dest);
            self.y -= delta;
            self.y
        };
        Some((dirty_top, delta))
    }
}

/// Everything a pass reads or writes besides the grid itself.
#[derive(Clone, Debug)]
pub struct PlayState {
    pub info: InfoState,
    pub cave_index: usize,
    /// Cave whose extra life was already taken.
    pub life_collected_at: Option<usize>,
    pub player: PlayerPos,
    pub scroll: ScrollState,
    /// Index delta of the player's last step, 0 when standing.
    pub player_move: isize,
    /// Visual code of the player; bit 4 is the walking frame.
    pub player_look: u8,
    pub player_alive: bool,
    /// Teleport code the player vanished into, 0 when none.
    pub teleport: ElementCode,
    pub no_fire_timer: u32,
    pub demolish_timer: u32,
    pub flash_timer: u32,
    /// World counter, advanced once per pass cadence.
    pub counter: u32,
    /// Set by a behavior boarding the active ship.
    pub leave_requested: bool,
    width: u32,
}

impl PlayState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            info: InfoState::default(),
            cave_index: 0,
            life_collected_at: None,
            player: PlayerPos::UNKNOWN,
            scroll: ScrollState::new(height),
            player_move: 0,
            player_look: LOOK_PLAYER_MARKER,
            player_alive: false,
            teleport: 0,
            no_fire_timer: 0,
            demolish_timer: 0,
            flash_timer: 0,
            counter: 0,
            leave_requested: false,
            width,
        }
    }

    /// Records the player position and retargets the scroll.
    pub fn set_player_pos(&mut self, tile: Option<usize>) {
        match tile {
            None => {
                self.player = PlayerPos::UNKNOWN;
                self.scroll.halt();
            }
            Some(tile) => {
                let x = (tile as u32 % self.width) as i32;
                let y = (tile as u32 / self.width) as i32;
                self.player = PlayerPos { tile: Some(tile), x, y };
                self.scroll.follow(y * TILE_PX);
            }
        }
    }

    #[inline]
    pub fn life_taken_here(&self) -> bool {
        self.life_collected_at == Some(self.cave_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_follows_player_down_and_clamps() {
        let mut state = PlayState::new(16, 31);
        state.set_player_pos(Some(16 * 30));
        assert_eq!(state.scroll.dest, 336);
        state.set_player_pos(Some(0));
        assert_eq!(state.scroll.dest, 0);
    }

    #[test]
    fn scroll_advance_is_capped_by_frames_and_gap() {
        let mut scroll = ScrollState::new(31);
        scroll.dest = 10;
        assert_eq!(scroll.advance(2), Some((VIEW_HEIGHT, 4)));
        assert_eq!(scroll.y, 4);
        assert_eq!(scroll.advance(100), Some((4 + VIEW_HEIGHT, 6)));
        assert!(scroll.settled());
        assert_eq!(scroll.advance(1), None);
    }

    #[test]
    fn unknown_player_halts_scroll_on_row_boundary() {
        let mut state = PlayState::new(16, 31);
        state.scroll.y = 37;
        state.set_player_pos(None);
        assert_eq!(state.scroll.dest, 32);
        assert_eq!(state.player, PlayerPos::UNKNOWN);
    }
}
