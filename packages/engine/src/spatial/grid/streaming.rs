//! Column-by-column reveal and erase of the live grid.

use super::*;
use crate::domain::content::CaveTemplate;
use crate::elements::{EL_ANIM_DISAPPEAR_A, EL_LIFE, EL_PLAYER, EL_PLAYER_IN_SHIP};

/// Outcome of revealing one column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnLoad {
    /// Tile where the player's ship landed, if it is in this column.
    pub player: Option<usize>,
}

impl Grid {
    /// Copies column `x` from the template. The player marker becomes a
    /// player still inside the ship; a life already collected in this cave
    /// comes back as a disappearing animation.
    pub fn load_column(&mut self, x: u32, template: &CaveTemplate<'_>, life_taken: bool) -> ColumnLoad {
        let mut load = ColumnLoad::default();
        if x >= self.width {
            return load;
        }
        for y in 0..self.height {
            let idx = self.index(x, y);
            let code = match template.tile(x, y) {
                EL_PLAYER => {
                    load.player = Some(idx);
                    EL_PLAYER_IN_SHIP
                }
                EL_LIFE if life_taken => EL_ANIM_DISAPPEAR_A,
                code => code,
            };
            self.tiles[idx] = code;
        }
        load
    }

    /// Fills column `x` with cosmos.
    pub fn clear_column(&mut self, x: u32) {
        if x >= self.width {
            return;
        }
        for y in 0..self.height {
            let idx = self.index(x, y);
            self.tiles[idx] = EL_COSMOS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{PackBuilder, CAVE_HEIGHT, CAVE_TILES, CAVE_WIDTH};
    use crate::elements::{EL_BOX, EL_SPACE};

    fn template_tiles() -> Vec<ElementCode> {
        let mut tiles = vec![EL_SPACE; CAVE_TILES];
        tiles[2] = EL_PLAYER;
        tiles[2 + CAVE_WIDTH as usize] = EL_LIFE;
        tiles[2 + 2 * CAVE_WIDTH as usize] = EL_BOX;
        tiles
    }

    #[test]
    fn load_substitutes_player_and_collected_life() {
        let pack = PackBuilder::new().cave(&template_tiles(), 0).build().unwrap();
        let template = pack.cave(0);
        let mut grid = Grid::new(CAVE_WIDTH, CAVE_HEIGHT);

        let load = grid.load_column(2, &template, true);
        assert_eq!(load.player, Some(2));
        assert_eq!(grid.get_xy(2, 0), EL_PLAYER_IN_SHIP);
        assert_eq!(grid.get_xy(2, 1), EL_ANIM_DISAPPEAR_A);
        assert_eq!(grid.get_xy(2, 2), EL_BOX);
        assert_eq!(grid.get_xy(1, 0), EL_COSMOS);

        grid.load_column(2, &template, false);
        assert_eq!(grid.get_xy(2, 1), EL_LIFE);
    }

    #[test]
    fn reveal_hide_reveal_is_idempotent() {
        let pack = PackBuilder::new().cave(&template_tiles(), 0).build().unwrap();
        let template = pack.cave(0);
        let mut grid = Grid::new(CAVE_WIDTH, CAVE_HEIGHT);

        grid.load_column(2, &template, false);
        let first = grid.tiles.clone();
        grid.clear_column(2);
        assert!((0..CAVE_HEIGHT).all(|y| grid.get_xy(2, y) == EL_COSMOS));
        grid.load_column(2, &template, false);
        assert_eq!(grid.tiles, first);
    }
}
