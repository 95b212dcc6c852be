use super::super::*;
use crate::elements::EL_WALL;

impl Grid {
    /// Code at `tile`; the wall code outside the grid.
    #[inline]
    pub fn get(&self, tile: isize) -> ElementCode {
        if self.contains(tile) {
            self.tiles[tile as usize]
        } else {
            EL_WALL
        }
    }

    /// Writes `code` at `tile`; no-op outside the grid.
    #[inline]
    pub fn set(&mut self, tile: isize, code: ElementCode) {
        if self.contains(tile) {
            self.tiles[tile as usize] = code;
        }
    }

    #[inline]
    pub fn get_xy(&self, x: u32, y: u32) -> ElementCode {
        if x < self.width && y < self.height {
            self.tiles[self.index(x, y)]
        } else {
            EL_WALL
        }
    }

    #[inline]
    pub fn set_xy(&mut self, x: u32, y: u32, code: ElementCode) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.tiles[idx] = code;
        }
    }

    /// First tile index holding `code`, in raster order.
    pub fn find(&self, code: ElementCode) -> Option<usize> {
        self.tiles.iter().position(|&c| c == code)
    }
}
