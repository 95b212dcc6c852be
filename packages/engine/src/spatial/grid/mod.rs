//! Grid - flat row-major array of element codes
//!
//! Reads outside the grid see the wall code and writes outside it are
//! dropped, so scans and neighbor probes never fault at the cave edge.

use crate::elements::{ElementCode, EL_COSMOS};

mod indexing;
mod accessors;
mod streaming;

pub use streaming::ColumnLoad;

pub struct Grid {
    width: u32,
    height: u32,
    size: usize,
    pub tiles: Vec<ElementCode>,
}

impl Grid {
    /// New grid filled with cosmos (nothing revealed yet).
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, EL_COSMOS)
    }

    pub fn filled(width: u32, height: u32, code: ElementCode) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            size,
            tiles: vec![code; size],
        }
    }

    pub fn fill(&mut self, code: ElementCode) {
        self.tiles.fill(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{EL_PLAYER, EL_SPACE, EL_WALL, PROCESSED_BIT};

    #[test]
    fn out_of_range_reads_are_wall_and_writes_are_dropped() {
        let mut grid = Grid::filled(4, 3, EL_SPACE);
        assert_eq!(grid.get(-1), EL_WALL);
        assert_eq!(grid.get(12), EL_WALL);
        grid.set(-5, EL_PLAYER);
        grid.set(100, EL_PLAYER);
        assert!(grid.tiles.iter().all(|&c| c == EL_SPACE));
    }

    #[test]
    fn offsets_wrap_rows_like_the_flat_array() {
        let grid = Grid::filled(4, 3, EL_SPACE);
        assert_eq!(grid.index(3, 1), 7);
        assert_eq!(grid.coords(7), (3, 1));
        assert_eq!(grid.offset(3, 1), Some(4));
        assert_eq!(grid.offset(11, 1), None);
        assert_eq!(grid.offset(0, -1), None);
    }

    #[test]
    fn clearing_the_guard_returns_the_plain_code() {
        let mut grid = Grid::filled(2, 2, EL_SPACE);
        grid.set(1, EL_PLAYER | PROCESSED_BIT);
        assert!(grid.is_guarded(1));
        assert_eq!(grid.clear_guard(1), EL_PLAYER);
        assert_eq!(grid.get(1), EL_PLAYER);
    }
}
