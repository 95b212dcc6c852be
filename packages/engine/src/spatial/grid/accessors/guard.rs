use super::super::*;
use crate::elements::{CODE_MASK, PROCESSED_BIT};

impl Grid {
    // === Processed guard (bit 7) ===
    #[inline]
    pub fn is_guarded(&self, tile: usize) -> bool {
        self.tiles[tile] & PROCESSED_BIT != 0
    }

    /// Strips the guard bit in place and returns the plain code.
    #[inline]
    pub fn clear_guard(&mut self, tile: usize) -> ElementCode {
        let code = self.tiles[tile] & CODE_MASK;
        self.tiles[tile] = code;
        code
    }
}
