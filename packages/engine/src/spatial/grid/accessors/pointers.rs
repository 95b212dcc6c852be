use super::super::*;

impl Grid {
    // === Raw pointer for JS interop ===
    pub fn tiles_ptr(&self) -> *const ElementCode {
        self.tiles.as_ptr()
    }
}
