use super::*;

impl Grid {
    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    /// Index delta of one row step.
    #[inline]
    pub fn row(&self) -> isize { self.width as isize }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let x = (idx as u32) % self.width;
        let y = (idx as u32) / self.width;
        (x, y)
    }

    #[inline]
    pub fn contains(&self, tile: isize) -> bool {
        tile >= 0 && (tile as usize) < self.size
    }

    /// `tile + delta` when it lands inside the flat array.
    #[inline]
    pub fn offset(&self, tile: usize, delta: isize) -> Option<usize> {
        let target = tile as isize + delta;
        if self.contains(target) {
            Some(target as usize)
        } else {
            None
        }
    }
}
