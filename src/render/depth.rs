//! Per-pixel nearest-depth store.

/// Depth values for a `width * height` grid, row-major.
///
/// Every entry starts at `+inf` ("nothing drawn"), so any finite depth passes
/// the first test. Smaller values are nearer to the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![f32::INFINITY; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depths(&self) -> &[f32] {
        &self.depths
    }

    /// Reset every entry to `+inf`.
    pub fn clear(&mut self) {
        self.depths.fill(f32::INFINITY);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Stored depth at (x, y), or `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.depths[i])
    }

    /// Overwrite the depth at (x, y) without testing. Out-of-bounds writes are
    /// dropped.
    pub fn set_depth(&mut self, x: i32, y: i32, depth: f32) {
        if let Some(i) = self.index(x, y) {
            self.depths[i] = depth;
        }
    }

    /// Depth test at a linear index: stores `depth` and returns `true` only if
    /// it is strictly nearer than the stored value. NaN never passes.
    #[inline]
    pub(crate) fn test_and_set(&mut self, index: usize, depth: f32) -> bool {
        let stored = &mut self.depths[index];
        if *stored > depth {
            *stored = depth;
            true
        } else {
            false
        }
    }

    /// Smallest and largest finite depth written so far.
    pub fn finite_range(&self) -> Option<(f32, f32)> {
        self.depths
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .fold(None, |range, d| match range {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_infinity() {
        let depth = DepthBuffer::new(3, 2);
        assert_eq!(depth.depths().len(), 6);
        assert!(depth.depths().iter().all(|d| *d == f32::INFINITY));
        assert_eq!(depth.finite_range(), None);
    }

    #[test]
    fn nearer_never_regresses() {
        let mut depth = DepthBuffer::new(2, 2);
        assert!(depth.test_and_set(3, 5.0));
        assert!(depth.test_and_set(3, 3.0));
        assert!(!depth.test_and_set(3, 4.0));
        assert!(!depth.test_and_set(3, 3.0));
        assert_eq!(depth.get(1, 1), Some(3.0));
    }

    #[test]
    fn nan_depth_is_rejected() {
        let mut depth = DepthBuffer::new(1, 1);
        assert!(!depth.test_and_set(0, f32::NAN));
        assert_eq!(depth.get(0, 0), Some(f32::INFINITY));
    }

    #[test]
    fn set_depth_is_bounds_checked() {
        let mut depth = DepthBuffer::new(2, 2);
        depth.set_depth(5, 0, 1.0);
        depth.set_depth(0, -1, 1.0);
        depth.set_depth(1, 0, 0.25);
        assert_eq!(depth.get(1, 0), Some(0.25));
        assert_eq!(depth.finite_range(), Some((0.25, 0.25)));
    }
}
