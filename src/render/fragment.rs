//! Fragments and the sink they are submitted to.

use crate::colors::Color;

/// A candidate pixel produced by the rasterizer for one triangle.
///
/// Fragments are never stored; they go straight to a [`FragmentSink`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    pub color: Color,
    /// Post-divide depth, smaller is nearer.
    pub depth: f32,
}

impl Fragment {
    pub fn new(x: i32, y: i32, color: Color, depth: f32) -> Self {
        Self { x, y, color, depth }
    }
}

/// Receiver of rasterized fragments.
///
/// The rasterizer only talks to this trait, so the depth-tested target can be
/// swapped for a counting sink in tests, or for a sink whose test-and-write
/// is atomic per pixel when triangles are rasterized on several threads.
pub trait FragmentSink {
    /// Offer a fragment. Returns `true` if it became the visible one.
    fn submit(&mut self, fragment: Fragment) -> bool;
}

impl FragmentSink for Vec<Fragment> {
    fn submit(&mut self, fragment: Fragment) -> bool {
        self.push(fragment);
        true
    }
}
