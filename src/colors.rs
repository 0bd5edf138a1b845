//! Opaque 8-bit RGB color and the palette used by the renderer.

use serde::{Deserialize, Serialize};

/// Three 8-bit channels, no alpha. Compositing is fully opaque.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Pseudo-color from barycentric weights: each weight scales one channel.
    ///
    /// Weights outside [0, 1] are clamped.
    pub fn from_barycentric(lambda: [f32; 3]) -> Self {
        let channel = |w: f32| (w.clamp(0.0, 1.0) * 255.0) as u8;
        Self::new(channel(lambda[0]), channel(lambda[1]), channel(lambda[2]))
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb(color.to_array())
    }
}

pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);

/// Default clear color.
pub const BACKGROUND: Color = BLACK;
/// Default wireframe overlay color.
pub const WIREFRAME: Color = WHITE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barycentric_corners_are_primaries() {
        assert_eq!(Color::from_barycentric([1.0, 0.0, 0.0]), Color::new(255, 0, 0));
        assert_eq!(Color::from_barycentric([0.0, 1.0, 0.0]), Color::new(0, 255, 0));
        assert_eq!(Color::from_barycentric([0.0, 0.0, 1.0]), Color::new(0, 0, 255));
    }

    #[test]
    fn barycentric_weights_are_clamped() {
        assert_eq!(Color::from_barycentric([1.5, -0.2, f32::NAN]), Color::new(255, 0, 0));
    }
}
