//! Debug overlay pass: triangle outlines drawn on top of the filled image.
//!
//! Lines ignore the depth buffer entirely, so hidden edges show through. This
//! is a visualization aid, kept apart from the depth-tested fill.

use super::framebuffer::FrameBuffer;
use super::rasterizer::ScreenTriangle;
use crate::colors::Color;

/// Draw the three edges of `triangle` into `buffer`.
///
/// Each edge is clipped to the buffer before its endpoints are truncated to
/// whole pixels, so vertices projected far off-screen (a vertex just in front
/// of the eye plane lands around 1e9) cost no more than on-screen ones.
pub fn draw_wireframe(buffer: &mut FrameBuffer, triangle: &ScreenTriangle, color: Color) {
    let bounds = (f64::from(buffer.width()), f64::from(buffer.height()));
    let [p0, p1, p2] = triangle.vertices.map(|v| (f64::from(v.x), f64::from(v.y)));
    for (a, b) in [(p0, p1), (p1, p2), (p2, p0)] {
        if let Some((a, b)) = clip_segment(a, b, bounds) {
            buffer.draw_line(a.0 as i32, a.1 as i32, b.0 as i32, b.1 as i32, color);
        }
    }
}

type Point = (f64, f64);

/// Liang-Barsky clip of segment `a`-`b` against `[0, width] x [0, height]`.
///
/// Returns `None` if the segment misses the rectangle or has a non-finite
/// endpoint.
fn clip_segment(a: Point, b: Point, (width, height): Point) -> Option<(Point, Point)> {
    if !(a.0.is_finite() && a.1.is_finite() && b.0.is_finite() && b.1.is_finite()) {
        return None;
    }
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    for (p, q) in [(-dx, a.0), (dx, width - a.0), (-dy, a.1), (dy, height - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| (a.0 + dx * t, a.1 + dy * t);
    Some((at(t0), at(t1)))
}
