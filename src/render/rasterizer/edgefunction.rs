//! Edge function-based triangle rasterization.
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(A, B, P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! Its sign tells which side of AB the point lies on, and its magnitude is
//! twice the area of triangle ABP. `E(v0, v1, v2)` is therefore twice the
//! signed area of the whole triangle.
//!
//! # Barycentric Coordinates
//!
//! ```text
//! l0 = E(v1, v2, P) / E(v0, v1, v2)
//! l1 = E(v2, v0, P) / E(v0, v1, v2)
//! l2 = E(v0, v1, P) / E(v0, v1, v2)
//! ```
//!
//! Inside the triangle all three are non-negative and they sum to 1.
//!
//! # Fill Rule
//!
//! A pixel center exactly on an edge (edge value 0) is covered only if the
//! edge is a top or left edge. Two triangles sharing an edge therefore never
//! both draw, and never both skip, a pixel on it.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)

use super::shader::PixelShader;
use super::{Coverage, CullMode, ScreenTriangle};
use crate::math::{Vec2, Vec4};
use crate::pipeline::Viewport;
use crate::render::fragment::{Fragment, FragmentSink};

/// Triangles with `|E(v0, v1, v2)|` below this are treated as degenerate.
pub const AREA_EPSILON: f32 = 1e-6;

/// Twice the signed area of triangle (a, b, p).
#[inline]
pub fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Barycentric weights of `p` with respect to (v0, v1, v2).
///
/// Returns `None` for degenerate triangles. Weights are not clamped, so a
/// point outside the triangle has at least one negative weight.
pub fn barycentric(v0: Vec2, v1: Vec2, v2: Vec2, p: Vec2) -> Option<[f32; 3]> {
    let area = edge_function(v0, v1, v2);
    if !area.is_finite() || area.abs() < AREA_EPSILON {
        return None;
    }
    let inv_area = 1.0 / area;
    Some([
        edge_function(v1, v2, p) * inv_area,
        edge_function(v2, v0, p) * inv_area,
        edge_function(v0, v1, p) * inv_area,
    ])
}

/// Top-left rule for a positively oriented triangle in y-down screen space:
/// left edges run downward, top edges are horizontal and run leftward.
#[inline]
fn is_top_left(a: Vec2, b: Vec2) -> bool {
    let d = b - a;
    d.y > 0.0 || (d.y == 0.0 && d.x < 0.0)
}

#[inline]
fn covers(value: f32, top_left: bool) -> bool {
    value > 0.0 || (value == 0.0 && top_left)
}

/// Bounding-box rasterizer using edge functions.
///
/// Each pixel in the triangle's bounding box (clamped to the viewport) is
/// sampled at its center. Covered pixels become fragments whose depth is
/// interpolated linearly in screen space from the vertex `z` values. That
/// interpolation is not perspective-correct; it is exact for depth because
/// post-divide depth is itself affine in screen space, and an approximation
/// for the shader's color.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeFunctionRasterizer {
    cull_mode: CullMode,
}

impl EdgeFunctionRasterizer {
    pub fn new(cull_mode: CullMode) -> Self {
        Self { cull_mode }
    }

    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    pub fn set_cull_mode(&mut self, cull_mode: CullMode) {
        self.cull_mode = cull_mode;
    }

    /// Rasterize `triangle`, submitting one fragment per covered pixel.
    pub fn fill_triangle<S, K>(
        &self,
        triangle: &ScreenTriangle,
        viewport: Viewport,
        shader: &S,
        sink: &mut K,
    ) -> Coverage
    where
        S: PixelShader + ?Sized,
        K: FragmentSink + ?Sized,
    {
        // ─────────────────────────────────────────────────────────────────────
        // Step 1: Signed area, degenerate guard and culling
        // ─────────────────────────────────────────────────────────────────────
        let area = triangle.signed_area();
        if !area.is_finite() || area.abs() < AREA_EPSILON {
            return Coverage::Degenerate;
        }
        if self.cull_mode.culls(area) {
            return Coverage::Culled;
        }

        // Walk a positively oriented copy so one inside test and one fill
        // rule serve both windings. `order` maps walk slots back to the
        // caller's vertex indices.
        let [v0, v1, v2] = triangle.vertices;
        let (walk, order, area) = if area > 0.0 {
            ([v0, v1, v2], [0, 1, 2], area)
        } else {
            ([v0, v2, v1], [0, 2, 1], -area)
        };
        let [a, b, c]: [Vec4; 3] = walk;
        let (pa, pb, pc) = (a.xy(), b.xy(), c.xy());
        let inv_area = 1.0 / area;

        let top_left = [is_top_left(pb, pc), is_top_left(pc, pa), is_top_left(pa, pb)];

        // ─────────────────────────────────────────────────────────────────────
        // Step 2: Bounding box clamped to the viewport
        // ─────────────────────────────────────────────────────────────────────
        let lo = pa.min(pb).min(pc);
        let hi = pa.max(pb).max(pc);
        let min_x = (lo.x.floor() as i32).max(0);
        let min_y = (lo.y.floor() as i32).max(0);
        let max_x = (hi.x.ceil() as i32).min(viewport.width() as i32 - 1);
        let max_y = (hi.y.ceil() as i32).min(viewport.height() as i32 - 1);

        // ─────────────────────────────────────────────────────────────────────
        // Step 3: Test pixel centers, interpolate, emit
        // ─────────────────────────────────────────────────────────────────────
        let mut covered = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                let e = [
                    edge_function(pb, pc, p),
                    edge_function(pc, pa, p),
                    edge_function(pa, pb, p),
                ];
                if !(covers(e[0], top_left[0])
                    && covers(e[1], top_left[1])
                    && covers(e[2], top_left[2]))
                {
                    continue;
                }

                let mut lambda = [0.0f32; 3];
                for (slot, &vertex) in order.iter().enumerate() {
                    lambda[vertex] = e[slot] * inv_area;
                }

                // Anchored on v0 so a constant-depth triangle yields exactly
                // that depth.
                let depth = a.z + (b.z - a.z) * e[1] * inv_area + (c.z - a.z) * e[2] * inv_area;

                sink.submit(Fragment::new(x, y, shader.shade(lambda), depth));
                covered += 1;
            }
        }

        Coverage::Covered(covered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color;
    use crate::render::rasterizer::{BarycentricShader, FlatShader};
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn viewport(w: u32, h: u32) -> Viewport {
        Viewport::new(w, h).unwrap()
    }

    fn fragments(tri: &ScreenTriangle, cull: CullMode, w: u32, h: u32) -> Vec<Fragment> {
        let mut out = Vec::new();
        EdgeFunctionRasterizer::new(cull).fill_triangle(
            tri,
            viewport(w, h),
            &BarycentricShader,
            &mut out,
        );
        out
    }

    #[test]
    fn edge_function_sign() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(0.0, 10.0);
        assert!(edge_function(a, b, Vec2::new(1.0, 5.0)) > 0.0);
        assert!(edge_function(a, b, Vec2::new(-1.0, 5.0)) < 0.0);
        assert_eq!(edge_function(a, b, Vec2::new(0.0, 3.0)), 0.0);
    }

    #[test]
    fn barycentric_partition_of_unity() {
        let (v0, v1, v2) = (Vec2::new(13.0, 7.5), Vec2::new(91.2, 40.0), Vec2::new(30.0, 88.8));
        for &(px, py) in &[(40.0, 40.0), (30.5, 30.5), (50.0, 60.0), (35.0, 75.0)] {
            let l = barycentric(v0, v1, v2, Vec2::new(px, py)).unwrap();
            assert_relative_eq!(l[0] + l[1] + l[2], 1.0, epsilon = 1e-4);
            assert!(l.iter().all(|&w| w >= 0.0), "{l:?} at ({px}, {py})");
        }
    }

    #[test]
    fn barycentric_at_vertices() {
        let (v0, v1, v2) = (Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
        assert_eq!(barycentric(v0, v1, v2, v0), Some([1.0, 0.0, 0.0]));
        assert_eq!(barycentric(v0, v1, v2, v1), Some([0.0, 1.0, 0.0]));
        assert_eq!(barycentric(v0, v1, v2, v2), Some([0.0, 0.0, 1.0]));
    }

    #[test]
    fn emitted_weights_are_a_partition_of_unity() {
        let tri = ScreenTriangle::from_xyz([(3.3, 2.1, 0.1), (57.9, 11.4, 0.4), (21.0, 49.5, 0.9)]);
        let mut shaded = Vec::new();
        struct Capture<'a>(std::cell::RefCell<&'a mut Vec<[f32; 3]>>);
        impl PixelShader for Capture<'_> {
            fn shade(&self, lambda: [f32; 3]) -> Color {
                self.0.borrow_mut().push(lambda);
                Color::default()
            }
        }
        let shader = Capture(std::cell::RefCell::new(&mut shaded));
        let mut sink = Vec::new();
        let coverage = EdgeFunctionRasterizer::default().fill_triangle(
            &tri,
            viewport(64, 64),
            &shader,
            &mut sink,
        );
        drop(shader);

        assert!(coverage.fragments() > 100);
        assert_eq!(shaded.len(), coverage.fragments());
        for l in &shaded {
            assert_relative_eq!(l[0] + l[1] + l[2], 1.0, epsilon = 1e-4);
            assert!(l.iter().all(|&w| w >= 0.0));
        }
        for f in &sink {
            assert!(f.depth >= 0.1 - 1e-5 && f.depth <= 0.9 + 1e-5);
        }
    }

    #[test]
    fn both_windings_cover_the_same_pixels() {
        let ccw = ScreenTriangle::from_xyz([(2.0, 2.0, 0.5), (2.0, 18.0, 0.5), (18.0, 2.0, 0.5)]);
        let [a, b, c] = ccw.vertices;
        let cw = ScreenTriangle::new([a, c, b]);
        assert!(ccw.signed_area() > 0.0 && cw.signed_area() < 0.0);

        let pixels = |t: &ScreenTriangle| {
            let mut p: Vec<_> = fragments(t, CullMode::None, 20, 20)
                .into_iter()
                .map(|f| (f.x, f.y))
                .collect();
            p.sort();
            p
        };
        assert_eq!(pixels(&ccw), pixels(&cw));
        assert!(!pixels(&ccw).is_empty());
    }

    #[test]
    fn cull_modes_are_explicit() {
        let front = ScreenTriangle::from_xyz([(2.0, 2.0, 0.5), (2.0, 18.0, 0.5), (18.0, 2.0, 0.5)]);
        let raster = |cull| {
            EdgeFunctionRasterizer::new(cull).fill_triangle(
                &front,
                viewport(20, 20),
                &BarycentricShader,
                &mut Vec::new(),
            )
        };
        assert!(matches!(raster(CullMode::None), Coverage::Covered(n) if n > 0));
        assert!(matches!(raster(CullMode::Back), Coverage::Covered(n) if n > 0));
        assert_eq!(raster(CullMode::Front), Coverage::Culled);
    }

    #[test]
    fn collinear_triangle_draws_nothing() {
        let tri = ScreenTriangle::from_xyz([(1.0, 1.0, 0.5), (5.0, 5.0, 0.5), (9.0, 9.0, 0.5)]);
        let mut sink = Vec::new();
        let coverage = EdgeFunctionRasterizer::default().fill_triangle(
            &tri,
            viewport(10, 10),
            &BarycentricShader,
            &mut sink,
        );
        assert_eq!(coverage, Coverage::Degenerate);
        assert!(sink.is_empty());
    }

    #[test]
    fn nan_vertex_is_degenerate() {
        let tri = ScreenTriangle::from_xyz([(f32::NAN, 1.0, 0.5), (5.0, 5.0, 0.5), (1.0, 9.0, 0.5)]);
        let coverage = EdgeFunctionRasterizer::default().fill_triangle(
            &tri,
            viewport(10, 10),
            &BarycentricShader,
            &mut Vec::new(),
        );
        assert_eq!(coverage, Coverage::Degenerate);
    }

    #[test]
    fn shared_edge_pixels_are_drawn_exactly_once() {
        // An 8x8 square split along its diagonal; pixel centers on the
        // diagonal lie exactly on the shared edge.
        let upper = ScreenTriangle::from_xyz([(0.0, 0.0, 0.5), (8.0, 0.0, 0.5), (8.0, 8.0, 0.5)]);
        let lower = ScreenTriangle::from_xyz([(0.0, 0.0, 0.5), (8.0, 8.0, 0.5), (0.0, 8.0, 0.5)]);

        let mut hits: HashMap<(i32, i32), usize> = HashMap::new();
        for tri in [&upper, &lower] {
            for f in fragments(tri, CullMode::None, 12, 12) {
                *hits.entry((f.x, f.y)).or_default() += 1;
            }
        }

        assert_eq!(hits.len(), 64);
        assert!(hits.values().all(|&n| n == 1));
        assert!(hits.keys().all(|&(x, y)| (0..8).contains(&x) && (0..8).contains(&y)));
    }

    #[test]
    fn shared_vertical_edge_is_drawn_exactly_once() {
        // Edge x = 4.5 passes through pixel centers of column 4.
        let left = ScreenTriangle::from_xyz([(0.0, 0.0, 0.5), (4.5, 0.0, 0.5), (4.5, 9.0, 0.5)]);
        let right = ScreenTriangle::from_xyz([(4.5, 0.0, 0.5), (9.0, 9.0, 0.5), (4.5, 9.0, 0.5)]);

        let mut hits: HashMap<(i32, i32), usize> = HashMap::new();
        for tri in [&left, &right] {
            for f in fragments(tri, CullMode::None, 12, 12) {
                *hits.entry((f.x, f.y)).or_default() += 1;
            }
        }
        assert!(hits.values().all(|&n| n == 1));
        for y in 0..9 {
            assert_eq!(hits.get(&(4, y)), Some(&1), "column 4 row {y}");
        }
    }

    #[test]
    fn bounding_box_is_clamped_to_viewport() {
        let tri = ScreenTriangle::from_xyz([(-50.0, -50.0, 0.5), (150.0, -50.0, 0.5), (-50.0, 150.0, 0.5)]);
        let frags = fragments(&tri, CullMode::None, 10, 10);
        assert_eq!(frags.len(), 100);
        assert!(frags.iter().all(|f| (0..10).contains(&f.x) && (0..10).contains(&f.y)));
    }

    #[test]
    fn offscreen_triangle_covers_nothing() {
        let tri = ScreenTriangle::from_xyz([(20.0, 20.0, 0.5), (30.0, 20.0, 0.5), (25.0, 30.0, 0.5)]);
        let coverage = EdgeFunctionRasterizer::default().fill_triangle(
            &tri,
            viewport(10, 10),
            &FlatShader::new(Color::new(9, 9, 9)),
            &mut Vec::new(),
        );
        assert_eq!(coverage, Coverage::Covered(0));
    }

    #[test]
    fn depth_is_interpolated_linearly() {
        // Depth varies along x only: z = x / 20.
        let tri = ScreenTriangle::from_xyz([(0.0, 0.0, 0.0), (20.0, 0.0, 1.0), (0.0, 20.0, 0.0)]);
        for f in fragments(&tri, CullMode::None, 20, 20) {
            assert_relative_eq!(f.depth, (f.x as f32 + 0.5) / 20.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn color_follows_vertex_order() {
        // A pixel right next to v1 is mostly green regardless of winding.
        let tri = ScreenTriangle::from_xyz([(0.0, 0.0, 0.5), (30.0, 0.0, 0.5), (0.0, 30.0, 0.5)]);
        let frags = fragments(&tri, CullMode::None, 32, 32);
        let near_v1 = frags.iter().find(|f| f.x == 28 && f.y == 0).unwrap();
        assert!(near_v1.color.g > 200);
        assert!(near_v1.color.r < 30 && near_v1.color.b < 30);
    }
}
