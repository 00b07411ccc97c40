//! Framebuffer and scan conversion
//!
//! Drawing calls take screen coordinates with y pointing up, as produced by
//! the viewport transform. Storage is row-major with row 0 at the top of the
//! image, so every write goes through a y-flip.

use log::trace;

use super::types::{quantize, Color, DepthOrder};
use crate::linalg::{Tensor, Vec2, Vec3};

/// Below this, a line's extent along an axis counts as zero
const AXIS_EPSILON: f64 = 0.0001;

/// Auxiliary points for breaking ties on shared triangle edges
///
/// Not collinear, so any edge line misses at least one of them; the first
/// point off the line decides.
const TIE_BREAK_POINTS: [(f64, f64); 3] = [(-1.0, -1.0), (-1.0, -2.0), (-2.0, -1.0)];

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,   // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f64>, // Depth buffer
    pub width: usize,
    pub height: usize,
    depth_order: DepthOrder,
}

impl Framebuffer {
    /// Opaque black, depth buffer at the far sentinel
    pub fn new(width: usize, height: usize, depth_order: DepthOrder) -> Self {
        let mut fb = Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![depth_order.sentinel(); width * height],
            width,
            height,
            depth_order,
        };
        fb.clear(Color::BLACK);
        fb
    }

    /// Quantize a width × height × channels radiance tensor; missing color
    /// channels read as zero and a fourth channel becomes alpha
    pub fn from_tensor(tensor: &Tensor) -> Self {
        let (width, height, channels) = tensor.dim();
        let mut fb = Self::new(width, height, DepthOrder::GreaterIsNearer);
        for y in 0..height {
            for x in 0..width {
                let p = tensor.pixel(x, y);
                let channel = |i: usize| p.get(i).copied().unwrap_or(0.0);
                let mut color = Color::from_rgb(Vec3::new(channel(0), channel(1), channel(2)));
                if channels > 3 {
                    color.a = quantize(p[3]);
                }
                fb.set_pixel(x, y, color);
            }
        }
        fb
    }

    pub fn depth_order(&self) -> DepthOrder {
        self.depth_order
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        let sentinel = self.depth_order.sentinel();
        self.zbuffer.iter_mut().for_each(|z| *z = sentinel);
    }

    /// Write by storage index (row 0 = top)
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Read by storage index (row 0 = top)
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let p = &self.pixels[idx..idx + 4];
            Color::with_alpha(p[0], p[1], p[2], p[3])
        } else {
            Color::BLACK
        }
    }

    /// Read by screen coordinates (y up)
    pub fn screen_pixel(&self, x: i64, y: i64) -> Option<Color> {
        self.storage_index(x, y).map(|(sx, sy)| self.get_pixel(sx, sy))
    }

    /// Screen (y up) to storage (row 0 = top); `None` when off-screen
    fn storage_index(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((x as usize, self.height - 1 - y as usize))
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if let Some((sx, sy)) = self.storage_index(x, y) {
            self.set_pixel(sx, sy, color);
        }
    }

    /// Depth-tested write; returns true if the fragment won
    pub fn set_pixel_with_depth(&mut self, x: i64, y: i64, z: f64, color: Color) -> bool {
        if let Some((sx, sy)) = self.storage_index(x, y) {
            let idx = sy * self.width + sx;
            if self.depth_order.is_nearer(z, self.zbuffer[idx]) {
                self.zbuffer[idx] = z;
                self.set_pixel(sx, sy, color);
                return true;
            }
        }
        false
    }

    /// Unconditional write at possibly fractional screen coordinates
    ///
    /// A fractional axis is written at both its floor and its ceiling, so one
    /// call touches at most four pixels.
    pub fn plot(&mut self, x: f64, y: f64, color: Color) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        for px in axis_candidates(x) {
            for py in axis_candidates(y) {
                self.put(px, py, color);
            }
        }
    }

    /// Draw a line with the midpoint algorithm, one branch per slope regime
    ///
    /// Lines ignore depth and overwrite whatever is underneath. The walk is
    /// clipped to the screen, so cost follows the image size rather than the
    /// projected length.
    pub fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Color) {
        if !p0.is_finite() || !p1.is_finite() {
            trace!("dropping line with non-finite endpoint");
            return;
        }
        let (p0, p1) = if p0.x() > p1.x() { (p1, p0) } else { (p0, p1) };
        let (x0, y0, x1, y1) = (p0.x(), p0.y(), p1.x(), p1.y());

        let dx = x1 - x0;
        let dy = y1 - y0;
        if !dx.is_finite() || !dy.is_finite() {
            trace!("dropping line with overflowing extent");
            return;
        }

        if dx.abs() <= AXIS_EPSILON {
            let (lo, hi) = if y0 <= y1 { (p0, p1) } else { (p1, p0) };
            let Some((t0, t1)) = self.clip(lo, hi) else { return };
            let span = hi.y() - lo.y();
            let mut y = lo.y() + (t0 * span).floor();
            let end = if t1 < 1.0 { lo.y() + t1 * span } else { hi.y() };
            while y < end {
                self.plot(x0, y, color);
                y += 1.0;
            }
            return;
        }

        let Some((t0, t1)) = self.clip(p0, p1) else {
            trace!("line misses the screen");
            return;
        };

        if dy.abs() <= AXIS_EPSILON {
            let mut x = x0 + (t0 * dx).floor();
            let end = if t1 < 1.0 { x0 + t1 * dx } else { x1 };
            while x < end {
                self.plot(x, y0, color);
                x += 1.0;
            }
            return;
        }

        let m = dy / dx;
        // Implicit line: zero on the line, positive above it
        let f = |x: f64, y: f64| -dy * x + dx * y + x0 * y1 - x1 * y0;

        if m > -1.0 && m <= 1.0 {
            // x-major: whole steps along x up to the clipped start
            let skip = (t0 * dx).floor();
            let mut x = x0 + skip;
            let mut y = y0 + skip * m;
            let end = if t1 < 1.0 { x0 + t1 * dx } else { x1 };
            if m >= 0.0 {
                let mut d = f(x + 1.0, y + 0.5);
                while x < end {
                    self.plot(x, y, color);
                    if d < 0.0 {
                        y += 1.0;
                        d += dx - dy;
                    } else {
                        d -= dy;
                    }
                    x += 1.0;
                }
            } else {
                let mut d = f(x + 1.0, y - 0.5);
                while x < end {
                    self.plot(x, y, color);
                    if d > 0.0 {
                        y -= 1.0;
                        d -= dx + dy;
                    } else {
                        d -= dy;
                    }
                    x += 1.0;
                }
            }
        } else {
            // y-major: whole steps along y up to the clipped start
            let skip = (t0 * dy.abs()).floor();
            let mut y = y0 + skip * dy.signum();
            let mut x = x0 + (y - y0) / m;
            let end = if t1 < 1.0 { y0 + t1 * dy } else { y1 };
            if m > 1.0 {
                let mut d = f(x + 0.5, y + 1.0);
                while y < end {
                    self.plot(x, y, color);
                    if d > 0.0 {
                        x += 1.0;
                        d += dx - dy;
                    } else {
                        d += dx;
                    }
                    y += 1.0;
                }
            } else {
                let mut d = f(x + 0.5, y - 1.0);
                while y > end {
                    self.plot(x, y, color);
                    if d < 0.0 {
                        x += 1.0;
                        d -= dx + dy;
                    } else {
                        d -= dx;
                    }
                    y -= 1.0;
                }
            }
        }
    }

    /// Liang-Barsky clip of `p0 + t·(p1 − p0)` against the screen grown by one
    /// pixel on every side; `None` when the segment misses it
    fn clip(&self, p0: Vec2, p1: Vec2) -> Option<(f64, f64)> {
        let (dx, dy) = (p1.x() - p0.x(), p1.y() - p0.y());
        let (w, h) = (self.width as f64, self.height as f64);
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        for (p, q) in [(-dx, p0.x() + 1.0), (dx, w - p0.x()), (-dy, p0.y() + 1.0), (dy, h - p0.y())] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
        (t0 <= t1).then_some((t0, t1))
    }

    /// Scan-convert a screen-space triangle with per-vertex colors
    ///
    /// `vertices` carry (x, y, depth); colors are 0-255 RGB and interpolated
    /// with the barycentric weights, as is depth.
    pub fn fill_triangle(&mut self, vertices: [Vec3; 3], colors: [Vec3; 3]) {
        let [(x0, y0), (x1, y1), (x2, y2)] = vertices.map(|v| (v.x(), v.y()));

        let f01 = |x: f64, y: f64| (y0 - y1) * x + (x1 - x0) * y + x0 * y1 - x1 * y0;
        let f12 = |x: f64, y: f64| (y1 - y2) * x + (x2 - x1) * y + x1 * y2 - x2 * y1;
        let f20 = |x: f64, y: f64| (y2 - y0) * x + (x0 - x2) * y + x2 * y0 - x0 * y2;

        // Each is twice the signed area
        let f_alpha = f12(x0, y0);
        let f_beta = f20(x1, y1);
        let f_gamma = f01(x2, y2);
        if f_alpha == 0.0 || f_beta == 0.0 || f_gamma == 0.0 || !f_alpha.is_finite() {
            trace!("skipping zero-area triangle");
            return;
        }

        let owns_alpha_edge = owns_edge(f_alpha, f12);
        let owns_beta_edge = owns_edge(f_beta, f20);
        let owns_gamma_edge = owns_edge(f_gamma, f01);

        // Bounding box, clipped to the screen since off-screen writes drop anyway
        let x_min = x0.min(x1).min(x2).floor().max(0.0) as i64;
        let x_max = x0.max(x1).max(x2).ceil().min(self.width as f64 - 1.0) as i64;
        let y_min = y0.min(y1).min(y2).floor().max(0.0) as i64;
        let y_max = y0.max(y1).max(y2).ceil().min(self.height as f64 - 1.0) as i64;

        let [c0, c1, c2] = colors;
        let [z0, z1, z2] = vertices.map(|v| v.z());

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let (px, py) = (x as f64, y as f64);
                let alpha = f12(px, py) / f_alpha;
                let beta = f20(px, py) / f_beta;
                let gamma = f01(px, py) / f_gamma;

                if alpha < 0.0 || beta < 0.0 || gamma < 0.0 {
                    continue;
                }
                if (alpha > 0.0 || owns_alpha_edge)
                    && (beta > 0.0 || owns_beta_edge)
                    && (gamma > 0.0 || owns_gamma_edge)
                {
                    let color = c0 * alpha + c1 * beta + c2 * gamma;
                    let z = z0 * alpha + z1 * beta + z2 * gamma;
                    self.set_pixel_with_depth(x, y, z, Color::from_rgb(color));
                }
            }
        }
    }
}

/// True when the opposite vertex and the first tie-break point off the edge
/// line are on the same side of it
///
/// Two triangles sharing an edge evaluate the same line with opposite signs
/// and see the same tie-break point, so exactly one of them owns the edge.
fn owns_edge(f_opposite: f64, edge: impl Fn(f64, f64) -> f64) -> bool {
    TIE_BREAK_POINTS
        .iter()
        .map(|&(x, y)| edge(x, y))
        .find(|&side| side != 0.0)
        .is_some_and(|side| f_opposite * side > 0.0)
}

/// Integer pixels a coordinate resolves to: itself, or its floor and ceiling
fn axis_candidates(v: f64) -> impl Iterator<Item = i64> {
    let lo = v.floor();
    let hi = v.ceil();
    let n = if lo == hi { 1 } else { 2 };
    [lo as i64, hi as i64].into_iter().take(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Vec3 = Vec3::new(255.0, 0.0, 0.0);
    const BLUE: Vec3 = Vec3::new(0.0, 0.0, 255.0);

    fn is_red(c: Option<Color>) -> bool {
        matches!(c, Some(c) if c.r >= 254 && c.g == 0 && c.b == 0)
    }

    fn is_blue(c: Option<Color>) -> bool {
        matches!(c, Some(c) if c.b >= 254 && c.r == 0 && c.g == 0)
    }

    fn lit_pixels(fb: &Framebuffer) -> Vec<(i64, i64)> {
        let mut out = Vec::new();
        for y in 0..fb.height as i64 {
            for x in 0..fb.width as i64 {
                if fb.screen_pixel(x, y) != Some(Color::BLACK) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_new_buffer_is_black_and_far() {
        let fb = Framebuffer::new(3, 2, DepthOrder::LessIsNearer);
        assert!(fb.pixels.chunks(4).all(|p| p == [0, 0, 0, 255]));
        assert!(fb.zbuffer.iter().all(|z| *z == f64::INFINITY));
    }

    #[test]
    fn test_plot_flips_rows() {
        let mut fb = Framebuffer::new(4, 4, DepthOrder::GreaterIsNearer);
        fb.plot(1.0, 0.0, Color::WHITE);
        assert_eq!(fb.get_pixel(1, 3), Color::WHITE);
        assert_eq!(fb.screen_pixel(1, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_plot_fractional_writes_floor_and_ceiling() {
        let mut fb = Framebuffer::new(8, 8, DepthOrder::GreaterIsNearer);
        fb.plot(2.5, 4.0, Color::WHITE);
        assert_eq!(lit_pixels(&fb), vec![(2, 4), (3, 4)]);

        let mut fb = Framebuffer::new(8, 8, DepthOrder::GreaterIsNearer);
        fb.plot(2.5, 4.25, Color::WHITE);
        assert_eq!(lit_pixels(&fb), vec![(2, 4), (3, 4), (2, 5), (3, 5)]);
    }

    #[test]
    fn test_plot_out_of_bounds_is_dropped() {
        let mut fb = Framebuffer::new(4, 4, DepthOrder::GreaterIsNearer);
        fb.plot(-1.0, 2.0, Color::WHITE);
        fb.plot(4.0, 2.0, Color::WHITE);
        fb.plot(1.0, 99.0, Color::WHITE);
        fb.plot(f64::NAN, 1.0, Color::WHITE);
        fb.plot(-0.5, 0.0, Color::WHITE);
        assert_eq!(lit_pixels(&fb), vec![(0, 0)]);
    }

    #[test]
    fn test_line_shallow_positive_slope() {
        let mut fb = Framebuffer::new(16, 16, DepthOrder::GreaterIsNearer);
        fb.draw_line(Vec2::new(0.0, 0.0), Vec2::new(8.0, 4.0), Color::WHITE);
        let lit = lit_pixels(&fb);
        assert_eq!(lit.len(), 8);
        // One pixel per column, y never decreasing, within half a pixel of the line
        for (x, y) in lit {
            assert!(((y as f64) - (x as f64) * 0.5).abs() <= 0.5 + 1e-9);
        }
    }

    #[test]
    fn test_line_steep_and_negative_slopes() {
        let cases = [
            (Vec2::new(2.0, 1.0), Vec2::new(5.0, 12.0)),  // m > 1
            (Vec2::new(1.0, 9.0), Vec2::new(13.0, 4.0)),  // -1 < m < 0
            (Vec2::new(3.0, 14.0), Vec2::new(6.0, 2.0)),  // m <= -1
            (Vec2::new(12.0, 3.0), Vec2::new(1.0, 8.0)),  // reversed endpoints
        ];
        for (p, q) in cases {
            let mut fb = Framebuffer::new(16, 16, DepthOrder::GreaterIsNearer);
            fb.draw_line(p, q, Color::WHITE);
            let lit = lit_pixels(&fb);
            let steps = (q.x() - p.x()).abs().max((q.y() - p.y()).abs()) as usize;
            assert_eq!(lit.len(), steps, "line {:?} -> {:?}", p, q);

            // Every pixel lies within one pixel of the ideal line
            let (dx, dy) = (q.x() - p.x(), q.y() - p.y());
            let len = (dx * dx + dy * dy).sqrt();
            for (x, y) in lit {
                let dist = ((x as f64 - p.x()) * dy - (y as f64 - p.y()) * dx).abs() / len;
                assert!(dist <= 1.0, "pixel ({}, {}) is {} from the line", x, y, dist);
            }
        }
    }

    #[test]
    fn test_line_axis_aligned() {
        let mut fb = Framebuffer::new(10, 10, DepthOrder::GreaterIsNearer);
        fb.draw_line(Vec2::new(3.0, 7.0), Vec2::new(3.0, 2.0), Color::WHITE);
        assert_eq!(lit_pixels(&fb), (2..7).map(|y| (3, y)).collect::<Vec<_>>());

        let mut fb = Framebuffer::new(10, 10, DepthOrder::GreaterIsNearer);
        fb.draw_line(Vec2::new(1.0, 5.0), Vec2::new(6.0, 5.0), Color::WHITE);
        assert_eq!(lit_pixels(&fb), (1..6).map(|x| (x, 5)).collect::<Vec<_>>());
    }

    #[test]
    fn test_line_far_past_the_screen_is_clipped() {
        // Walking the full length would take ~1e15 steps
        let mut fb = Framebuffer::new(16, 16, DepthOrder::GreaterIsNearer);
        fb.draw_line(Vec2::new(5.0, 5.0), Vec2::new(1e15, 5.0 + 0.3e15), Color::WHITE);
        assert_eq!(fb.screen_pixel(5, 5), Some(Color::WHITE));
        for x in 5..16 {
            assert!((0..16).any(|y| fb.screen_pixel(x, y) == Some(Color::WHITE)), "column {} empty", x);
        }
    }

    #[test]
    fn test_line_crossing_from_far_outside() {
        let mut fb = Framebuffer::new(16, 16, DepthOrder::GreaterIsNearer);
        fb.draw_line(Vec2::new(-1e12, 4.0), Vec2::new(1e12, 6.0), Color::WHITE);
        for x in 0..16 {
            assert_eq!(fb.screen_pixel(x, 5), Some(Color::WHITE), "column {}", x);
        }

        let mut fb = Framebuffer::new(16, 16, DepthOrder::GreaterIsNearer);
        fb.draw_line(Vec2::new(3.0, 1e15), Vec2::new(3.0, -1e15), Color::WHITE);
        assert_eq!(lit_pixels(&fb), (0..16).map(|y| (3, y)).collect::<Vec<_>>());

        // Entirely off-screen
        let mut fb = Framebuffer::new(16, 16, DepthOrder::GreaterIsNearer);
        fb.draw_line(Vec2::new(-1e12, 40.0), Vec2::new(1e12, 60.0), Color::WHITE);
        assert!(lit_pixels(&fb).is_empty());
    }

    #[test]
    fn test_line_overwrites_regardless_of_depth() {
        let mut fb = Framebuffer::new(8, 8, DepthOrder::GreaterIsNearer);
        fb.set_pixel_with_depth(2, 3, 100.0, Color::WHITE);
        fb.draw_line(Vec2::new(0.0, 3.0), Vec2::new(6.0, 3.0), Color::MAGENTA);
        assert_eq!(fb.screen_pixel(2, 3), Some(Color::MAGENTA));
    }

    #[test]
    fn test_triangle_covers_exactly_barycentric_pixels() {
        let mut fb = Framebuffer::new(16, 16, DepthOrder::GreaterIsNearer);
        let v = [
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(12.0, 2.0, 0.0),
            Vec3::new(2.0, 12.0, 0.0),
        ];
        fb.fill_triangle(v, [RED; 3]);

        // Pixel centers strictly inside, plus the hypotenuse, which faces away
        // from the tie-break point; the legs at x = 2 and y = 2 face toward it
        let mut expected = Vec::new();
        for y in 0..16i64 {
            for x in 0..16i64 {
                if x > 2 && y > 2 && x + y <= 14 {
                    expected.push((x, y));
                }
            }
        }
        assert_eq!(lit_pixels(&fb), expected);
        assert_eq!(expected.len(), 45);
        assert!(is_red(fb.screen_pixel(3, 3)));
    }

    #[test]
    fn test_shared_edge_drawn_once() {
        // Two triangles splitting a rectangle along its diagonal
        let a = [Vec3::new(1.0, 1.0, 0.0), Vec3::new(9.0, 1.0, 0.0), Vec3::new(9.0, 5.0, 0.0)];
        let b = [Vec3::new(1.0, 1.0, 0.0), Vec3::new(9.0, 5.0, 0.0), Vec3::new(1.0, 5.0, 0.0)];

        let mut first = Framebuffer::new(12, 12, DepthOrder::GreaterIsNearer);
        first.fill_triangle(a, [RED; 3]);
        let mut second = Framebuffer::new(12, 12, DepthOrder::GreaterIsNearer);
        second.fill_triangle(b, [BLUE; 3]);

        let covered_a = lit_pixels(&first);
        let covered_b = lit_pixels(&second);
        for p in &covered_a {
            assert!(!covered_b.contains(p), "pixel {:?} drawn by both triangles", p);
        }
        // Pixel centers on the diagonal belong to exactly one of them
        for p in [(3, 2), (5, 3), (7, 4)] {
            assert!(covered_a.contains(&p) ^ covered_b.contains(&p));
        }
    }

    #[test]
    fn test_shared_edge_through_tie_break_point_has_no_crack() {
        // The shared diagonal lies on y = x, which passes through (-1, -1)
        let a = [Vec3::new(2.0, 2.0, 0.0), Vec3::new(10.0, 2.0, 0.0), Vec3::new(10.0, 10.0, 0.0)];
        let b = [Vec3::new(2.0, 2.0, 0.0), Vec3::new(10.0, 10.0, 0.0), Vec3::new(2.0, 10.0, 0.0)];

        let mut first = Framebuffer::new(12, 12, DepthOrder::GreaterIsNearer);
        first.fill_triangle(a, [RED; 3]);
        let mut second = Framebuffer::new(12, 12, DepthOrder::GreaterIsNearer);
        second.fill_triangle(b, [BLUE; 3]);

        let covered_a = lit_pixels(&first);
        let covered_b = lit_pixels(&second);
        for k in 3..=9 {
            let p = (k, k);
            assert!(covered_a.contains(&p) ^ covered_b.contains(&p), "diagonal pixel {:?}", p);
        }
        for y in 3..=9 {
            for x in 3..=9 {
                let p = (x, y);
                assert!(covered_a.contains(&p) ^ covered_b.contains(&p), "pixel {:?}", p);
            }
        }
    }

    #[test]
    fn test_nearer_triangle_wins_in_either_order() {
        let near = [Vec3::new(0.0, 0.0, 0.5), Vec3::new(10.0, 0.0, 0.5), Vec3::new(0.0, 10.0, 0.5)];
        let far = [Vec3::new(1.0, 1.0, -0.5), Vec3::new(11.0, 1.0, -0.5), Vec3::new(1.0, 11.0, -0.5)];

        for near_first in [true, false] {
            let mut fb = Framebuffer::new(12, 12, DepthOrder::GreaterIsNearer);
            if near_first {
                fb.fill_triangle(near, [RED; 3]);
                fb.fill_triangle(far, [BLUE; 3]);
            } else {
                fb.fill_triangle(far, [BLUE; 3]);
                fb.fill_triangle(near, [RED; 3]);
            }
            // Overlap region
            assert!(is_red(fb.screen_pixel(3, 3)));
            assert!(is_red(fb.screen_pixel(5, 4)));
            // Only the far triangle reaches here
            assert!(is_blue(fb.screen_pixel(9, 2)));
        }
    }

    #[test]
    fn test_less_is_nearer_order() {
        let a = [Vec3::new(0.0, 0.0, 0.2), Vec3::new(8.0, 0.0, 0.2), Vec3::new(0.0, 8.0, 0.2)];
        let b = [Vec3::new(0.0, 0.0, 0.7), Vec3::new(8.0, 0.0, 0.7), Vec3::new(0.0, 8.0, 0.7)];
        let mut fb = Framebuffer::new(10, 10, DepthOrder::LessIsNearer);
        fb.fill_triangle(b, [BLUE; 3]);
        fb.fill_triangle(a, [RED; 3]);
        assert!(is_red(fb.screen_pixel(2, 2)));
    }

    #[test]
    fn test_colors_are_interpolated() {
        let mut fb = Framebuffer::new(16, 16, DepthOrder::GreaterIsNearer);
        let v = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(15.0, 0.0, 0.0), Vec3::new(0.0, 15.0, 0.0)];
        let black = Vec3::ZERO;
        let white = Vec3::new(255.0, 255.0, 255.0);
        fb.fill_triangle(v, [black, white, black]);
        let left = fb.screen_pixel(1, 1).unwrap();
        let right = fb.screen_pixel(12, 1).unwrap();
        assert!(right.r > left.r);
    }

    #[test]
    fn test_zero_area_triangle_is_skipped() {
        let mut fb = Framebuffer::new(8, 8, DepthOrder::GreaterIsNearer);
        let v = [Vec3::new(1.0, 1.0, 0.0), Vec3::new(3.0, 3.0, 0.0), Vec3::new(5.0, 5.0, 0.0)];
        fb.fill_triangle(v, [RED; 3]);
        assert!(lit_pixels(&fb).is_empty());
    }

    #[test]
    fn test_from_tensor_quantizes() {
        let mut t = Tensor::zeros(2, 1, 3);
        t.set_pixel(1, 0, &[300.0, 10.7, -3.0]);
        let fb = Framebuffer::from_tensor(&t);
        assert_eq!(fb.get_pixel(0, 0), Color::BLACK);
        assert_eq!(fb.get_pixel(1, 0), Color::new(255, 10, 0));
    }
}
