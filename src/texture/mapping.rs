//! Image-backed samplers

use std::f64::consts::PI;
use std::sync::Arc;

use super::{Image, Texture};
use crate::linalg::{Vec2, Vec3};

/// Image over the unit square with letterbox padding
///
/// Non-square images are centered on a square of side max(width, height);
/// the padding bands, and everything outside [0, 1]², show `background`.
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub background: Vec3,
    pub image: Arc<Image>,
}

impl TextureImage {
    pub fn new(background: Vec3, image: Arc<Image>) -> Self {
        Self { background, image }
    }

    /// Padded lookup; `v` grows upward, image rows grow downward
    pub fn sample_padded(&self, u: f64, v: f64) -> Vec3 {
        let (w, h) = (self.image.width as f64, self.image.height as f64);
        if w == 0.0 || h == 0.0 || !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return self.background;
        }

        let side = w.max(h);
        let x_padding = (side - w) / 2.0;
        let y_padding = (side - h) / 2.0;

        // u = 1 or v = 0 would land one past the last texel
        let px = (u * side).trunc().min(side - 1.0);
        let py = ((1.0 - v) * side).trunc().min(side - 1.0);

        if px < x_padding || px >= x_padding + w || py < y_padding || py >= y_padding + h {
            return self.background;
        }
        let x = ((px - x_padding) as usize).min(self.image.width - 1);
        let y = ((py - y_padding) as usize).min(self.image.height - 1);
        self.image.get_pixel(x, y)
    }
}

impl Texture for TextureImage {
    /// Planar projection onto the xy-plane
    fn color(&self, point: Vec3) -> Vec3 {
        self.sample_padded(point.x(), point.y())
    }
}

/// Wraps an image around a sphere
#[derive(Debug, Clone)]
pub struct SphericalMap {
    pub center: Vec3,
    pub radius: f64,
    pub image: TextureImage,
}

impl SphericalMap {
    pub fn new(center: Vec3, radius: f64, image: TextureImage) -> Self {
        Self { center, radius, image }
    }

    /// θ is measured from +z, φ around z starting at -x
    pub fn uv(&self, point: Vec3) -> Vec2 {
        let d = point - self.center;
        let theta = (d.z() / self.radius).clamp(-1.0, 1.0).acos();
        let phi = d.y().atan2(d.x()) + PI;
        Vec2::new(phi / (2.0 * PI), (PI - theta) / PI)
    }
}

impl Texture for SphericalMap {
    fn color(&self, point: Vec3) -> Vec3 {
        let uv = self.uv(point);
        self.image.sample_padded(uv.x(), uv.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Vec3 = Vec3::new(1.0, 2.0, 3.0);

    /// Each texel encodes its own coordinates: (x, y, 0)
    fn coordinate_image(width: usize, height: usize) -> Arc<Image> {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.push([x as u8, y as u8, 100]);
            }
        }
        Arc::new(Image::new(width, height, pixels))
    }

    #[test]
    fn test_square_image_has_no_padding() {
        let t = TextureImage::new(BG, coordinate_image(4, 4));
        // Top-left texel sits at u = 0, v = 1
        assert_eq!(t.sample_padded(0.0, 1.0), Vec3::new(0.0, 0.0, 100.0));
        assert_eq!(t.sample_padded(0.99, 0.01), Vec3::new(3.0, 3.0, 100.0));
        assert_eq!(t.sample_padded(1.0, 0.0), Vec3::new(3.0, 3.0, 100.0));
        assert_eq!(t.sample_padded(0.3, 0.6), Vec3::new(1.0, 1.0, 100.0));
    }

    #[test]
    fn test_wide_image_is_letterboxed_vertically() {
        // 4 wide, 2 tall: one padding row above and below on a 4x4 square
        let t = TextureImage::new(BG, coordinate_image(4, 2));
        assert_eq!(t.sample_padded(0.5, 0.9), BG);
        assert_eq!(t.sample_padded(0.5, 0.1), BG);
        assert_eq!(t.sample_padded(0.5, 0.6), Vec3::new(2.0, 0.0, 100.0));
        assert_eq!(t.sample_padded(0.5, 0.4), Vec3::new(2.0, 1.0, 100.0));
    }

    #[test]
    fn test_tall_image_is_pillarboxed() {
        let t = TextureImage::new(BG, coordinate_image(2, 4));
        assert_eq!(t.sample_padded(0.1, 0.5), BG);
        assert_eq!(t.sample_padded(0.9, 0.5), BG);
        assert_eq!(t.sample_padded(0.3, 0.99), Vec3::new(0.0, 0.0, 100.0));
        assert_eq!(t.sample_padded(0.6, 0.99), Vec3::new(1.0, 0.0, 100.0));
    }

    #[test]
    fn test_outside_unit_square_is_background() {
        let t = TextureImage::new(BG, coordinate_image(4, 4));
        assert_eq!(t.sample_padded(-0.1, 0.5), BG);
        assert_eq!(t.sample_padded(0.5, 1.5), BG);
        assert_eq!(t.color(Vec3::new(2.0, 0.5, 7.0)), BG);
    }

    #[test]
    fn test_spherical_uv() {
        let map = SphericalMap::new(
            Vec3::new(1.0, 1.0, 1.0),
            2.0,
            TextureImage::new(BG, coordinate_image(4, 4)),
        );
        // North pole: v = 1
        let north = map.uv(Vec3::new(1.0, 1.0, 3.0));
        assert!((north.y() - 1.0).abs() < 1e-12);
        // South pole: v = 0
        let south = map.uv(Vec3::new(1.0, 1.0, -1.0));
        assert!(south.y().abs() < 1e-12);
        // Equator on +x: phi = 0 + pi, so u = 0.5, v = 0.5
        let east = map.uv(Vec3::new(3.0, 1.0, 1.0));
        assert!((east.x() - 0.5).abs() < 1e-12);
        assert!((east.y() - 0.5).abs() < 1e-12);
        // Equator on +y: u = 0.75
        let north_y = map.uv(Vec3::new(1.0, 3.0, 1.0));
        assert!((north_y.x() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_spherical_color_samples_image() {
        let map = SphericalMap::new(Vec3::ZERO, 1.0, TextureImage::new(BG, coordinate_image(4, 4)));
        // u = 0.75, v = 0.5 -> column 3, row 2
        assert_eq!(map.color(Vec3::new(0.0, 1.0, 0.0)), Vec3::new(3.0, 2.0, 100.0));
    }
}
