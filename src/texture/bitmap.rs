//! Decoded RGB images backing the image textures

use std::fmt;
use std::path::Path;

use image::GenericImageView;

use crate::linalg::Vec3;

/// Row-major RGB grid, row 0 at the top
#[derive(Clone)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[u8; 3]>,
    pub name: String,
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Image {
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
            name: String::new(),
        }
    }

    /// Load any format the `image` crate decodes
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let path = path.as_ref();
        let img = image::open(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::from_dynamic(&img, name))
    }

    /// Decode from raw encoded bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self, image::ImageError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(&img, name))
    }

    fn from_dynamic(img: &image::DynamicImage, name: String) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.to_rgb8().pixels().map(|p| p.0).collect();
        Self {
            width: width as usize,
            height: height as usize,
            pixels,
            name,
        }
    }

    /// Create a checkerboard test image with `cell`-pixel squares
    pub fn checkerboard(width: usize, height: usize, cell: usize, a: [u8; 3], b: [u8; 3]) -> Self {
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / cell) + (y / cell)) % 2 == 0;
                pixels.push(if checker { a } else { b });
            }
        }
        Self {
            width,
            height,
            pixels,
            name: "checkerboard".to_string(),
        }
    }

    /// Get pixel at x,y as 0-255 RGB; black outside the image
    pub fn get_pixel(&self, x: usize, y: usize) -> Vec3 {
        if x < self.width && y < self.height {
            let [r, g, b] = self.pixels[y * self.width + x];
            Vec3::new(r as f64, g as f64, b as f64)
        } else {
            Vec3::ZERO
        }
    }
}
