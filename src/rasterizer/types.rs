//! Core types for the rasterizer

use crate::error::{RenderError, RenderResult};
use crate::linalg::{Matrix, Vec3, Vec4};
use crate::transform::ViewVolume;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const MAGENTA: Color = Color { r: 255, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Quantize a shaded 0-255 RGB value: truncate toward zero, then clamp
    pub fn from_rgb(c: Vec3) -> Self {
        Self::new(quantize(c.x()), quantize(c.y()), quantize(c.z()))
    }

    pub fn to_rgb(self) -> Vec3 {
        Vec3::new(self.r as f64, self.g as f64, self.b as f64)
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

pub(crate) fn quantize(v: f64) -> u8 {
    // `as` saturates and maps NaN to 0
    v.trunc().clamp(0.0, 255.0) as u8
}

/// Which way "nearer" points in normalized depth
///
/// Depends on the sign convention of the projection in use, so it is derived
/// from the concrete matrix rather than assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthOrder {
    GreaterIsNearer,
    LessIsNearer,
}

impl DepthOrder {
    /// Depth buffer initial value, farther than anything
    pub fn sentinel(self) -> f64 {
        match self {
            DepthOrder::GreaterIsNearer => f64::NEG_INFINITY,
            DepthOrder::LessIsNearer => f64::INFINITY,
        }
    }

    /// Strictly-nearer test
    pub fn is_nearer(self, candidate: f64, stored: f64) -> bool {
        match self {
            DepthOrder::GreaterIsNearer => candidate > stored,
            DepthOrder::LessIsNearer => candidate < stored,
        }
    }

    /// Push two points on the view axis through `projection` and compare
    ///
    /// The camera looks down -w, so of two points in front of the eye the one
    /// with greater camera z is physically nearer. Probes are the near and far
    /// planes; a plane at or behind the eye is replaced by a point halfway
    /// between the eye and the other plane.
    pub fn from_projection(projection: &Matrix, volume: &ViewVolume) -> RenderResult<Self> {
        let depth = |z: f64| -> RenderResult<f64> {
            Ok(projection
                .apply(Vec4::new(0.0, 0.0, z, 1.0))?
                .perspective_divide()?
                .z())
        };
        let farther = volume.near.min(volume.far);
        let mut nearer = volume.near.max(volume.far);
        if nearer >= 0.0 && farther < 0.0 {
            nearer = farther / 2.0;
        }
        let near = depth(nearer)?;
        let far = depth(farther)?;
        if near > far {
            Ok(DepthOrder::GreaterIsNearer)
        } else if near < far {
            Ok(DepthOrder::LessIsNearer)
        } else {
            Err(RenderError::DegenerateGeometry("near and far planes project to the same depth"))
        }
    }
}
