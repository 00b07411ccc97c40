//! Color sampling for surfaces
//!
//! A texture answers one question: what RGB color (0-255 scale) does a world
//! point have. Three samplers are provided:
//! - `SolidColor`: the same color everywhere
//! - `TextureImage`: an image laid over the unit square of the xy-plane,
//!   letterboxed onto a square with a background color
//! - `SphericalMap`: the same padded lookup driven by spherical coordinates

mod bitmap;
mod mapping;

pub use bitmap::*;
pub use mapping::*;

use std::fmt;

use crate::linalg::Vec3;

/// Anything that can color a point
pub trait Texture: fmt::Debug + Send + Sync {
    fn color(&self, point: Vec3) -> Vec3;
}

/// Constant color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor(pub Vec3);

impl Texture for SolidColor {
    fn color(&self, _point: Vec3) -> Vec3 {
        self.0
    }
}
