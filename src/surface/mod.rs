//! Renderable geometry
//!
//! Every surface answers four questions: where a ray first hits it, what its
//! outward normal is at a point, what color it has there, and which flat
//! triangles approximate it. The ray tracer uses the first three, the
//! rasterizer only the mesh.

mod sphere;
mod triangle;

pub use sphere::*;
pub use triangle::*;

use std::fmt;
use std::sync::Arc;

use crate::linalg::Vec3;

/// Half-line `origin + t * direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Geometry the render pipelines can draw
pub trait Surface: fmt::Debug + Send + Sync {
    /// Smallest strictly positive ray parameter, if any
    fn hit(&self, ray: &Ray) -> Option<f64>;

    /// Unit outward normal at a point on the surface
    fn normal(&self, point: Vec3) -> Vec3;

    /// 0-255 RGB color at a point on the surface
    fn color(&self, point: Vec3) -> Vec3;

    /// Flat triangles approximating the surface, in draw order
    fn mesh(&self) -> &[Triangle];
}

/// First surface along the ray; ties go to the earlier surface
pub fn nearest_hit<'a>(surfaces: &'a [Arc<dyn Surface>], ray: &Ray) -> Option<(&'a dyn Surface, f64)> {
    let mut best: Option<(&'a dyn Surface, f64)> = None;
    for surface in surfaces {
        if let Some(t) = surface.hit(ray) {
            if t > 0.0 && best.map_or(true, |(_, best_t)| t < best_t) {
                best = Some((surface.as_ref(), t));
            }
        }
    }
    best
}
