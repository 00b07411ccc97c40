use std::f64::consts::PI;
use std::sync::Arc;

use super::{Ray, Surface, Triangle};
use crate::error::{RenderError, RenderResult};
use crate::linalg::Vec3;
use crate::texture::{SolidColor, Texture};

/// Coarsest tessellation that still encloses volume
pub const MIN_DETAIL: usize = 3;

/// Analytic sphere with a pre-built flat mesh
///
/// `detail` is both the number of longitude steps and the number of latitude
/// steps pole to pole. The mesh is built once and never changes.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    pub detail: usize,
    texture: Arc<dyn Texture>,
    mesh: Vec<Triangle>,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64, texture: Arc<dyn Texture>, detail: usize) -> RenderResult<Self> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(RenderError::DegenerateGeometry("sphere radius must be positive"));
        }
        if detail < MIN_DETAIL {
            return Err(RenderError::DegenerateGeometry("sphere detail must be at least 3"));
        }
        let mesh = tessellate(center, radius, detail, &texture)?;
        Ok(Self {
            center,
            radius,
            detail,
            texture,
            mesh,
        })
    }

    pub fn solid(center: Vec3, radius: f64, color: Vec3, detail: usize) -> RenderResult<Self> {
        Self::new(center, radius, Arc::new(SolidColor(color)), detail)
    }
}

/// Quad bands between interior latitude rings plus a fan at each pole
///
/// Every triangle is wound so its face normal points away from the center.
fn tessellate(center: Vec3, radius: f64, detail: usize, texture: &Arc<dyn Texture>) -> RenderResult<Vec<Triangle>> {
    let point = |lon: usize, ring: usize| {
        let theta = 2.0 * PI * (lon % detail) as f64 / detail as f64;
        let phi = -PI / 2.0 + PI * ring as f64 / detail as f64;
        center + Vec3::new(phi.cos() * theta.cos(), phi.cos() * theta.sin(), phi.sin()) * radius
    };
    let south = center - Vec3::new(0.0, 0.0, radius);
    let north = center + Vec3::new(0.0, 0.0, radius);
    let first_ring = 1;
    let last_ring = detail - 1;

    let mut mesh = Vec::with_capacity(2 * detail * (detail - 1));
    let mut push = |vertices: [Vec3; 3]| -> RenderResult<()> {
        mesh.push(Triangle::new(vertices, Arc::clone(texture))?);
        Ok(())
    };

    for lon in 0..detail {
        let next = lon + 1;
        push([south, point(next, first_ring), point(lon, first_ring)])?;
        for ring in first_ring..last_ring {
            let up = ring + 1;
            push([point(lon, ring), point(next, ring), point(lon, up)])?;
            push([point(next, ring), point(next, up), point(lon, up)])?;
        }
        push([north, point(lon, last_ring), point(next, last_ring)])?;
    }
    Ok(mesh)
}

impl Surface for Sphere {
    /// Solves |e + t·d − c|² = r² for the smallest positive t
    fn hit(&self, ray: &Ray) -> Option<f64> {
        let d = ray.direction;
        let ec = ray.origin - self.center;
        let a = d.dot(d);
        if a == 0.0 {
            return None;
        }
        let b = d.dot(ec);
        let discriminant = b * b - a * (ec.dot(ec) - self.radius * self.radius);
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = (-b - root) / a;
        let far = (-b + root) / a;
        if near > 0.0 {
            Some(near)
        } else if far > 0.0 {
            Some(far)
        } else {
            None
        }
    }

    fn normal(&self, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }

    fn color(&self, point: Vec3) -> Vec3 {
        self.texture.color(point)
    }

    fn mesh(&self) -> &[Triangle] {
        &self.mesh
    }
}
