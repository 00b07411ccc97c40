use std::slice;
use std::sync::Arc;

use super::{Ray, Surface};
use crate::error::RenderResult;
use crate::linalg::Vec3;
use crate::texture::{SolidColor, Texture};

/// Below this the ray is treated as parallel to the triangle plane
const PARALLEL_EPSILON: f64 = 1e-12;

/// Flat triangle; the normal follows the vertex winding (right-hand rule)
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    normal: Vec3,
    texture: Arc<dyn Texture>,
}

impl Triangle {
    /// Fails when the vertices are collinear
    pub fn new(vertices: [Vec3; 3], texture: Arc<dyn Texture>) -> RenderResult<Self> {
        let [v0, v1, v2] = vertices;
        let normal = (v1 - v0).cross(v2 - v0).normalize()?;
        Ok(Self {
            vertices,
            normal,
            texture,
        })
    }

    pub fn solid(vertices: [Vec3; 3], color: Vec3) -> RenderResult<Self> {
        Self::new(vertices, Arc::new(SolidColor(color)))
    }

    pub fn face_normal(&self) -> Vec3 {
        self.normal
    }

    pub fn texture(&self) -> &Arc<dyn Texture> {
        &self.texture
    }
}

impl Surface for Triangle {
    /// Möller–Trumbore
    fn hit(&self, ray: &Ray) -> Option<f64> {
        let [v0, v1, v2] = self.vertices;
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        (t > 0.0).then_some(t)
    }

    fn normal(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn color(&self, point: Vec3) -> Vec3 {
        self.texture.color(point)
    }

    fn mesh(&self) -> &[Triangle] {
        slice::from_ref(self)
    }
}
