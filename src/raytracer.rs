//! Ray casting: one ray per pixel, analytic hits, per-point shading
//!
//! The image plane passes through the eye and is spanned by `right` and `up`,
//! derived from the camera's direction and top vectors. Orthographic rays
//! start on that plane and run parallel to the view direction; perspective
//! rays start at the eye and pass through the plane shifted `plane_distance`
//! forward.

use log::debug;

use crate::error::RenderResult;
use crate::lighting::shade;
use crate::linalg::{Tensor, Vec3};
use crate::rasterizer::Framebuffer;
use crate::scene::{Camera, Scene};
use crate::surface::{nearest_hit, Ray};
use crate::transform::Projection;

const OPAQUE: f64 = 255.0;

/// Render the scene from its own camera
pub fn raytrace(scene: &Scene, width: usize, height: usize, mode: Projection) -> RenderResult<Framebuffer> {
    raytrace_from(scene, &scene.camera, width, height, mode)
}

/// Render the scene from an explicit camera pose
pub fn raytrace_from(
    scene: &Scene,
    camera: &Camera,
    width: usize,
    height: usize,
    mode: Projection,
) -> RenderResult<Framebuffer> {
    let direction = camera.direction.normalize()?;
    let right = direction.cross(camera.top).normalize()?;
    let up = right.cross(direction);

    debug!(
        "raytrace {}x{} {:?}: {} surfaces, {} lights",
        width,
        height,
        mode,
        scene.surfaces.len(),
        scene.lighting.lights.len()
    );

    let center_x = (width as f64 - 1.0) / 2.0;
    let center_y = (height as f64 - 1.0) / 2.0;
    let mut radiance = Tensor::zeros(width, height, 4);

    for row in 0..height {
        for col in 0..width {
            let u = (col as f64 - center_x) * camera.pixel_size;
            let v = (center_y - row as f64) * camera.pixel_size;
            let offset = right * u + up * v;

            let ray = match mode {
                Projection::Orthographic => Ray::new(camera.origin + offset, direction),
                Projection::Perspective => {
                    Ray::new(camera.origin, (offset + direction * camera.plane_distance).normalize()?)
                }
            };

            let color = match nearest_hit(&scene.surfaces, &ray) {
                Some((surface, t)) => {
                    let p = ray.at(t);
                    shade(p, surface.normal(p), surface.color(p), &scene.lighting, ray.origin)?
                }
                None => Vec3::ZERO,
            };
            radiance.set_pixel(col, row, &[color.x(), color.y(), color.z(), OPAQUE]);
        }
    }

    Ok(Framebuffer::from_tensor(&radiance))
}
