//! Projective rendering of a scene
//!
//! Surfaces are drawn from their flat meshes with colors shaded once per
//! vertex and interpolated across the face. Lines go last and ignore depth.

use log::{debug, trace};

use super::framebuffer::Framebuffer;
use super::types::DepthOrder;
use crate::error::RenderResult;
use crate::lighting::shade;
use crate::linalg::{Matrix, Vec3};
use crate::scene::{Camera, Scene};
use crate::surface::Surface;
use crate::transform::{projection, viewport, Projection};

/// Render the scene from its own camera
pub fn rasterize(scene: &Scene, width: usize, height: usize, mode: Projection) -> RenderResult<Framebuffer> {
    rasterize_from(scene, &scene.camera, width, height, mode)
}

/// Render the scene from an explicit camera pose
pub fn rasterize_from(
    scene: &Scene,
    camera: &Camera,
    width: usize,
    height: usize,
    mode: Projection,
) -> RenderResult<Framebuffer> {
    let proj = projection(mode, &scene.view_volume)?;
    let depth_order = DepthOrder::from_projection(&proj, &scene.view_volume)?;
    let m = viewport(width, height).checked_mul(&proj)?.checked_mul(&camera.view_matrix()?)?;

    debug!(
        "rasterize {}x{} {:?}: {} triangles, {} lines, {:?}",
        width,
        height,
        mode,
        scene.triangle_count(),
        scene.lines.len(),
        depth_order
    );

    let mut fb = Framebuffer::new(width, height, depth_order);

    for surface in &scene.surfaces {
        for tri in surface.mesh() {
            let [a, b, c] = tri.vertices;
            let (Some(pa), Some(pb), Some(pc)) = (project(&m, a)?, project(&m, b)?, project(&m, c)?) else {
                trace!("skipping triangle with a vertex in the eye plane");
                continue;
            };

            // Flat normal, per-vertex color
            let normal = tri.face_normal();
            let mut colors = [Vec3::ZERO; 3];
            for (color, vertex) in colors.iter_mut().zip(tri.vertices) {
                *color = shade(vertex, normal, tri.color(vertex), &scene.lighting, camera.origin)?;
            }
            fb.fill_triangle([pa, pb, pc], colors);
        }
    }

    for line in &scene.lines {
        let (Some(p0), Some(p1)) = (project(&m, line.from)?, project(&m, line.to)?) else {
            trace!("skipping line with an endpoint in the eye plane");
            continue;
        };
        fb.draw_line(p0.xy(), p1.xy(), line.color);
    }

    Ok(fb)
}

/// World point to (pixel x, pixel y, normalized depth); `None` when w = 0
fn project(m: &Matrix, p: Vec3) -> RenderResult<Option<Vec3>> {
    let clip = m.apply(p.extend(1.0))?;
    Ok(clip.perspective_divide().ok())
}
