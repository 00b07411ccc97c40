//! Camera orbits and sequential frame rendering
//!
//! Each frame is a full render of the same scene from a different camera
//! pose; the scene itself is never touched.

use std::f64::consts::PI;

use log::debug;

use crate::error::RenderResult;
use crate::linalg::Vec3;
use crate::rasterizer::{rasterize_from, Framebuffer};
use crate::raytracer::raytrace_from;
use crate::scene::{Camera, Scene};
use crate::transform::Projection;

/// Which pipeline draws a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Renderer {
    #[default]
    Raster,
    Ray,
}

impl Renderer {
    pub fn toggled(self) -> Self {
        match self {
            Renderer::Raster => Renderer::Ray,
            Renderer::Ray => Renderer::Raster,
        }
    }
}

/// Output size and pipeline choice shared by every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSettings {
    pub width: usize,
    pub height: usize,
    pub renderer: Renderer,
    pub projection: Projection,
}

/// Camera on a circle of `radius` in the xy-plane, looking at the origin
///
/// The z axis is up. Image plane settings come from `base`.
pub fn orbit_pose(base: &Camera, radius: f64, angle: f64) -> Camera {
    let origin = Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
    base.with_pose(origin, -origin, Vec3::new(0.0, 0.0, 1.0))
}

/// `frames` evenly spaced poses for one full turn
pub fn orbit_poses(base: &Camera, radius: f64, frames: usize) -> Vec<Camera> {
    let step = 2.0 * PI / frames.max(1) as f64;
    (0..frames).map(|i| orbit_pose(base, radius, i as f64 * step)).collect()
}

pub fn render_frame(scene: &Scene, camera: &Camera, settings: &FrameSettings) -> RenderResult<Framebuffer> {
    match settings.renderer {
        Renderer::Raster => rasterize_from(scene, camera, settings.width, settings.height, settings.projection),
        Renderer::Ray => raytrace_from(scene, camera, settings.width, settings.height, settings.projection),
    }
}

/// Render every pose in order; `on_frame` runs after each finished frame
pub fn render_frames(
    scene: &Scene,
    cameras: &[Camera],
    settings: &FrameSettings,
    mut on_frame: impl FnMut(usize),
) -> RenderResult<Vec<Framebuffer>> {
    let mut frames = Vec::with_capacity(cameras.len());
    for (i, camera) in cameras.iter().enumerate() {
        debug!("frame {}/{} from {:?}", i + 1, cameras.len(), camera.origin.0);
        frames.push(render_frame(scene, camera, settings)?);
        on_frame(i);
    }
    Ok(frames)
}
