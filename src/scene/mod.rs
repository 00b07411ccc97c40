//! Scene model: camera pose, view volume, geometry and lights
//!
//! A `Scene` is immutable while it renders. Animation and the preview window
//! move the camera by passing a different `Camera` to the `*_from` render
//! entry points instead of mutating the scene.

mod file;

pub use file::*;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::lighting::LightConfig;
use crate::linalg::{Matrix, Vec3};
use crate::rasterizer::Color;
use crate::surface::Surface;
use crate::transform::{camera_view, ViewVolume};

/// Eye pose plus the ray tracer's image plane parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub origin: Vec3,
    pub direction: Vec3,
    pub top: Vec3,
    /// Distance from the eye to the perspective image plane
    #[serde(default = "default_plane_distance")]
    pub plane_distance: f64,
    /// World-space size of one pixel on the image plane
    #[serde(default = "default_pixel_size")]
    pub pixel_size: f64,
}

fn default_plane_distance() -> f64 {
    500.0
}

fn default_pixel_size() -> f64 {
    1.0
}

impl Camera {
    pub fn new(origin: Vec3, direction: Vec3, top: Vec3) -> Self {
        Self {
            origin,
            direction,
            top,
            plane_distance: default_plane_distance(),
            pixel_size: default_pixel_size(),
        }
    }

    /// Same image plane settings, different pose
    pub fn with_pose(self, origin: Vec3, direction: Vec3, top: Vec3) -> Self {
        Self {
            origin,
            direction,
            top,
            ..self
        }
    }

    pub fn view_matrix(&self) -> RenderResult<Matrix> {
        camera_view(self.origin, self.direction, self.top)
    }
}

/// Wireframe segment, drawn on top of all surfaces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
}

impl Line {
    pub fn new(from: Vec3, to: Vec3) -> Self {
        Self {
            from,
            to,
            color: Color::MAGENTA,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Everything one render call reads
#[derive(Debug, Clone)]
pub struct Scene {
    pub view_volume: ViewVolume,
    pub camera: Camera,
    pub lines: Vec<Line>,
    pub surfaces: Vec<Arc<dyn Surface>>,
    pub lighting: LightConfig,
}

impl Scene {
    pub fn new(view_volume: ViewVolume, camera: Camera) -> Self {
        Self {
            view_volume,
            camera,
            lines: Vec::new(),
            surfaces: Vec::new(),
            lighting: LightConfig::default(),
        }
    }

    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn add_surface<S: Surface + 'static>(&mut self, surface: S) {
        self.surfaces.push(Arc::new(surface));
    }

    /// Total triangles the rasterizer will scan-convert
    pub fn triangle_count(&self) -> usize {
        self.surfaces.iter().map(|s| s.mesh().len()).sum()
    }
}
