//! Scanray: software rendering of 3-D scenes
//!
//! Two independent pipelines turn the same scene into RGBA pixels:
//! - Rasterizer: homogeneous projection, midpoint lines, edge-function
//!   triangle fill, z-buffer, per-vertex Blinn-Phong shading
//! - Ray tracer: one ray per pixel, analytic sphere and triangle hits,
//!   per-point shading
//!
//! Both read an immutable `Scene` and allocate a fresh `Framebuffer` per call.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod animation;
pub mod error;
pub mod lighting;
pub mod linalg;
pub mod output;
pub mod rasterizer;
pub mod raytracer;
pub mod scene;
pub mod surface;
pub mod texture;
pub mod transform;

pub use error::{RenderError, RenderResult};
pub use rasterizer::{rasterize, rasterize_from, Color, Framebuffer};
pub use raytracer::{raytrace, raytrace_from};
pub use scene::{load_scene, Camera, Line, Scene, SceneError, SceneFile};
pub use transform::{Projection, ViewVolume};
