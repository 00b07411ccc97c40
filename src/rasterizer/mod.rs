//! Projective software rasterizer
//!
//! Features:
//! - Viewport · projection · camera-view pipeline in homogeneous coordinates
//! - Midpoint line drawing for every slope regime
//! - Edge-function triangle fill with shared-edge tie breaking
//! - Z-buffer whose polarity follows the active projection
//! - Per-vertex shading interpolated across faces

mod framebuffer;
mod render;
mod types;

pub use framebuffer::*;
pub use render::*;
pub use types::*;
