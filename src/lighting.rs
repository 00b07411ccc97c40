//! Ambient + Lambertian + Blinn-Phong shading shared by both pipelines
//!
//! Colors and intensities are RGB on a 0-255 scale for colors and 0-1 for
//! light intensities. The result is not clamped; quantization happens when the
//! value reaches a framebuffer.

use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::linalg::Vec3;

const SPECULAR_COLOR: Vec3 = Vec3::new(255.0, 255.0, 255.0);

/// Point light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub origin: Vec3,
    pub intensity: Vec3,
}

impl Light {
    pub fn new(origin: Vec3, intensity: Vec3) -> Self {
        Self { origin, intensity }
    }
}

/// Light list plus the scene-wide shading constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    pub lights: Vec<Light>,
    #[serde(default = "default_ambient")]
    pub ambient: f64,
    #[serde(default = "default_phong_exponent")]
    pub phong_exponent: f64,
}

fn default_ambient() -> f64 {
    0.1
}

fn default_phong_exponent() -> f64 {
    32.0
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            lights: Vec::new(),
            ambient: default_ambient(),
            phong_exponent: default_phong_exponent(),
        }
    }
}

/// Shade one point
///
/// Fails only when the point coincides with a light or with the eye, where
/// the light or view direction is undefined.
pub fn shade(point: Vec3, normal: Vec3, base: Vec3, config: &LightConfig, eye: Vec3) -> RenderResult<Vec3> {
    let view = (eye - point).normalize()?;
    let mut color = base * config.ambient;
    for light in &config.lights {
        let l = (light.origin - point).normalize()?;
        let diffuse = normal.dot(l).max(0.0);
        color = color + base.hadamard(light.intensity) * diffuse;

        // The half vector vanishes when the eye sits exactly opposite the light
        if let Ok(h) = (view + l).normalize() {
            let specular = normal.dot(h).max(0.0).powf(config.phong_exponent);
            color = color + SPECULAR_COLOR.hadamard(light.intensity) * specular;
        }
    }
    Ok(color)
}
