//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files. Texture
//! image paths are resolved relative to the scene file's directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Camera, Line, Scene};
use crate::error::RenderError;
use crate::lighting::{Light, LightConfig};
use crate::linalg::Vec3;
use crate::rasterizer::Color;
use crate::surface::{Sphere, Surface, Triangle};
use crate::texture::{Image, SolidColor, SphericalMap, Texture, TextureImage};
use crate::transform::ViewVolume;

/// Error type for scene loading
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Texture image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid scene: {0}")]
    Invalid(&'static str),

    #[error(transparent)]
    Render(#[from] RenderError),
}

fn default_detail() -> usize {
    16
}

/// On-disk scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub view_volume: ViewVolume,
    pub camera: Camera,
    #[serde(default)]
    pub lines: Vec<LineDesc>,
    #[serde(default)]
    pub surfaces: Vec<SurfaceDesc>,
    #[serde(default)]
    pub lighting: LightConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDesc {
    pub from: Vec3,
    pub to: Vec3,
    /// Magenta when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceDesc {
    Triangle {
        vertices: [Vec3; 3],
        texture: TextureDesc,
    },
    Sphere {
        center: Vec3,
        radius: f64,
        #[serde(default = "default_detail")]
        detail: usize,
        texture: TextureDesc,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TextureDesc {
    /// 0-255 RGB
    Solid(Vec3),
    /// Image over the unit square of the xy-plane
    Image { source: ImageSource, background: Vec3 },
    /// Image wrapped around the owning sphere
    Spherical { source: ImageSource, background: Vec3 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageSource {
    /// Relative paths are resolved against the scene file's directory
    File(PathBuf),
    Checkerboard {
        size: usize,
        cell: usize,
        a: [u8; 3],
        b: [u8; 3],
    },
}

/// Decoded images shared between surfaces that name the same file
#[derive(Default)]
struct ImageCache {
    images: HashMap<PathBuf, Arc<Image>>,
}

impl ImageCache {
    fn get(&mut self, source: &ImageSource, base_dir: &Path) -> Result<Arc<Image>, SceneError> {
        match source {
            ImageSource::File(path) => {
                let path = base_dir.join(path);
                if let Some(img) = self.images.get(&path) {
                    return Ok(Arc::clone(img));
                }
                let img = Image::from_file(&path).map_err(|source| SceneError::Image {
                    path: path.clone(),
                    source,
                })?;
                debug!("loaded texture {} ({}x{})", path.display(), img.width, img.height);
                let img = Arc::new(img);
                self.images.insert(path, Arc::clone(&img));
                Ok(img)
            }
            ImageSource::Checkerboard { size, cell, a, b } => {
                if *size == 0 {
                    return Err(SceneError::Invalid("checkerboard size must be positive"));
                }
                Ok(Arc::new(Image::checkerboard(*size, *size, *cell, *a, *b)))
            }
        }
    }
}

impl SceneFile {
    /// Resolve textures and build geometry
    pub fn build(&self, base_dir: &Path) -> Result<Scene, SceneError> {
        let mut cache = ImageCache::default();
        let mut scene = Scene::new(self.view_volume, self.camera);
        scene.lighting = self.lighting.clone();

        for line in &self.lines {
            let mut l = Line::new(line.from, line.to);
            if let Some([r, g, b]) = line.color {
                l = l.with_color(Color::new(r, g, b));
            }
            scene.add_line(l);
        }

        for desc in &self.surfaces {
            let surface: Arc<dyn Surface> = match desc {
                SurfaceDesc::Triangle { vertices, texture } => {
                    let texture: Arc<dyn Texture> = match texture {
                        TextureDesc::Solid(c) => Arc::new(SolidColor(*c)),
                        TextureDesc::Image { source, background } => {
                            Arc::new(TextureImage::new(*background, cache.get(source, base_dir)?))
                        }
                        TextureDesc::Spherical { .. } => {
                            return Err(SceneError::Invalid("spherical textures need a sphere"));
                        }
                    };
                    Arc::new(Triangle::new(*vertices, texture)?)
                }
                SurfaceDesc::Sphere {
                    center,
                    radius,
                    detail,
                    texture,
                } => {
                    let texture: Arc<dyn Texture> = match texture {
                        TextureDesc::Solid(c) => Arc::new(SolidColor(*c)),
                        TextureDesc::Image { source, background } => {
                            Arc::new(TextureImage::new(*background, cache.get(source, base_dir)?))
                        }
                        TextureDesc::Spherical { source, background } => Arc::new(SphericalMap::new(
                            *center,
                            *radius,
                            TextureImage::new(*background, cache.get(source, base_dir)?),
                        )),
                    };
                    Arc::new(Sphere::new(*center, *radius, texture, *detail)?)
                }
            };
            scene.surfaces.push(surface);
        }

        Ok(scene)
    }

    /// Checkered globe with a backdrop triangle and axis lines
    ///
    /// The camera sits on the orbit circle the animation uses, and the image
    /// plane is sized so both pipelines frame the globe alike at 400 pixels.
    pub fn demo() -> Self {
        Self {
            view_volume: ViewVolume {
                left: -8.0,
                right: 8.0,
                bottom: -8.0,
                top: 8.0,
                near: -10.0,
                far: -100.0,
            },
            camera: Camera {
                origin: Vec3::new(30.0, 0.0, 0.0),
                direction: Vec3::new(-1.0, 0.0, 0.0),
                top: Vec3::new(0.0, 0.0, 1.0),
                plane_distance: 10.0,
                pixel_size: 0.04,
            },
            lines: vec![
                LineDesc {
                    from: Vec3::ZERO,
                    to: Vec3::new(9.0, 0.0, 0.0),
                    color: None,
                },
                LineDesc {
                    from: Vec3::ZERO,
                    to: Vec3::new(0.0, 9.0, 0.0),
                    color: Some([0, 255, 0]),
                },
                LineDesc {
                    from: Vec3::ZERO,
                    to: Vec3::new(0.0, 0.0, 9.0),
                    color: Some([0, 128, 255]),
                },
            ],
            surfaces: vec![
                SurfaceDesc::Sphere {
                    center: Vec3::ZERO,
                    radius: 5.0,
                    detail: default_detail(),
                    texture: TextureDesc::Spherical {
                        source: ImageSource::Checkerboard {
                            size: 64,
                            cell: 8,
                            a: [230, 230, 230],
                            b: [200, 40, 40],
                        },
                        background: Vec3::ZERO,
                    },
                },
                SurfaceDesc::Triangle {
                    vertices: [
                        Vec3::new(-7.0, -9.0, -6.0),
                        Vec3::new(-7.0, 9.0, -6.0),
                        Vec3::new(-7.0, 0.0, 9.0),
                    ],
                    texture: TextureDesc::Solid(Vec3::new(60.0, 90.0, 200.0)),
                },
            ],
            lighting: LightConfig {
                lights: vec![Light::new(Vec3::new(30.0, 20.0, 20.0), Vec3::new(0.9, 0.9, 0.9))],
                ambient: 0.15,
                phong_exponent: 24.0,
            },
        }
    }
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let scene = load_scene_from_str(&contents, base_dir)?;
    info!(
        "Loaded scene {}: {} surfaces, {} lines",
        path.display(),
        scene.surfaces.len(),
        scene.lines.len()
    );
    Ok(scene)
}

/// Load a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str, base_dir: &Path) -> Result<Scene, SceneError> {
    let file: SceneFile = ron::from_str(s)?;
    file.build(base_dir)
}

/// Save a scene description to a RON file
pub fn save_scene_file<P: AsRef<Path>>(file: &SceneFile, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(file, config)?;
    fs::write(path, contents)?;
    Ok(())
}
