use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use scanray::animation::Renderer;
use scanray::Projection;

/// Log levels selectable on the command line
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RendererArg {
    Raster,
    Ray,
}

impl From<RendererArg> for Renderer {
    fn from(arg: RendererArg) -> Self {
        match arg {
            RendererArg::Raster => Renderer::Raster,
            RendererArg::Ray => Renderer::Ray,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProjectionArg {
    Perspective,
    Orthographic,
    /// One output per projection
    Both,
}

impl ProjectionArg {
    pub fn projections(self) -> Vec<Projection> {
        match self {
            ProjectionArg::Perspective => vec![Projection::Perspective],
            ProjectionArg::Orthographic => vec![Projection::Orthographic],
            ProjectionArg::Both => vec![Projection::Orthographic, Projection::Perspective],
        }
    }
}

/// Output path for one projection's result
///
/// With several projections each file gets the projection name appended to
/// its stem, so `orbit.gif` becomes `orbit_perspective.gif`.
pub fn output_path(path: &Path, projection: Projection, several: bool) -> PathBuf {
    if !several {
        return path.to_path_buf();
    }
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let suffix = match projection {
        Projection::Perspective => "perspective",
        Projection::Orthographic => "orthographic",
    };
    let mut name = format!("{}_{}", stem, suffix);
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

/// Command line arguments
#[derive(Parser)]
#[command(name = "scanray", version, about = "Software rasterizer and ray tracer for RON scenes")]
pub struct Args {
    /// Set the logging level; RUST_LOG refines it per module
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render one image
    Render(RenderArgs),
    /// Orbit the camera around the z axis and write a GIF
    Animate(AnimateArgs),
    /// Open an interactive preview window
    View(ViewArgs),
    /// Write the demo scene as a starting point
    Init {
        #[arg(default_value = "scene.ron")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Scene and pipeline selection shared by `render` and `animate`
#[derive(clap::Args)]
pub struct FrameArgs {
    /// Scene description (.ron)
    pub scene: PathBuf,

    #[arg(short, long, value_enum, default_value = "raster")]
    pub renderer: RendererArg,

    /// `both` writes one output per projection
    #[arg(short, long, value_enum, default_value = "perspective")]
    pub projection: ProjectionArg,

    /// Image width in pixels
    #[arg(long, default_value = "400")]
    pub width: usize,

    /// Image height in pixels
    #[arg(long, default_value = "400")]
    pub height: usize,
}

#[derive(clap::Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub frame: FrameArgs,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,
}

#[derive(clap::Args)]
pub struct AnimateArgs {
    #[command(flatten)]
    pub frame: FrameArgs,

    /// Orbit radius around the z axis
    #[arg(long, default_value = "30.0")]
    pub radius: f64,

    /// Frames per full turn
    #[arg(long, default_value = "48")]
    pub frames: usize,

    /// Playback rate of the GIF
    #[arg(long, default_value = "24")]
    pub fps: u32,

    #[arg(short, long, default_value = "orbit.gif")]
    pub output: PathBuf,
}

#[derive(clap::Args)]
pub struct ViewArgs {
    /// Scene description (.ron)
    pub scene: PathBuf,

    /// Render width in pixels; the window scales it up
    #[arg(long, default_value = "320")]
    pub width: usize,

    /// Render height in pixels
    #[arg(long, default_value = "240")]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_projection_keeps_path() {
        let path = Path::new("out/orbit.gif");
        assert_eq!(output_path(path, Projection::Perspective, false), path);
    }

    #[test]
    fn test_both_projections_get_distinct_paths() {
        let projections = ProjectionArg::Both.projections();
        assert_eq!(projections, vec![Projection::Orthographic, Projection::Perspective]);

        let paths: Vec<_> = projections
            .iter()
            .map(|&p| output_path(Path::new("out/orbit.gif"), p, true))
            .collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("out/orbit_orthographic.gif"), PathBuf::from("out/orbit_perspective.gif")]
        );
        assert_eq!(
            output_path(Path::new("render"), Projection::Perspective, true),
            PathBuf::from("render_perspective")
        );
    }

    #[test]
    fn test_animate_accepts_both() {
        let args = Args::try_parse_from(["scanray", "animate", "scene.ron", "--projection", "both"]).unwrap();
        match args.command {
            Command::Animate(a) => assert_eq!(a.frame.projection.projections().len(), 2),
            _ => panic!("expected animate"),
        }
    }
}
