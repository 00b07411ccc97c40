//! Scanray command line front end

mod cli;
mod logger;
mod viewer;

use std::time::Instant;

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use cli::{output_path, AnimateArgs, Args, Command, FrameArgs, RenderArgs, ViewArgs};
use logger::init_logger;
use scanray::animation::{orbit_poses, render_frame, render_frames, FrameSettings};
use scanray::output::{save_gif, save_png};
use scanray::scene::{load_scene, save_scene_file, Scene, SceneFile};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    match args.command {
        Command::Render(args) => render(args),
        Command::Animate(args) => animate(args),
        Command::View(args) => view(args),
        Command::Init { path, force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            save_scene_file(&SceneFile::demo(), &path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote demo scene to {}", path.display());
            Ok(())
        }
    }
}

/// The scene plus one `FrameSettings` per requested projection
fn load(frame: &FrameArgs) -> Result<(Scene, Vec<FrameSettings>)> {
    ensure!(frame.width > 0 && frame.height > 0, "image size must be positive");
    let scene = load_scene(&frame.scene).with_context(|| format!("loading {}", frame.scene.display()))?;
    let settings = frame
        .projection
        .projections()
        .into_iter()
        .map(|projection| FrameSettings {
            width: frame.width,
            height: frame.height,
            renderer: frame.renderer.into(),
            projection,
        })
        .collect();
    Ok((scene, settings))
}

fn render(args: RenderArgs) -> Result<()> {
    let (scene, all_settings) = load(&args.frame)?;
    let several = all_settings.len() > 1;

    for settings in &all_settings {
        let start = Instant::now();
        let fb = render_frame(&scene, &scene.camera, settings).context("rendering")?;
        info!(
            "{:?} {:?} render took {:.1} ms",
            settings.renderer,
            settings.projection,
            start.elapsed().as_secs_f64() * 1000.0
        );

        let path = output_path(&args.output, settings.projection, several);
        save_png(&fb, &path).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn animate(args: AnimateArgs) -> Result<()> {
    ensure!(args.frames > 0, "need at least one frame");
    ensure!(args.fps > 0, "fps must be positive");
    let (scene, all_settings) = load(&args.frame)?;
    let several = all_settings.len() > 1;
    let poses = orbit_poses(&scene.camera, args.radius, args.frames);

    for settings in &all_settings {
        let pb = ProgressBar::new(poses.len() as u64);
        pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}")?);

        let start = Instant::now();
        let frames = render_frames(&scene, &poses, settings, |_| pb.inc(1)).context("rendering frames")?;
        pb.finish_and_clear();
        info!(
            "Rendered {} {:?} frames in {:.2} s",
            frames.len(),
            settings.projection,
            start.elapsed().as_secs_f64()
        );

        let path = output_path(&args.output, settings.projection, several);
        save_gif(&frames, &path, args.fps).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn view(args: ViewArgs) -> Result<()> {
    ensure!(args.width > 0 && args.height > 0, "image size must be positive");
    let scene = load_scene(&args.scene).with_context(|| format!("loading {}", args.scene.display()))?;
    viewer::run(scene, args.width, args.height);
    Ok(())
}
