//! Interactive preview window
//!
//! Renders on the CPU at a fixed resolution and blits the framebuffer as a
//! nearest-filtered texture scaled to fit the window. A new frame is rendered
//! only when the view changes.

use std::f64::consts::PI;
use std::time::Instant;

use log::{error, info};
use macroquad::prelude::*;

use scanray::animation::{orbit_pose, render_frame, FrameSettings, Renderer};
use scanray::scene::{Camera, Scene};
use scanray::{Projection, VERSION};

/// Radians per second while an arrow key is held
const ORBIT_SPEED: f64 = PI / 2.0;
/// Fractional radius change per second
const ZOOM_SPEED: f64 = 0.8;
const MIN_RADIUS: f64 = 0.5;

struct ViewerState {
    settings: FrameSettings,
    angle: f64,
    radius: f64,
    /// False until the user first moves, so the scene's own pose shows first
    orbiting: bool,
    frame: Option<Texture2D>,
    dirty: bool,
    render_ms: f64,
}

impl ViewerState {
    fn new(camera: &Camera, width: usize, height: usize) -> Self {
        let (x, y) = (camera.origin.x(), camera.origin.y());
        Self {
            settings: FrameSettings {
                width,
                height,
                renderer: Renderer::Raster,
                projection: Projection::Perspective,
            },
            angle: y.atan2(x),
            radius: x.hypot(y).max(MIN_RADIUS),
            orbiting: false,
            frame: None,
            dirty: true,
            render_ms: 0.0,
        }
    }

    fn camera(&self, scene: &Scene) -> Camera {
        if self.orbiting {
            orbit_pose(&scene.camera, self.radius, self.angle)
        } else {
            scene.camera
        }
    }

    fn handle_input(&mut self) {
        let dt = get_frame_time() as f64;
        let mut turn = 0.0;
        let mut zoom = 0.0;
        if is_key_down(KeyCode::Left) {
            turn -= 1.0;
        }
        if is_key_down(KeyCode::Right) {
            turn += 1.0;
        }
        if is_key_down(KeyCode::Up) {
            zoom -= 1.0;
        }
        if is_key_down(KeyCode::Down) {
            zoom += 1.0;
        }
        if turn != 0.0 || zoom != 0.0 {
            self.angle = (self.angle + turn * ORBIT_SPEED * dt).rem_euclid(2.0 * PI);
            self.radius = (self.radius * (1.0 + zoom * ZOOM_SPEED * dt)).max(MIN_RADIUS);
            self.orbiting = true;
            self.dirty = true;
        }

        if is_key_pressed(KeyCode::Tab) {
            self.settings.renderer = self.settings.renderer.toggled();
            self.dirty = true;
        }
        if is_key_pressed(KeyCode::P) {
            self.settings.projection = self.settings.projection.toggled();
            self.dirty = true;
        }
    }

    fn refresh(&mut self, scene: &Scene) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let start = Instant::now();
        match render_frame(scene, &self.camera(scene), &self.settings) {
            Ok(fb) => {
                let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
                texture.set_filter(FilterMode::Nearest);
                self.frame = Some(texture);
                self.render_ms = start.elapsed().as_secs_f64() * 1000.0;
            }
            // Keep showing the last good frame
            Err(e) => error!("render failed: {}", e),
        }
    }

    fn draw(&self) {
        clear_background(BLACK);

        if let Some(texture) = &self.frame {
            let (w, h) = (self.settings.width as f32, self.settings.height as f32);
            let scale = (screen_width() / w).min(screen_height() / h);
            let (draw_w, draw_h) = (w * scale, h * scale);
            draw_texture_ex(
                texture,
                (screen_width() - draw_w) / 2.0,
                (screen_height() - draw_h) / 2.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(Vec2::new(draw_w, draw_h)),
                    ..Default::default()
                },
            );
        }

        draw_text(
            &format!(
                "{:?} | {:?} | {:.1} ms | arrows: orbit  Tab: renderer  P: projection  Esc: quit",
                self.settings.renderer, self.settings.projection, self.render_ms
            ),
            8.0,
            screen_height() - 8.0,
            16.0,
            Color::from_rgba(200, 200, 200, 255),
        );
    }
}

async fn preview(scene: Scene, width: usize, height: usize) {
    let mut state = ViewerState::new(&scene.camera, width, height);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        state.handle_input();
        state.refresh(&scene);
        state.draw();
        next_frame().await;
    }
    info!("Viewer closed");
}

/// Open the window and block until it closes
pub fn run(scene: Scene, width: usize, height: usize) {
    let conf = Conf {
        window_title: format!("Scanray v{}", VERSION),
        window_width: (width * 2) as i32,
        window_height: (height * 2) as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    };
    macroquad::Window::from_config(conf, preview(scene, width, height));
}
