//! Image file output
//!
//! Framebuffers are already 8-bit RGBA with row 0 at the top, so both
//! encoders take the byte buffer as is.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::error::{ParameterError, ParameterErrorKind};
use image::{Delay, Frame, ImageError, RgbaImage};
use log::info;

use crate::rasterizer::Framebuffer;

/// Copy a framebuffer into an `image` buffer
pub fn to_rgba_image(fb: &Framebuffer) -> Result<RgbaImage, ImageError> {
    RgbaImage::from_raw(fb.width as u32, fb.height as u32, fb.pixels.clone()).ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::DimensionMismatch))
    })
}

/// Save a single frame; the format follows the file extension
pub fn save_png<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<(), ImageError> {
    let path = path.as_ref();
    to_rgba_image(fb)?.save(path)?;
    info!("Wrote {}x{} image to {}", fb.width, fb.height, path.display());
    Ok(())
}

/// Save frames as an endlessly looping GIF
pub fn save_gif<P: AsRef<Path>>(frames: &[Framebuffer], path: P, fps: u32) -> Result<(), ImageError> {
    let path = path.as_ref();
    let delay = Delay::from_numer_denom_ms(1000, fps.max(1));

    let mut encoder = GifEncoder::new(BufWriter::new(File::create(path)?));
    encoder.set_repeat(Repeat::Infinite)?;
    for fb in frames {
        encoder.encode_frame(Frame::from_parts(to_rgba_image(fb)?, 0, 0, delay))?;
    }
    info!("Wrote {} frames at {} fps to {}", frames.len(), fps, path.display());
    Ok(())
}
