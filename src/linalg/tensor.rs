//! Image-shaped stacks: width × height × channel grids of reals

use crate::error::{RenderError, RenderResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<f64>,
}

impl Tensor {
    pub fn zeros(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0.0; width * height * channels],
        }
    }

    /// (width, height, channels)
    pub fn dim(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.channels)
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.channels
    }

    /// Channel values at column `x`, row `y`
    pub fn pixel(&self, x: usize, y: usize) -> &[f64] {
        let i = self.offset(x, y);
        &self.data[i..i + self.channels]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, values: &[f64]) {
        let i = self.offset(x, y);
        let n = self.channels.min(values.len());
        self.data[i..i + n].copy_from_slice(&values[..n]);
    }

    pub fn checked_add(&self, other: &Tensor) -> RenderResult<Tensor> {
        if self.dim() != other.dim() {
            let (w, h, c) = self.dim();
            let (ow, oh, oc) = other.dim();
            return Err(RenderError::DimensionMismatch {
                operation: "tensor add",
                left: vec![w, h, c],
                right: vec![ow, oh, oc],
            });
        }
        Ok(Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.iter().zip(&other.data).map(|(a, b)| a + b).collect(),
        })
    }
}
