//! Linear algebra kernel
//!
//! Small dense types sized for rendering: fixed-arity vectors, row-major
//! matrices and image-shaped tensors.

mod matrix;
mod tensor;
mod vector;

pub use matrix::*;
pub use tensor::*;
pub use vector::*;
