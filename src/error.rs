//! Error taxonomy shared by the math kernel and both render pipelines

use thiserror::Error;

/// Failure that aborts the current render call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// Two operands of a matrix/vector/tensor operation have incompatible shapes
    #[error("dimension mismatch in {operation}: {left:?} vs {right:?}")]
    DimensionMismatch {
        operation: &'static str,
        left: Vec<usize>,
        right: Vec<usize>,
    },

    /// Determinant requested for a non-square matrix
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },

    /// Zero-length vectors, zero-volume projections, homogeneous w of zero
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}

pub type RenderResult<T> = Result<T, RenderError>;
