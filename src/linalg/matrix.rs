//! Dense row-major matrices
//!
//! Every operation returns fresh storage; inputs are never mutated.

use std::ops::{Index, IndexMut};

use super::vector::Vector;
use crate::error::{RenderError, RenderResult};

/// Rectangular matrix of reals, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Build from nested rows; ragged input is a dimension mismatch
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> RenderResult<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(RenderError::DimensionMismatch {
                    operation: "from_rows",
                    left: vec![cols],
                    right: vec![row.len()],
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    fn mismatch(&self, other: &Matrix, operation: &'static str) -> RenderError {
        RenderError::DimensionMismatch {
            operation,
            left: vec![self.rows, self.cols],
            right: vec![other.rows, other.cols],
        }
    }

    pub fn checked_add(&self, other: &Matrix) -> RenderResult<Matrix> {
        if self.dim() != other.dim() {
            return Err(self.mismatch(other, "add"));
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(&other.data).map(|(a, b)| a + b).collect(),
        })
    }

    pub fn checked_mul(&self, other: &Matrix) -> RenderResult<Matrix> {
        if self.cols != other.rows {
            return Err(self.mismatch(other, "multiply"));
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                out[(i, j)] = (0..self.cols).map(|k| self[(i, k)] * other[(k, j)]).sum();
            }
        }
        Ok(out)
    }

    pub fn scale(&self, s: f64) -> Matrix {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * s).collect(),
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }

    /// Cofactor expansion along the first row
    pub fn determinant(&self) -> RenderResult<f64> {
        if self.rows != self.cols {
            return Err(RenderError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.cofactor_expansion())
    }

    fn cofactor_expansion(&self) -> f64 {
        match self.rows {
            0 => 1.0,
            1 => self.data[0],
            n => (0..n)
                .map(|col| {
                    let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                    sign * self[(0, col)] * self.first_row_minor(col).cofactor_expansion()
                })
                .sum(),
        }
    }

    /// Drops row 0 and the given column
    fn first_row_minor(&self, col: usize) -> Matrix {
        let n = self.rows - 1;
        let mut data = Vec::with_capacity(n * n);
        for r in 1..self.rows {
            data.extend(
                self.row(r)
                    .iter()
                    .enumerate()
                    .filter(|(c, _)| *c != col)
                    .map(|(_, v)| *v),
            );
        }
        Self { rows: n, cols: n, data }
    }

    /// Elementwise product
    pub fn hadamard(&self, other: &Matrix) -> RenderResult<Matrix> {
        if self.dim() != other.dim() {
            return Err(self.mismatch(other, "hadamard"));
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(&other.data).map(|(a, b)| a * b).collect(),
        })
    }

    /// Matrix × column vector; the matrix must be N×N
    pub fn apply<const N: usize>(&self, v: Vector<N>) -> RenderResult<Vector<N>> {
        if self.rows != N || self.cols != N {
            return Err(RenderError::DimensionMismatch {
                operation: "apply",
                left: vec![self.rows, self.cols],
                right: vec![N],
            });
        }
        let mut out = [0.0; N];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.row(i).iter().zip(v.0.iter()).map(|(a, b)| a * b).sum();
        }
        Ok(Vector(out))
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;
    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        &mut self.data[r * self.cols + c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::Vec4;

    fn sample() -> Matrix {
        Matrix::from_rows(&[
            [2.0, -1.0, 0.0, 3.0],
            [1.0, 4.0, -2.0, 0.5],
            [0.0, 1.0, 5.0, -1.0],
            [3.0, 0.0, 1.0, 2.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_determinant_of_identity() {
        for n in 1..6 {
            assert_eq!(Matrix::identity(n).determinant().unwrap(), 1.0);
        }
    }

    #[test]
    fn test_determinant_base_case() {
        let m = Matrix::from_rows(&[[7.5]]).unwrap();
        assert_eq!(m.determinant().unwrap(), 7.5);
    }

    #[test]
    fn test_determinant_known_value() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]).unwrap();
        assert!((m.determinant().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scaling_a_row_scales_determinant() {
        let a = sample();
        let mut b = a.clone();
        for c in 0..4 {
            b[(2, c)] *= 3.0;
        }
        let da = a.determinant().unwrap();
        let db = b.determinant().unwrap();
        assert!((db - 3.0 * da).abs() < 1e-9);
    }

    #[test]
    fn test_determinant_not_square() {
        assert_eq!(
            Matrix::zeros(2, 3).determinant(),
            Err(RenderError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(a.transpose().dim(), (3, 2));
        assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn test_identity_is_multiplicative_unit() {
        let a = sample();
        assert_eq!(Matrix::identity(4).checked_mul(&a).unwrap(), a);
    }

    #[test]
    fn test_multiply_shapes() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(3, 5);
        assert_eq!(a.checked_mul(&b).unwrap().dim(), (2, 5));
        assert!(matches!(
            b.checked_mul(&a),
            Err(RenderError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_add_and_scale() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let sum = a.checked_add(&a).unwrap();
        assert_eq!(sum, a.scale(2.0));
        assert!(a.checked_add(&Matrix::zeros(2, 3)).is_err());
    }

    #[test]
    fn test_hadamard() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[[2.0, 0.0], [-1.0, 0.5]]).unwrap();
        let h = a.hadamard(&b).unwrap();
        assert_eq!(h, Matrix::from_rows(&[[2.0, 0.0], [-3.0, 2.0]]).unwrap());
        assert!(a.hadamard(&Matrix::zeros(1, 2)).is_err());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(Matrix::from_rows(&rows).is_err());
    }

    #[test]
    fn test_apply() {
        let m = Matrix::identity(4).scale(2.0);
        let v = m.apply(Vec4::new(1.0, 2.0, 3.0, 1.0)).unwrap();
        assert_eq!(v, Vec4::new(2.0, 4.0, 6.0, 2.0));
        assert!(Matrix::identity(3).apply(Vec4::ZERO).is_err());
    }
}
