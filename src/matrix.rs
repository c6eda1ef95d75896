/* ************************************************************************ **
** This file is part of dense-matrix, and is licensed under EITHER the MIT  **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::errors::{Result, MatrixError, Dims};

use std::ops::{Index, IndexMut};
use std::ops::{Mul, MulAssign, Div, DivAssign};

/// Owned matrix of `f64` with C layout.
///
/// Elements are addressed as `(x, y)`, where `x` is the column and `y` is
/// the row; the element lives at offset `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    // c-contiguous, row-contiguous data
    pub(crate) data: Vec<f64>,
    // invariant (only checked by sanity_check): width * height == data.len()
    pub(crate) width: usize,
    pub(crate) height: usize,
}

pub type ContiguousRows<'a> = std::slice::Chunks<'a, f64>;
pub type ContiguousRowsMut<'a> = std::slice::ChunksMut<'a, f64>;

// ---------------------------------------------------------------------------
// construction

impl Matrix {
    /// A zero-filled buffer of `size` elements, shaped as a column vector.
    pub fn with_len(size: usize) -> Self
    { Matrix { data: vec![0.0; size], width: 1, height: size } }

    /// `width` columns by `height` rows of zeros.
    pub fn zeros(width: usize, height: usize) -> Self
    { Matrix { data: vec![0.0; width * height], width, height } }

    /// Treat the data as a column vector, so that `a.matmul(&Matrix::from_vec(v))`
    /// is a matrix-vector product.
    pub fn from_vec(data: Vec<f64>) -> Self
    {
        let height = data.len();
        Matrix { data, width: 1, height }
    }

    /// The shape is trusted.  Use [`Matrix::sanity_check`] if it matters.
    pub fn from_row_major(data: Vec<f64>, width: usize, height: usize) -> Self
    { Matrix { data, width, height } }

    pub fn identity(n: usize) -> Self
    {
        let mut out = Matrix::zeros(n, n);
        for i in 0..n {
            out.data[i + n * i] = 1.0;
        }
        out
    }

    pub fn empty() -> Self
    { Matrix { data: vec![], width: 0, height: 0 } }
}

impl From<Vec<f64>> for Matrix {
    fn from(data: Vec<f64>) -> Self { Matrix::from_vec(data) }
}

// ---------------------------------------------------------------------------
// shape & access

impl Matrix {
    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    /// `(width, height)`
    pub fn dims(&self) -> Dims { (self.width, self.height) }
    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
    pub fn is_square(&self) -> bool { self.width == self.height }

    /// Does the claimed shape agree with the length of the buffer?
    pub fn sanity_check(&self) -> bool
    { self.width * self.height == self.data.len() }

    pub fn data(&self) -> &[f64] { &self.data }
    pub fn data_mut(&mut self) -> &mut [f64] { &mut self.data }
    pub fn into_data(self) -> Vec<f64> { self.data }

    pub fn rows(&self) -> ContiguousRows<'_> { self.data.chunks(self.width.max(1)) }
    pub fn rows_mut(&mut self) -> ContiguousRowsMut<'_> { self.data.chunks_mut(self.width.max(1)) }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> f64
    { self.data[y * self.width + x] }

    #[inline(always)]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut f64
    { &mut self.data[y * self.width + x] }

    /// Index the buffer directly, e.g. for row or column vectors.
    #[inline(always)]
    pub fn get_flat(&self, i: usize) -> f64
    { self.data[i] }

    #[inline(always)]
    pub fn get_flat_mut(&mut self, i: usize) -> &mut f64
    { &mut self.data[i] }

    pub(crate) fn require_consistent(&self, op: &'static str) -> Result<()>
    {
        if !self.sanity_check() {
            let err = MatrixError::InconsistentShape { dims: self.dims(), len: self.len() };
            warn!("{}: {}", op, err);
            return Err(err);
        }
        Ok(())
    }

    pub(crate) fn require_square(&self, op: &'static str) -> Result<()>
    {
        if !self.is_square() {
            let err = MatrixError::NotSquare { op, dims: self.dims() };
            warn!("{}", err);
            return Err(err);
        }
        self.require_consistent(op)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline(always)] // inlining should often remove bounds checks
    fn index(&self, (x, y): (usize, usize)) -> &f64
    { &self.data[y * self.width + x] }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline(always)]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut f64
    { &mut self.data[y * self.width + x] }
}

// ---------------------------------------------------------------------------
// scalar ops

impl Matrix {
    pub fn scale(&mut self, d: f64) -> &mut Self
    {
        self.data.iter_mut().for_each(|x| *x *= d);
        self
    }

    pub fn divide(&mut self, d: f64) -> &mut Self
    {
        self.data.iter_mut().for_each(|x| *x /= d);
        self
    }

    pub fn times(&self, d: f64) -> Matrix
    {
        let mut out = self.clone();
        out.scale(d);
        out
    }

    pub fn divided_by(&self, d: f64) -> Matrix
    {
        let mut out = self.clone();
        out.divide(d);
        out
    }
}

impl MulAssign<f64> for Matrix {
    fn mul_assign(&mut self, d: f64) { self.scale(d); }
}

impl DivAssign<f64> for Matrix {
    fn div_assign(&mut self, d: f64) { self.divide(d); }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(mut self, d: f64) -> Matrix { self.scale(d); self }
}

impl<'a> Mul<f64> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, d: f64) -> Matrix { self.times(d) }
}

impl Div<f64> for Matrix {
    type Output = Matrix;

    fn div(mut self, d: f64) -> Matrix { self.divide(d); self }
}

impl<'a> Div<f64> for &'a Matrix {
    type Output = Matrix;

    fn div(self, d: f64) -> Matrix { self.divided_by(d) }
}

// ---------------------------------------------------------------------------
// transpose & identity

impl Matrix {
    /// Transpose in place.
    ///
    /// Square matrices are transposed by swapping across the diagonal.
    /// Anything else gets a freshly allocated buffer.
    pub fn transpose(&mut self) -> &mut Self
    {
        if self.width == self.height {
            let n = self.width;
            for y in 0..n {
                for x in y + 1..n {
                    self.data.swap(y * n + x, x * n + y);
                }
            }
        } else {
            *self = self.to_transpose();
        }
        self
    }

    pub fn to_transpose(&self) -> Matrix
    {
        let mut data = Vec::with_capacity(self.data.len());
        for x in 0..self.width {
            for y in 0..self.height {
                data.push(self.get(x, y));
            }
        }
        Matrix { data, width: self.height, height: self.width }
    }

    /// Overwrite a square matrix with the identity.
    pub fn make_identity(&mut self) -> Result<&mut Self>
    {
        self.require_square("identity")?;

        let n = self.width;
        self.data.iter_mut().for_each(|x| *x = 0.0);
        for i in 0..n {
            self.data[i + n * i] = 1.0;
        }
        Ok(self)
    }
}
