/* ************************************************************************ **
** This file is part of dense-matrix, and is licensed under EITHER the MIT  **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Products of matrices.

use crate::errors::{Result, MatrixError};
use crate::Matrix;

use itertools::zip_eq;

pub fn is_matmul_compatible(a: &Matrix, b: &Matrix) -> bool
{ a.width() == b.height() }

impl Matrix {
    /// Matrix product `self * other`.
    ///
    /// The result is `other.width()` wide and `self.height()` tall.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix>
    {
        if !is_matmul_compatible(self, other) {
            let err = MatrixError::ShapeMismatch {
                op: "multiplication",
                left: self.dims(),
                right: other.dims(),
            };
            warn!("{}", err);
            return Err(err);
        }
        self.require_consistent("multiplication")?;
        other.require_consistent("multiplication")?;

        Ok(matmul(self, other))
    }

    /// Computes `self.T * self` without forming the transpose.
    pub fn xtx(&self) -> Matrix
    {
        let n = self.width();
        let mut out = Matrix::zeros(n, n);
        for ry in 0..n {
            for rx in 0..n {
                let mut acc = 0.0;
                for y in 0..self.height() {
                    acc += self.get(ry, y) * self.get(rx, y);
                }
                out.data[ry * n + rx] = acc;
            }
        }
        out
    }

    /// Kronecker product, laid out so that every element `b` of `other`
    /// is replaced by the block `b * self`.
    pub fn kron(&self, other: &Matrix) -> Matrix
    {
        let (wa, ha) = self.dims();
        let (wb, hb) = other.dims();
        let mut out = Matrix::zeros(wa * wb, ha * hb);
        for i in 0..wb {
            for h in 0..hb {
                let b = other.data[i + wb * h];
                for j in 0..wa {
                    for k in 0..ha {
                        out.data[wa * i + j + wa * wb * (ha * h + k)] = b * self.data[j + wa * k];
                    }
                }
            }
        }
        out
    }

    /// Same as [`Matrix::kron`].
    pub fn cron(&self, other: &Matrix) -> Matrix
    { self.kron(other) }
}

impl<'a, 'b> std::ops::Mul<&'b Matrix> for &'a Matrix {
    type Output = Matrix;

    /// # Panics
    ///
    /// Panics on incompatible shapes.  Use [`Matrix::matmul`] to get an error instead.
    fn mul(self, rhs: &'b Matrix) -> Matrix
    {
        assert!(is_matmul_compatible(self, rhs), "{:?} * {:?}", self.dims(), rhs.dims());
        matmul(self, rhs)
    }
}

fn matmul(a: &Matrix, b: &Matrix) -> Matrix
{
    let mut out = Matrix::zeros(b.width(), a.height());
    // chunking by a zero width would lose rows
    if out.is_empty() || a.width() == 0 {
        return out;
    }
    for (out_row, a_row) in zip_eq(out.rows_mut(), a.rows()) {
        for (j, out) in out_row.iter_mut().enumerate() {
            for (k, &x) in a_row.iter().enumerate() {
                *out += x * b.data[k * b.width() + j];
            }
        }
    }
    out
}
