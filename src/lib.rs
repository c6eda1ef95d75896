/* ************************************************************************ **
** This file is part of dense-matrix, and is licensed under EITHER the MIT  **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! A small owned, row-major `f64` matrix.
//!
//! ```
//! use dense_matrix::Matrix;
//!
//! let a = Matrix::from_row_major(vec![4.0, 7.0, 2.0, 6.0], 2, 2);
//! let inv = a.invert()?;
//! let eye = inv.matmul(&a)?;
//! assert!((eye.get(0, 0) - 1.0).abs() < 1e-12);
//! assert!(eye.get(1, 0).abs() < 1e-12);
//! # Ok::<(), dense_matrix::MatrixError>(())
//! ```
//!
//! Shape problems are reported as [`MatrixError`]s (and logged through
//! the `log` facade) rather than as degenerate matrices.

#[macro_use]
extern crate log;

#[cfg(feature = "lapacke-support")]
extern crate lapack_src;

#[cfg(test)]
#[macro_use]
extern crate dense_matrix_assert_close;

pub use crate::errors::{Result, MatrixError, Dims, check_info};
mod errors;

pub use crate::matrix::{Matrix, ContiguousRows, ContiguousRowsMut};
mod matrix;

pub use crate::product::is_matmul_compatible;
mod product;

pub use crate::lu::{LuKernel, DefaultKernel, PartialPivotLu};
#[cfg(feature = "lapacke-support")]
pub use crate::lu::Lapacke;
mod lu;

mod io;

pub mod logging;
