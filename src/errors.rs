/* ************************************************************************ **
** This file is part of dense-matrix, and is licensed under EITHER the MIT  **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::io;
use std::path::PathBuf;

pub type Result<T, E = MatrixError> = std::result::Result<T, E>;

/// `(width, height)`
pub type Dims = (usize, usize);

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MatrixError {
    #[error("matrix dimensions not matching for {}! (left is {}x{}, right is {}x{})", .op, .left.0, .left.1, .right.0, .right.1)]
    ShapeMismatch { op: &'static str, left: Dims, right: Dims },

    #[error("dimensions not matching for {}! ({}x{} is not square)", .op, .dims.0, .dims.1)]
    NotSquare { op: &'static str, dims: Dims },

    #[error("buffer of length {} does not fit shape {}x{}", .len, .dims.0, .dims.1)]
    InconsistentShape { dims: Dims, len: usize },

    #[error("{routine}: matrix is singular (U({index},{index}) is exactly zero)")]
    Singular { routine: &'static str, index: usize },

    #[error("bad arg number {arg} to {routine}")]
    BadArgument { routine: &'static str, arg: usize },

    #[error("while writing file: '{}'", .path.display())]
    Io { path: PathBuf, #[source] source: io::Error },
}

/// Map a LAPACK-style `info` status onto a `Result`.
///
/// `0` is success, a positive value is the (1-based) index of a zero pivot,
/// and a negative value names the offending argument.
pub fn check_info(routine: &'static str, info: i32) -> Result<()> {
    match info {
        0 => Ok(()),
        info if info < 0 => Err(MatrixError::BadArgument { routine, arg: (-info) as usize }),
        info => Err(MatrixError::Singular { routine, index: info as usize }),
    }
}
