/* ************************************************************************ **
** This file is part of dense-matrix, and is licensed under EITHER the MIT  **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Plain text dumps.
//!
//! One row per line, every value followed by a single space.
//! There is no header and no way to read it back.

use crate::errors::{Result, MatrixError};
use crate::Matrix;

use std::fmt;
use std::fs::File;
use std::io::{self, Write, BufWriter};
use std::path::Path;

impl Matrix {
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()>
    {
        for y in 0..self.height() {
            for x in 0..self.width() {
                write!(w, "{} ", self.get(x, y))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    /// Dump to stdout, after a blank line.
    pub fn print(&self)
    {
        let stdout = io::stdout();
        self.print_to(stdout.lock());
    }

    fn print_to<W: Write>(&self, mut w: W)
    {
        if let Err(e) = writeln!(w).and_then(|()| self.write_to(&mut w)) {
            warn!("could not print {}x{} matrix: {}", self.width(), self.height(), e);
        }
    }

    /// Write to a file, replacing it if it exists.
    ///
    /// The parent directory must already exist.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>
    {
        let path = path.as_ref();
        let wrap = |source| {
            let err = MatrixError::Io { path: path.to_owned(), source };
            warn!("{}", err);
            err
        };

        let file = File::create(path).map_err(wrap)?;
        let mut w = BufWriter::new(file);
        self.write_to(&mut w).map_err(wrap)?;
        w.flush().map_err(wrap)?;
        debug!("wrote {}x{} matrix to '{}'", self.width(), self.height(), path.display());
        Ok(())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows().take(self.height()) {
            for x in row {
                write!(f, "{} ", x)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
