/* ************************************************************************ **
** This file is part of dense-matrix, and is licensed under EITHER the MIT  **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Inversion through an LU factorization.
//!
//! The actual numerics live behind [`LuKernel`], which mirrors the
//! `getrf`/`getri` pair from LAPACK, right down to the `info` codes.

use crate::errors::{Result, check_info};
use crate::Matrix;

/// An implementation of LU factorization with partial pivoting, and of
/// inversion from those factors.
///
/// All buffers are square, row-major, with a leading dimension of `n`.
/// Both methods return a LAPACK-style `info` status:
///
/// * `0` on success,
/// * `i > 0` if `U(i, i)` (1-based) is exactly zero,
/// * `-i` if argument `i` was invalid.
pub trait LuKernel {
    fn name(&self) -> &'static str;

    /// Overwrite `a` with `L` and `U` (the unit diagonal of `L` is implied),
    /// and fill `ipiv` with 1-based pivot rows.
    fn getrf(&self, n: usize, a: &mut [f64], ipiv: &mut [i32]) -> i32;

    /// Overwrite the output of `getrf` with the inverse of the original matrix.
    ///
    /// `work` must hold at least `n * n` elements.
    fn getri(&self, n: usize, a: &mut [f64], ipiv: &[i32], work: &mut [f64]) -> i32;
}

#[cfg(feature = "lapacke-support")]
pub type DefaultKernel = Lapacke;
#[cfg(not(feature = "lapacke-support"))]
pub type DefaultKernel = PartialPivotLu;

impl Matrix {
    /// Invert a square matrix using the [`DefaultKernel`].
    pub fn invert(&self) -> Result<Matrix>
    { self.invert_with(&DefaultKernel::default()) }

    pub fn invert_with<K: LuKernel + ?Sized>(&self, kernel: &K) -> Result<Matrix>
    {
        self.require_square("inversion")?;

        let n = self.width();
        let mut out = self.clone();
        if n == 0 {
            return Ok(out);
        }
        trace!("inverting {}x{} matrix with {}", n, n, kernel.name());

        let mut ipiv = vec![0; n];
        let mut work = vec![0.0; self.len()];

        let status = check_info("getrf", kernel.getrf(n, out.data_mut(), &mut ipiv))
            .and_then(|()| check_info("getri", kernel.getri(n, out.data_mut(), &ipiv, &mut work)));
        if let Err(e) = status {
            warn!("inversion failed: {}", e);
            return Err(e);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------

/// Doolittle LU with partial pivoting, in plain Rust.
///
/// Rows are exchanged in full, so `P A = L U` where `P` applies the pivots
/// in order.
#[derive(Debug, Default, Copy, Clone)]
pub struct PartialPivotLu;

impl LuKernel for PartialPivotLu {
    fn name(&self) -> &'static str { "PartialPivotLu" }

    fn getrf(&self, n: usize, a: &mut [f64], ipiv: &mut [i32]) -> i32
    {
        if a.len() < n * n { return -3; }
        if ipiv.len() < n { return -4; }

        let mut info = 0;
        for k in 0..n {
            let pivot = (k..n)
                .max_by(|&r1, &r2| {
                    let (x1, x2) = (a[r1 * n + k].abs(), a[r2 * n + k].abs());
                    // NaNs compare as equal; the first maximum wins
                    x1.partial_cmp(&x2).unwrap_or(std::cmp::Ordering::Equal)
                        .then(r2.cmp(&r1))
                })
                .unwrap_or(k);
            ipiv[k] = (pivot + 1) as i32;

            if pivot != k {
                for c in 0..n {
                    a.swap(k * n + c, pivot * n + c);
                }
            }

            let diag = a[k * n + k];
            if diag == 0.0 {
                // keep going, like dgetrf; only the first zero is reported
                if info == 0 {
                    info = (k + 1) as i32;
                }
                continue;
            }

            for r in k + 1..n {
                let factor = a[r * n + k] / diag;
                a[r * n + k] = factor;
                for c in k + 1..n {
                    a[r * n + c] -= factor * a[k * n + c];
                }
            }
        }
        info
    }

    fn getri(&self, n: usize, a: &mut [f64], ipiv: &[i32], work: &mut [f64]) -> i32
    {
        if a.len() < n * n { return -2; }
        if ipiv.len() < n { return -4; }
        if ipiv[..n].iter().any(|&p| p < 1 || p as usize > n) { return -4; }
        if work.len() < n * n { return -5; }

        if let Some(k) = (0..n).find(|&k| a[k * n + k] == 0.0) {
            return (k + 1) as i32;
        }

        // Solve  L U x = P e_j  for each column j of the inverse.
        let mut col = vec![0.0; n];
        for j in 0..n {
            col.iter_mut().for_each(|x| *x = 0.0);
            col[j] = 1.0;
            for (k, &p) in ipiv[..n].iter().enumerate() {
                col.swap(k, p as usize - 1);
            }

            for r in 0..n {
                let mut acc = col[r];
                for c in 0..r {
                    acc -= a[r * n + c] * col[c];
                }
                col[r] = acc;
            }
            for r in (0..n).rev() {
                let mut acc = col[r];
                for c in r + 1..n {
                    acc -= a[r * n + c] * col[c];
                }
                col[r] = acc / a[r * n + r];
            }

            for r in 0..n {
                work[r * n + j] = col[r];
            }
        }
        a[..n * n].copy_from_slice(&work[..n * n]);
        0
    }
}

// ---------------------------------------------------------------------------

#[cfg(feature = "lapacke-support")]
pub use self::lapacke_kernel::Lapacke;

#[cfg(feature = "lapacke-support")]
mod lapacke_kernel {
    use super::LuKernel;

    /// `dgetrf`/`dgetri` from the system LAPACK, through LAPACKe.
    #[derive(Debug, Default, Copy, Clone)]
    pub struct Lapacke;

    impl LuKernel for Lapacke {
        fn name(&self) -> &'static str { "LAPACKe" }

        fn getrf(&self, n: usize, a: &mut [f64], ipiv: &mut [i32]) -> i32
        {
            let layout = ::lapacke::Layout::RowMajor;
            let n = n as i32;
            unsafe { ::lapacke::dgetrf(layout, n, n, a, n, ipiv) }
        }

        fn getri(&self, n: usize, a: &mut [f64], ipiv: &[i32], work: &mut [f64]) -> i32
        {
            let layout = ::lapacke::Layout::RowMajor;
            let lwork = work.len() as i32;
            let n = n as i32;
            unsafe { ::lapacke::dgetri_work(layout, n, a, n, ipiv, work, lwork) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MatrixError;

    fn mat(data: &[f64], width: usize, height: usize) -> Matrix
    { Matrix::from_row_major(data.to_vec(), width, height) }

    #[test]
    fn two_by_two() {
        let a = mat(&[4.0, 7.0, 2.0, 6.0], 2, 2);
        let inv = a.invert().unwrap();
        assert_close!(abs=1e-12, inv.data(), &[0.6, -0.7, -0.2, 0.4][..]);
        let prod = inv.matmul(&a).unwrap();
        assert_close!(abs=1e-12, prod.data(), &[1.0, 0.0, 0.0, 1.0][..]);
        // original untouched
        assert_eq!(a.data(), &[4.0, 7.0, 2.0, 6.0]);
    }

    #[test]
    fn needs_pivoting() {
        // zero in the leading position
        let a = mat(&[0.0, 1.0, 2.0, 1.0, 0.0, 3.0, 4.0, -3.0, 8.0], 3, 3);
        let inv = a.invert().unwrap();
        let (prod, eye) = (a.matmul(&inv).unwrap(), Matrix::identity(3));
        assert_close!(abs=1e-12, prod.data(), eye.data());
    }

    #[test]
    fn getrf_pivots() {
        let mut a = vec![1.0, 2.0, 3.0, 4.0];
        let mut ipiv = vec![0; 2];
        assert_eq!(PartialPivotLu.getrf(2, &mut a, &mut ipiv), 0);
        assert_eq!(ipiv, vec![2, 2]);
        // L = [[1, 0], [1/3, 1]],  U = [[3, 4], [0, 2/3]]
        assert_close!(abs=1e-14, &a[..], &[3.0, 4.0, 1.0 / 3.0, 2.0 / 3.0][..]);
    }

    #[test]
    fn singular() {
        let a = mat(&[1.0, 2.0, 2.0, 4.0], 2, 2);
        match a.invert() {
            Err(MatrixError::Singular { routine: "getrf", index: 2 }) => {},
            r => panic!("unexpected: {:?}", r),
        }

        let a = Matrix::zeros(3, 3);
        match a.invert() {
            Err(MatrixError::Singular { index: 1, .. }) => {},
            r => panic!("unexpected: {:?}", r),
        }
    }

    #[test]
    fn non_square() {
        match Matrix::zeros(2, 3).invert() {
            Err(MatrixError::NotSquare { op: "inversion", dims: (2, 3) }) => {},
            r => panic!("unexpected: {:?}", r),
        }
        match mat(&[1.0, 2.0, 3.0], 2, 2).invert() {
            Err(MatrixError::InconsistentShape { .. }) => {},
            r => panic!("unexpected: {:?}", r),
        }
    }

    #[test]
    fn empty() {
        let inv = Matrix::empty().invert().unwrap();
        assert_eq!(inv.dims(), (0, 0));
    }

    #[test]
    fn bad_arguments() {
        let mut a = vec![1.0; 3];
        let mut ipiv = vec![0; 2];
        assert_eq!(PartialPivotLu.getrf(2, &mut a, &mut ipiv), -3);

        let mut a = vec![1.0, 0.0, 0.0, 1.0];
        let mut work = vec![0.0; 1];
        assert_eq!(PartialPivotLu.getri(2, &mut a, &[1, 2], &mut work), -5);

        // pivots are 1-based and must stay in range
        let mut work = vec![0.0; 4];
        assert_eq!(PartialPivotLu.getri(2, &mut a, &[0, 2], &mut work), -4);
        assert_eq!(PartialPivotLu.getri(2, &mut a, &[1, 3], &mut work), -4);
        assert_eq!(PartialPivotLu.getri(2, &mut a, &[-1, 2], &mut work), -4);
        assert_eq!(a, vec![1.0, 0.0, 0.0, 1.0]);
    }

    /// Reports a bad argument from getri.
    struct Failing;
    impl LuKernel for Failing {
        fn name(&self) -> &'static str { "Failing" }
        fn getrf(&self, _: usize, _: &mut [f64], _: &mut [i32]) -> i32 { 0 }
        fn getri(&self, _: usize, _: &mut [f64], _: &[i32], _: &mut [f64]) -> i32 { -1 }
    }

    #[test]
    fn custom_kernel_status() {
        match Matrix::identity(2).invert_with(&Failing) {
            Err(MatrixError::BadArgument { routine: "getri", arg: 1 }) => {},
            r => panic!("unexpected: {:?}", r),
        }
    }

    #[test]
    fn random_inverses() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let n = rng.gen_range(1, 12);
            // diagonally dominant, hence well-conditioned
            let mut a = Matrix::zeros(n, n);
            for y in 0..n {
                for x in 0..n {
                    a[(x, y)] = 1.0 - 2.0 * rng.gen::<f64>();
                }
                a[(y, y)] += n as f64;
            }
            let inv = a.invert().unwrap();
            let (prod, eye) = (&inv * &a, Matrix::identity(n));
            assert_close!(abs=1e-10, prod.data(), eye.data(), "{:#?}", a);
        }
    }

    #[cfg(feature = "lapacke-support")]
    mod with_lapacke {
        use super::*;

        #[test]
        fn two_by_two() {
            let a = mat(&[4.0, 7.0, 2.0, 6.0], 2, 2);
            let inv = a.invert_with(&Lapacke).unwrap();
            assert_close!(abs=1e-12, inv.data(), &[0.6, -0.7, -0.2, 0.4][..]);
            let prod = inv.matmul(&a).unwrap();
            assert_close!(abs=1e-12, prod.data(), &[1.0, 0.0, 0.0, 1.0][..]);
        }

        #[test]
        fn needs_pivoting() {
            let a = mat(&[0.0, 1.0, 2.0, 1.0, 0.0, 3.0, 4.0, -3.0, 8.0], 3, 3);
            let inv = a.invert_with(&Lapacke).unwrap();
            let (prod, eye) = (a.matmul(&inv).unwrap(), Matrix::identity(3));
            assert_close!(abs=1e-12, prod.data(), eye.data());
        }

        #[test]
        fn singular() {
            let a = mat(&[1.0, 2.0, 2.0, 4.0], 2, 2);
            match a.invert_with(&Lapacke) {
                Err(MatrixError::Singular { routine: "getrf", .. }) => {},
                r => panic!("unexpected: {:?}", r),
            }
            match Matrix::zeros(3, 3).invert_with(&Lapacke) {
                Err(MatrixError::Singular { routine: "getrf", .. }) => {},
                r => panic!("unexpected: {:?}", r),
            }
        }

        #[test]
        fn agrees_with_partial_pivot() {
            use rand::Rng;

            let mut rng = rand::thread_rng();
            for _ in 0..50 {
                let n = rng.gen_range(1, 12);
                let mut a = Matrix::zeros(n, n);
                for y in 0..n {
                    for x in 0..n {
                        a[(x, y)] = 1.0 - 2.0 * rng.gen::<f64>();
                    }
                    a[(y, y)] += n as f64;
                }
                let ours = a.invert_with(&PartialPivotLu).unwrap();
                let theirs = a.invert_with(&Lapacke).unwrap();
                assert_close!(abs=1e-10, ours.data(), theirs.data(), "{:#?}", a);
            }
        }
    }
}
