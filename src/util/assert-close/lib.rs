/* ************************************************************************ **
** This file is part of dense-matrix, and is licensed under EITHER the MIT  **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! `assert_close!`, for comparing floats (and slices of floats) in tests.
//!
//! ```
//! # #[macro_use] extern crate dense_matrix_assert_close;
//! # fn main() {
//! assert_close!(1.0, 1.0 + 1e-12);
//! assert_close!(abs=1e-8, &[0.0, 1.0][..], &[1e-10, 1.0][..]);
//! assert_close!(rel=1e-3, abs=0.0, 1000.0, 1000.5, "{} {}", "custom", "message");
//! # }
//! ```

use std::fmt;

pub const DEFAULT_REL_TOL: f64 = 1e-9;

#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {
        assert_close_impl!{@parsing [$($t)*] [[@rel $crate::DEFAULT_REL_TOL] [@abs 0.0]]}
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! assert_close_impl {
    (@parsing [rel=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@rel $tol]]);
    };
    (@parsing [abs=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@abs $tol]]);
    };
    (@parsing [$a:expr, $b:expr $(,)*] $assignments:tt) => {
        assert_close_impl!(@expand $assignments [$a, $b] ["not nearly equal!"])
    };
    (@parsing [$a:expr, $b:expr, $($fmt:tt)+] $assignments:tt) => {
        assert_close_impl!(@expand $assignments [$a, $b] [$($fmt)+])
    };
    (@expand [$([@$which:ident $tol:expr])*] [$a:expr, $b:expr] [$($fmt:tt)+]) => {
        #[allow(unused_mut)]
        #[allow(unused_assignments)]
        {
            let (a, b) = ($a, $b);
            let mut tol = $crate::Tolerances { rel: 0.0, abs: 0.0 };
            $( tol.$which = $tol; )*

            if let Err(e) = $crate::CheckClose::check_close(&a, &b, tol) {
                panic!("{} ({})\n left: {:?}\nright: {:?}\n{}", format!($($fmt)+), tol, a, b, e);
            }
        }
    };
}

/// Implementation from Python 3.5's `math.isclose`.
#[inline]
pub fn is_close(a: f64, b: f64, Tolerances { rel, abs }: Tolerances) -> bool {
    assert!(rel >= 0.0);
    assert!(abs >= 0.0);

    // catch infinities of same sign
    if a == b { return true; }

    // catch infinities of opposite sign, avoiding infinite relative tolerance
    if a.is_infinite() || b.is_infinite() { return false; }

    // NaN falls through to false
    (a - b).abs() < abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    pub rel: f64,
    pub abs: f64,
}

impl fmt::Display for Tolerances {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "tolerances: rel={}, abs={}", self.rel, self.abs)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckCloseError {
    #[error("failed at{}:\n  left: {:?}\n right: {:?}", .index.map(|i| format!(" index {}", i)).unwrap_or_default(), .left, .right)]
    NotClose { index: Option<usize>, left: f64, right: f64 },
    #[error("lengths differ: {0} vs {1}")]
    Length(usize, usize),
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    /// Test that all values of self and other are close.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

impl CheckClose for f64 {
    #[inline]
    fn check_close(&self, other: &f64, tol: Tolerances) -> Result<(), CheckCloseError> {
        match is_close(*self, *other, tol) {
            true => Ok(()),
            false => Err(CheckCloseError::NotClose { index: None, left: *self, right: *other }),
        }
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { CheckClose::check_close(*self, *other, tol) }
}

impl CheckClose for [f64] {
    fn check_close(&self, other: &[f64], tol: Tolerances) -> Result<(), CheckCloseError> {
        if self.len() != other.len() {
            return Err(CheckCloseError::Length(self.len(), other.len()));
        }
        match self.iter().zip(other).position(|(&a, &b)| !is_close(a, b, tol)) {
            None => Ok(()),
            Some(i) => Err(CheckCloseError::NotClose { index: Some(i), left: self[i], right: other[i] }),
        }
    }
}

impl CheckClose for Vec<f64> {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl<const N: usize> CheckClose for [f64; N] {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}
