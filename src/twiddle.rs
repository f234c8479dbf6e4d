//! Incremental twiddle-factor rotation.

use crate::num::{Float, Lane};

/// Rotation state `w = e^{i k θ}`, advanced by one step of `θ` at a time.
///
/// The step is kept as `(1 - cos θ, sin θ)`, with `1 - cos θ` evaluated as
/// `2 sin²(θ / 2)`. For the tiny angles of long transforms `cos θ` rounds to
/// one, while the half-angle form keeps every significant bit.
///
/// Constants are computed in `f64` and rounded once into the lane's scalar
/// type, so scalar and vector lanes see identical twiddles.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rotation<L: Lane> {
    pub(crate) re: L,
    pub(crate) im: L,
    step_re: L,
    step_im: L,
}

impl<L: Lane> Rotation<L> {
    /// Starts at `w = 1` with step angle `theta` in radians.
    #[inline]
    pub(crate) fn new(theta: f64) -> Self {
        let half = libm::sin(0.5 * theta);
        Self {
            re: L::splat(L::Scalar::one()),
            im: L::splat(L::Scalar::zero()),
            step_re: L::splat(L::Scalar::from_f64(2.0 * half * half)),
            step_im: L::splat(L::Scalar::from_f64(libm::sin(theta))),
        }
    }

    /// `w ← w · e^{iθ}`.
    #[inline(always)]
    pub(crate) fn advance(&mut self) {
        let re = self.re - self.re * self.step_re - self.im * self.step_im;
        let im = self.im - self.im * self.step_re + self.re * self.step_im;
        self.re = re;
        self.im = im;
    }
}
