//! In-place complex FFT over interleaved `(re, im)` lane pairs.
//!
//! The transform is the iterative
//! [Cooley–Tukey algorithm](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm):
//! a [bit-reversal](crate::bitrev) pass followed by butterfly stages that
//! quadruple the span each time, with one radix-2 stage when the number of
//! pairs is an odd power of two. Twiddle factors come from a rotation
//! recurrence, so no tables are built and nothing is allocated.
//!
//! The output is the unnormalised DFT with the `e^{-2πi jk/N}` sign
//! convention, `N = n / 2` being the number of complex pairs.

use core::f64::consts::PI;
use core::fmt;
use core::marker::PhantomData;

use crate::bitrev::bit_reverse_permute;
use crate::num::{Float, Lane};
use crate::simd::Backend;
use crate::twiddle::Rotation;

/// Smallest supported buffer length (one complex pair, or two real samples).
pub const MIN_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    EmptyInput,
    /// Length below [`MIN_LEN`].
    TooShort(usize),
    NonPowerOfTwo(usize),
    MismatchedLengths,
    /// Aligned allocation of the given number of lanes failed.
    AllocationFailed(usize),
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::EmptyInput => f.write_str("input buffer is empty"),
            FftError::TooShort(n) => {
                write!(f, "buffer length {n} is shorter than the minimum of {MIN_LEN}")
            }
            FftError::NonPowerOfTwo(n) => write!(f, "buffer length {n} is not a power of two"),
            FftError::MismatchedLengths => f.write_str("buffer lengths do not match"),
            FftError::AllocationFailed(count) => {
                write!(f, "failed to allocate an aligned buffer of {count} lanes")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Checks that `n` is a usable transform length: a power of two, at least [`MIN_LEN`].
pub fn validate_len(n: usize) -> Result<(), FftError> {
    if n == 0 {
        Err(FftError::EmptyInput)
    } else if n < MIN_LEN {
        Err(FftError::TooShort(n))
    } else if !n.is_power_of_two() {
        Err(FftError::NonPowerOfTwo(n))
    } else {
        Ok(())
    }
}

#[track_caller]
#[inline]
pub(crate) fn assert_len(n: usize) {
    if let Err(err) = validate_len(n) {
        panic!("{err}");
    }
}

/// Replaces the `n / 2` interleaved complex pairs in `data` by their DFT.
///
/// # Panics
///
/// Panics if `data.len()` is not a power of two or is smaller than
/// [`MIN_LEN`]. Use [`try_complex_fft`] for a checked call.
///
/// # Example
///
/// ```
/// use lanefft::complex_fft;
///
/// // x = [1, i]: X0 = 1 + i, X1 = 1 - i
/// let mut data = [1.0f64, 0.0, 0.0, 1.0];
/// complex_fft(&mut data);
/// assert_eq!(data, [1.0, 1.0, 1.0, -1.0]);
/// ```
pub fn complex_fft<L: Lane>(data: &mut [L]) {
    let n = data.len();
    assert_len(n);
    bit_reverse_permute(data);

    // `mmax` is the scalar span of the sub-transforms already combined.
    let mut mmax = 2;
    while mmax < n {
        if 2 * mmax < n {
            radix4_stage(data, mmax);
        } else {
            radix2_stage(data, mmax);
        }
        mmax *= 4;
    }
}

/// Checked [`complex_fft`].
pub fn try_complex_fft<L: Lane>(data: &mut [L]) -> Result<(), FftError> {
    checked_len(data.len())?;
    complex_fft(data);
    Ok(())
}

pub(crate) fn checked_len(n: usize) -> Result<(), FftError> {
    if let Err(err) = validate_len(n) {
        fft_log!(debug, "rejecting transform of length {}: {}", n, err);
        return Err(err);
    }
    Ok(())
}

/// `(a_re + i a_im) · (w_re + i w_im)`
#[inline(always)]
fn cmul<L: Lane>(a_re: L, a_im: L, w_re: L, w_im: L) -> (L, L) {
    (a_re * w_re - a_im * w_im, a_im * w_re + a_re * w_im)
}

/// Combines four sub-transforms of span `mmax` into one of span `4 * mmax`.
///
/// After bit reversal the quarters at offsets `0, mmax, 2·mmax, 3·mmax` hold
/// the sub-transforms of the residues `0, 2, 1, 3` (mod 4), which is why the
/// second quarter takes `w²` and the third takes `w`.
fn radix4_stage<L: Lane>(data: &mut [L], mmax: usize) {
    let n = data.len();
    let step = 4 * mmax;
    let mut w = Rotation::<L>::new(-2.0 * PI / (2 * mmax) as f64);

    for m in (0..mmax).step_by(2) {
        let (w1_re, w1_im) = (w.re, w.im);
        let (w2_re, w2_im) = cmul(w1_re, w1_im, w1_re, w1_im);
        let (w3_re, w3_im) = cmul(w2_re, w2_im, w1_re, w1_im);

        for i0 in (m..n).step_by(step) {
            let i1 = i0 + mmax;
            let i2 = i1 + mmax;
            let i3 = i2 + mmax;

            let (a_re, a_im) = (data[i0], data[i0 + 1]);
            let (b_re, b_im) = cmul(data[i1], data[i1 + 1], w2_re, w2_im);
            let (c_re, c_im) = cmul(data[i2], data[i2 + 1], w1_re, w1_im);
            let (d_re, d_im) = cmul(data[i3], data[i3 + 1], w3_re, w3_im);

            data[i0] = (a_re + c_re) + (b_re + d_re);
            data[i0 + 1] = (a_im + c_im) + (b_im + d_im);
            data[i1] = (a_re + c_im) - (b_re + d_im);
            data[i1 + 1] = (a_im - c_re) - (b_im - d_re);
            data[i2] = (a_re - c_re) + (b_re - d_re);
            data[i2 + 1] = (a_im - c_im) + (b_im - d_im);
            data[i3] = (a_re - c_im) - (b_re - d_im);
            data[i3 + 1] = (a_im + c_re) - (b_im + d_re);
        }
        w.advance();
    }
}

/// Final stage combining two halves of span `mmax = n / 2`.
fn radix2_stage<L: Lane>(data: &mut [L], mmax: usize) {
    let n = data.len();
    let step = 2 * mmax;
    let mut w = Rotation::<L>::new(-2.0 * PI / mmax as f64);

    for m in (0..mmax).step_by(2) {
        for i in (m..n).step_by(step) {
            let j = i + mmax;
            let (t_re, t_im) = cmul(data[j], data[j + 1], w.re, w.im);
            data[j] = data[i] - t_re;
            data[j + 1] = data[i + 1] - t_im;
            data[i] = data[i] + t_re;
            data[i + 1] = data[i + 1] + t_im;
        }
        w.advance();
    }
}

/// Object-style access to the transforms, mirroring the free functions with
/// checked lengths.
///
/// ```
/// use lanefft::{FftImpl, ScalarFftImpl};
///
/// let fft = ScalarFftImpl::<f32>::default();
/// let mut data = vec![0.0f32; 16];
/// data[0] = 1.0;
/// fft.rfft(&mut data)?;
/// fft.irfft(&mut data)?;
/// assert!((data[0] - 1.0).abs() < 1e-6);
/// # Ok::<(), lanefft::FftError>(())
/// ```
pub trait FftImpl<L: Lane> {
    /// Forward complex transform, see [`complex_fft`].
    fn fft(&self, data: &mut [L]) -> Result<(), FftError> {
        try_complex_fft(data)
    }

    /// Forward real transform, see [`real_fft`](crate::rfft::real_fft).
    fn rfft(&self, data: &mut [L]) -> Result<(), FftError> {
        crate::rfft::try_real_fft(data)
    }

    /// Inverse real transform, see [`inverse_real_fft`](crate::rfft::inverse_real_fft).
    fn irfft(&self, data: &mut [L]) -> Result<(), FftError> {
        crate::rfft::try_inverse_real_fft(data)
    }

    /// Instruction set the lane arithmetic runs on.
    fn backend(&self) -> Backend;
}

/// Scalar lanes (`f32` or `f64`), available on every target.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarFftImpl<T: Float> {
    _phantom: PhantomData<T>,
}

impl<T: Float + Lane<Scalar = T>> FftImpl<T> for ScalarFftImpl<T> {
    fn backend(&self) -> Backend {
        Backend::Scalar
    }
}
