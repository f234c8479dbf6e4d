//! Real-input transforms built on the complex engine.
//!
//! `n` real samples are viewed as `n / 2` complex pairs, transformed with
//! [`complex_fft`], and then *untangled*: the spectra of the even and odd
//! samples are separated and recombined into the first half of the real
//! spectrum. Since the spectrum of a real signal is Hermitian, that half
//! describes it completely. It is packed back into the same `n` slots:
//!
//! | slots | content |
//! |-------|---------|
//! | `data[0]` | DC term (real) |
//! | `data[1]` | Nyquist term (real) |
//! | `data[2k], data[2k + 1]`, `1 <= k < n/2` | re / im of bin `k` |
//!
//! The inverse mirrors and rescales the packed spectrum so that the same
//! untangle pass followed by the forward complex transform yields the
//! original samples. There is no separate inverse butterfly.

use core::f64::consts::PI;

use crate::fft::{assert_len, checked_len, complex_fft, FftError};
use crate::num::{Float, Lane};
use crate::twiddle::Rotation;

/// Replaces `n` real samples by their packed half spectrum (see the module docs).
///
/// The result is unnormalised: a constant signal `c` yields `data[0] = n·c`.
///
/// # Panics
///
/// Panics if `data.len()` is not a power of two or is smaller than
/// [`MIN_LEN`](crate::fft::MIN_LEN).
///
/// # Example
///
/// ```
/// use lanefft::real_fft;
///
/// let mut data = [1.0f32, 2.0, 3.0, 4.0];
/// real_fft(&mut data);
/// // DC = 10, Nyquist = -2, bin 1 = -2 + 2i
/// for (got, want) in data.iter().zip([10.0, -2.0, -2.0, 2.0]) {
///     assert!((got - want).abs() < 1e-5);
/// }
/// ```
pub fn real_fft<L: Lane>(data: &mut [L]) {
    assert_len(data.len());
    complex_fft(data);
    untangle(data);
}

/// Turns a packed half spectrum produced by [`real_fft`] back into samples.
///
/// Includes the `1 / n` normalisation, so `inverse_real_fft(real_fft(x)) ≈ x`.
///
/// # Panics
///
/// Panics under the same conditions as [`real_fft`].
pub fn inverse_real_fft<L: Lane>(data: &mut [L]) {
    assert_len(data.len());
    mirror_and_scale(data);
    untangle(data);
    complex_fft(data);
}

/// Checked [`real_fft`].
pub fn try_real_fft<L: Lane>(data: &mut [L]) -> Result<(), FftError> {
    checked_len(data.len())?;
    real_fft(data);
    Ok(())
}

/// Checked [`inverse_real_fft`].
pub fn try_inverse_real_fft<L: Lane>(data: &mut [L]) -> Result<(), FftError> {
    checked_len(data.len())?;
    inverse_real_fft(data);
    Ok(())
}

/// Separates the interleaved even/odd spectra left by the half-length complex
/// transform and writes the packed real spectrum.
///
/// Pair `i / 2` is combined with its mirror `(n - i) / 2` using the twiddle
/// `e^{2πi·k/n}`, which is advanced before its first use. The middle pair
/// (`i = n / 2`) is its own mirror; the mirror write lands last.
pub(crate) fn untangle<L: Lane>(data: &mut [L]) {
    let n = data.len();
    let (re0, im0) = (data[0], data[1]);
    data[0] = re0 + im0;
    data[1] = re0 - im0;

    let half = L::splat(L::Scalar::from_f64(0.5));
    let mut w = Rotation::<L>::new(2.0 * PI / n as f64);
    for i in (2..=n / 2).step_by(2) {
        w.advance();
        let j = n - i;
        let (re0, im0, re1, im1) = (data[i], data[i + 1], data[j], data[j + 1]);

        let sum_re = re0 + re1;
        let diff_re = re0 - re1;
        let sum_im = im0 + im1;
        let diff_im = im0 - im1;
        let rot_re = sum_im * w.re - diff_re * w.im;
        let rot_im = diff_re * w.re + sum_im * w.im;

        data[i] = half * (sum_re + rot_re);
        data[i + 1] = half * (diff_im - rot_im);
        data[j] = half * (sum_re - rot_re);
        data[j + 1] = half * ((im1 - im0) - rot_im);
    }
}

/// Prepares a packed spectrum for the inverse pass: swaps every pair `k` with
/// its mirror `n/2 - k` for `1 <= k < n/4` and scales everything by `2 / n`,
/// then halves the DC and Nyquist slots once more.
///
/// For `n = 2` only the halving applies; for `n = 4` there is nothing to swap.
pub(crate) fn mirror_and_scale<L: Lane>(data: &mut [L]) {
    let n = data.len();
    if n > 2 {
        let scale = L::splat(L::Scalar::from_f64(2.0 / n as f64));
        for i in (2..n / 2).step_by(2) {
            let j = n - i;
            data.swap(i, j);
            data.swap(i + 1, j + 1);
            for k in [i, i + 1, j, j + 1] {
                data[k] = data[k] * scale;
            }
        }
        let mid = n / 2;
        for k in [0, 1, mid, mid + 1] {
            data[k] = data[k] * scale;
        }
    }
    let half = L::splat(L::Scalar::from_f64(0.5));
    data[0] = data[0] * half;
    data[1] = data[1] * half;
}
