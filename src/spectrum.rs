//! Accessors for the packed half spectrum written by
//! [`real_fft`](crate::rfft::real_fft).
//!
//! A length-`n` packed spectrum holds bins `0 ..= n/2`; the DC (`0`) and
//! Nyquist (`n/2`) bins are purely real and share slots 0 and 1.

use alloc::vec::Vec;

use crate::fft::{assert_len, validate_len, FftError};
use crate::num::{Complex, Float};

/// Bin `k` of a packed spectrum, for `0 <= k <= n/2`.
///
/// DC and Nyquist come back with a zero imaginary part.
///
/// # Panics
///
/// Panics if `data.len()` is not a valid transform length or `k > n/2`.
pub fn bin<T: Float>(data: &[T], k: usize) -> Complex<T> {
    let n = data.len();
    assert_len(n);
    let nyquist = n / 2;
    assert!(k <= nyquist, "bin {k} is past the Nyquist bin {nyquist}");
    if k == 0 {
        Complex::new(data[0], T::zero())
    } else if k == nyquist {
        Complex::new(data[1], T::zero())
    } else {
        Complex::new(data[2 * k], data[2 * k + 1])
    }
}

/// Peak amplitude of the sinusoid at bin `k`.
///
/// Interior bins scale the magnitude by `2/n`. DC and Nyquist have no mirror
/// image and scale by `1/n`, so a constant signal `c` reports amplitude `c`.
pub fn amplitude<T: Float>(data: &[T], k: usize) -> T {
    let n = data.len();
    let magnitude = bin(data, k).norm();
    let numerator = if k == 0 || k == n / 2 { 1.0 } else { 2.0 };
    magnitude * T::from_f64(numerator / n as f64)
}

/// Phase of bin `k` relative to a sine at the bin frequency, `atan2(re, -im)`.
///
/// A pure sine reports `0`, a pure cosine `π/2`.
pub fn phase<T: Float>(data: &[T], k: usize) -> T {
    let c = bin(data, k);
    c.re.atan2(-c.im)
}

/// Expands a packed spectrum into `n/2 + 1` complex bins.
pub fn unpack_spectrum<T: Float>(data: &[T], out: &mut [Complex<T>]) -> Result<(), FftError> {
    let n = data.len();
    validate_len(n)?;
    if out.len() != n / 2 + 1 {
        return Err(FftError::MismatchedLengths);
    }
    for (k, slot) in out.iter_mut().enumerate() {
        *slot = bin(data, k);
    }
    Ok(())
}

/// Allocating form of [`unpack_spectrum`].
pub fn spectrum_bins<T: Float>(data: &[T]) -> Result<Vec<Complex<T>>, FftError> {
    validate_len(data.len())?;
    let mut out = alloc::vec![Complex::zero(); data.len() / 2 + 1];
    unpack_spectrum(data, &mut out)?;
    Ok(out)
}

/// Packs `n/2 + 1` complex bins into the layout
/// [`inverse_real_fft`](crate::rfft::inverse_real_fft) expects.
///
/// The imaginary parts of the DC and Nyquist bins are dropped.
pub fn pack_spectrum<T: Float>(bins: &[Complex<T>], data: &mut [T]) -> Result<(), FftError> {
    let n = data.len();
    validate_len(n)?;
    let nyquist = n / 2;
    if bins.len() != nyquist + 1 {
        return Err(FftError::MismatchedLengths);
    }
    data[0] = bins[0].re;
    data[1] = bins[nyquist].re;
    for (k, c) in bins.iter().enumerate().take(nyquist).skip(1) {
        data[2 * k] = c.re;
        data[2 * k + 1] = c.im;
    }
    Ok(())
}
