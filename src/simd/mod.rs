//! Four-wide `f32` lanes over the instruction set chosen at build time.
//!
//! The build script inspects the target and sets `lanefft_simd = "sse"` on
//! x86/x86_64 or `lanefft_simd = "neon"` on aarch64 (when the `simd` feature
//! is enabled). [`F32x4`] only exists when one of them is set; there is no
//! runtime dispatch. On every other target the scalar lanes remain available.
//!
//! A buffer of `n` [`F32x4`] values holds four independent length-`n`
//! transforms, one per slot, and every kernel in this crate runs on it
//! unchanged. [`LaneBlock`] exists on every target and uses [`F32x4`] when
//! [`HAS_LANES`] is set, so dependent crates need no target checks of their own.

#[cfg(lanefft_simd)]
use core::fmt;
#[cfg(lanefft_simd)]
use core::ops::{Add, Mul, Sub};

#[cfg(lanefft_simd)]
use crate::fft::{FftError, FftImpl};
#[cfg(lanefft_simd)]
use crate::num::Lane;

mod block;
#[cfg(lanefft_simd = "neon")]
mod neon;
#[cfg(lanefft_simd = "sse")]
mod sse;

#[cfg(lanefft_simd = "neon")]
use neon as arch;
#[cfg(lanefft_simd = "sse")]
use sse as arch;

pub use block::LaneBlock;

/// Required alignment, in bytes, of SIMD lane storage.
pub const SIMD_ALIGN: usize = 16;

/// Whether this build has a lane backend, i.e. whether [`F32x4`] exists.
pub const HAS_LANES: bool = cfg!(lanefft_simd);

/// Lane arithmetic backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Plain `f32`/`f64` arithmetic, available everywhere.
    Scalar,
    /// x86/x86_64 SSE (128-bit, 4 floats at a time).
    #[cfg(lanefft_simd = "sse")]
    Sse,
    /// aarch64 NEON (128-bit, 4 floats at a time).
    #[cfg(lanefft_simd = "neon")]
    Neon,
}

impl Backend {
    /// The backend [`F32x4`] is built on, or [`Backend::Scalar`] when the
    /// target has none.
    pub const fn active() -> Self {
        #[cfg(lanefft_simd = "sse")]
        return Backend::Sse;
        #[cfg(lanefft_simd = "neon")]
        return Backend::Neon;
        #[cfg(not(lanefft_simd))]
        return Backend::Scalar;
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            #[cfg(lanefft_simd = "sse")]
            Self::Sse => "sse",
            #[cfg(lanefft_simd = "neon")]
            Self::Neon => "neon",
        }
    }

    /// Number of transforms one lane carries on this backend.
    pub fn width(self) -> usize {
        match self {
            Self::Scalar => 1,
            #[cfg(lanefft_simd = "sse")]
            Self::Sse => 4,
            #[cfg(lanefft_simd = "neon")]
            Self::Neon => 4,
        }
    }
}

/// Returns `true` if `ptr` sits on a [`SIMD_ALIGN`] boundary.
#[inline(always)]
pub fn is_simd_aligned<T>(ptr: *const T) -> bool {
    (ptr as usize) % SIMD_ALIGN == 0
}

/// Four `f32` slots processed in lockstep.
#[cfg(lanefft_simd)]
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x4(arch::Raw);

#[cfg(lanefft_simd)]
const _: () = assert!(core::mem::align_of::<F32x4>() == SIMD_ALIGN);

#[cfg(lanefft_simd)]
impl F32x4 {
    #[inline(always)]
    pub fn splat(value: f32) -> Self {
        Self(arch::splat(value))
    }

    #[inline(always)]
    pub fn from_array(values: [f32; 4]) -> Self {
        Self(arch::load(&values))
    }

    #[inline(always)]
    pub fn to_array(self) -> [f32; 4] {
        arch::store(self.0)
    }

    /// Value of slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    #[inline]
    pub fn lane(self, index: usize) -> f32 {
        self.to_array()[index]
    }
}

#[cfg(lanefft_simd)]
impl Default for F32x4 {
    fn default() -> Self {
        Self::splat(0.0)
    }
}

#[cfg(lanefft_simd)]
impl PartialEq for F32x4 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

#[cfg(lanefft_simd)]
impl fmt::Debug for F32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("F32x4").field(&self.to_array()).finish()
    }
}

#[cfg(lanefft_simd)]
impl From<[f32; 4]> for F32x4 {
    fn from(values: [f32; 4]) -> Self {
        Self::from_array(values)
    }
}

#[cfg(lanefft_simd)]
impl Add for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(arch::add(self.0, rhs.0))
    }
}

#[cfg(lanefft_simd)]
impl Sub for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(arch::sub(self.0, rhs.0))
    }
}

#[cfg(lanefft_simd)]
impl Mul for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(arch::mul(self.0, rhs.0))
    }
}

#[cfg(lanefft_simd)]
impl Lane for F32x4 {
    type Scalar = f32;
    const WIDTH: usize = 4;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        F32x4::splat(value)
    }
}

/// Packs four equally long scalar signals into `out`, signal `s` going to slot `s`.
#[cfg(lanefft_simd)]
pub fn interleave_lanes(signals: [&[f32]; 4], out: &mut [F32x4]) -> Result<(), FftError> {
    if signals.iter().any(|s| s.len() != out.len()) {
        return Err(FftError::MismatchedLengths);
    }
    for (i, lane) in out.iter_mut().enumerate() {
        *lane = F32x4::from_array([signals[0][i], signals[1][i], signals[2][i], signals[3][i]]);
    }
    Ok(())
}

/// Splits `data` back into four scalar signals, slot `s` going to `out[s]`.
#[cfg(lanefft_simd)]
pub fn deinterleave_lanes(data: &[F32x4], out: [&mut [f32]; 4]) -> Result<(), FftError> {
    if out.iter().any(|s| s.len() != data.len()) {
        return Err(FftError::MismatchedLengths);
    }
    let [s0, s1, s2, s3] = out;
    for (i, lane) in data.iter().enumerate() {
        let [a, b, c, d] = lane.to_array();
        s0[i] = a;
        s1[i] = b;
        s2[i] = c;
        s3[i] = d;
    }
    Ok(())
}

/// [`FftImpl`] over [`F32x4`] lanes: four transforms per call.
#[cfg(lanefft_simd)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SimdFftImpl;

#[cfg(lanefft_simd)]
impl FftImpl<F32x4> for SimdFftImpl {
    fn backend(&self) -> Backend {
        Backend::active()
    }
}
