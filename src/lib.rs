//! # lanefft - in-place power-of-two FFT kernels over scalar and SIMD lanes
//!
//! A small FFT kernel written once, generically, over a [`Lane`] type: scalar
//! `f32`, scalar `f64`, or a 4-wide [`F32x4`] vector that carries four
//! independent transforms through the same instruction stream.
//!
//! ## Features
//!
//! - **In place, allocation free**: every transform rewrites the caller's buffer
//! - **Radix-4 butterflies** with a single radix-2 stage for odd powers of two
//! - **Real transforms** through the half-length complex transform plus an untangle pass
//! - **Inverse real transform** that reuses the forward engine
//! - **SSE / NEON lanes** selected at build time
//! - **`no_std`** with `alloc`
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` for [`FftError`]
//! - `simd` (default): enable the build-time SSE (x86/x86_64) or NEON (aarch64) backend
//! - `parallel`: run [`batch`] transforms of independent buffers on rayon
//! - `verbose-logging`: emit `log` records for allocation, validation and batch dispatch
//!
//! ## Buffer layout
//!
//! A buffer of `n` lanes holds `n / 2` interleaved complex pairs for
//! [`complex_fft`], or `n` real samples for [`real_fft`]. After [`real_fft`],
//! `data[0]` is the DC term, `data[1]` the Nyquist term, and
//! `data[2k], data[2k + 1]` the real and imaginary parts of bin `k`.
//! `n` must be a power of two and at least [`MIN_LEN`].
//!
//! ```
//! use lanefft::{inverse_real_fft, real_fft};
//!
//! let mut data = [1.0f32, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
//! real_fft(&mut data);
//! assert_eq!(data, [1.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
//! inverse_real_fft(&mut data);
//! assert!((data[0] - 1.0).abs() < 1e-6);
//! ```
//!
//! ## Platform Support
//!
//! | Platform | Lane backend | cfg |
//! |----------|--------------|-----|
//! | x86_64   | SSE          | `lanefft_simd = "sse"` |
//! | x86      | SSE (when the target enables it) | `lanefft_simd = "sse"` |
//! | AArch64  | NEON         | `lanefft_simd = "neon"` |
//! | Generic  | Scalar only  | - |
//!
//! ## Examples
//!
//! ```bash
//! cargo run --example basic_usage
//! cargo run --example simd_lanes
//! cargo run --example verbose_logging --features verbose-logging
//! ```

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Forwards to `log` when `verbose-logging` is enabled and compiles to nothing otherwise.
macro_rules! fft_log {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "verbose-logging")]
        log::$level!($($arg)+);
        #[cfg(not(feature = "verbose-logging"))]
        let _ = format_args!($($arg)+);
    }};
}

/// Owned, SIMD-aligned lane storage.
pub mod aligned;
/// Transform many independent buffers in one call.
pub mod batch;
pub mod bitrev;
pub mod fft;
/// Scalar floats, lanes and complex values.
pub mod num;
pub mod rfft;
pub mod simd;
/// Reading bins, amplitudes and phases out of a packed real spectrum.
pub mod spectrum;
mod twiddle;

pub use aligned::{allocate_aligned, free_aligned, AlignedBuffer};
pub use bitrev::bit_reverse_permute;
pub use fft::{complex_fft, try_complex_fft, validate_len, FftError, FftImpl, ScalarFftImpl, MIN_LEN};
pub use num::{Complex, Complex32, Complex64, Float, Lane};
pub use rfft::{inverse_real_fft, real_fft, try_inverse_real_fft, try_real_fft};
pub use simd::{Backend, LaneBlock, HAS_LANES};
#[cfg(lanefft_simd)]
pub use simd::{F32x4, SimdFftImpl};
