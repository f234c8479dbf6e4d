use crate::aligned::AlignedBuffer;
use crate::fft::{complex_fft, validate_len, FftError};
use crate::rfft::{inverse_real_fft, real_fft};

use super::Backend;
#[cfg(lanefft_simd)]
use super::{deinterleave_lanes, interleave_lanes, F32x4};

/// Four same-length `f32` signals transformed together.
///
/// With a lane backend the signals share one [`F32x4`] buffer and each
/// transform is a single pass; otherwise each signal keeps its own aligned
/// buffer and is transformed in turn. Callers get the same results either
/// way without naming [`F32x4`] themselves.
///
/// ```
/// use lanefft::simd::LaneBlock;
///
/// let impulse = [1.0f32, 0.0, 0.0, 0.0];
/// let mut block = LaneBlock::new(4)?;
/// block.load([&impulse[..]; 4])?;
/// block.real_fft();
/// let mut out = [[0.0f32; 4]; 4];
/// let [a, b, c, d] = &mut out;
/// block.store([a, b, c, d])?;
/// assert!(out.iter().all(|s| s == &[1.0, 1.0, 1.0, 0.0]));
/// # Ok::<(), lanefft::FftError>(())
/// ```
pub struct LaneBlock {
    #[cfg(lanefft_simd)]
    lanes: AlignedBuffer<F32x4>,
    #[cfg(not(lanefft_simd))]
    lanes: [AlignedBuffer<f32>; 4],
}

impl LaneBlock {
    /// Allocates a zeroed block for four signals of `len` samples.
    pub fn new(len: usize) -> Result<Self, FftError> {
        validate_len(len)?;
        #[cfg(lanefft_simd)]
        let lanes = AlignedBuffer::zeroed(len)?;
        #[cfg(not(lanefft_simd))]
        let lanes = [
            AlignedBuffer::zeroed(len)?,
            AlignedBuffer::zeroed(len)?,
            AlignedBuffer::zeroed(len)?,
            AlignedBuffer::zeroed(len)?,
        ];
        Ok(Self { lanes })
    }

    /// Samples per signal.
    pub fn len(&self) -> usize {
        #[cfg(lanefft_simd)]
        return self.lanes.len();
        #[cfg(not(lanefft_simd))]
        return self.lanes[0].len();
    }

    /// Always `false`: [`LaneBlock::new`] rejects lengths below two.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Backend the transforms run on.
    pub fn backend(&self) -> Backend {
        Backend::active()
    }

    /// Copies `signals` in, signal `s` going to slot `s`.
    pub fn load(&mut self, signals: [&[f32]; 4]) -> Result<(), FftError> {
        #[cfg(lanefft_simd)]
        return interleave_lanes(signals, &mut self.lanes);
        #[cfg(not(lanefft_simd))]
        {
            if signals.iter().any(|s| s.len() != self.len()) {
                return Err(FftError::MismatchedLengths);
            }
            for (buf, signal) in self.lanes.iter_mut().zip(signals) {
                buf.copy_from_slice(signal);
            }
            Ok(())
        }
    }

    /// Copies slot `s` out to `out[s]`.
    pub fn store(&self, out: [&mut [f32]; 4]) -> Result<(), FftError> {
        #[cfg(lanefft_simd)]
        return deinterleave_lanes(&self.lanes, out);
        #[cfg(not(lanefft_simd))]
        {
            if out.iter().any(|s| s.len() != self.len()) {
                return Err(FftError::MismatchedLengths);
            }
            for (dst, buf) in out.into_iter().zip(self.lanes.iter()) {
                dst.copy_from_slice(buf);
            }
            Ok(())
        }
    }

    /// [`complex_fft`] on every slot.
    pub fn complex_fft(&mut self) {
        #[cfg(lanefft_simd)]
        complex_fft(&mut self.lanes);
        #[cfg(not(lanefft_simd))]
        self.lanes.iter_mut().for_each(|buf| complex_fft(buf));
    }

    /// [`real_fft`] on every slot.
    pub fn real_fft(&mut self) {
        #[cfg(lanefft_simd)]
        real_fft(&mut self.lanes);
        #[cfg(not(lanefft_simd))]
        self.lanes.iter_mut().for_each(|buf| real_fft(buf));
    }

    /// [`inverse_real_fft`] on every slot.
    pub fn inverse_real_fft(&mut self) {
        #[cfg(lanefft_simd)]
        inverse_real_fft(&mut self.lanes);
        #[cfg(not(lanefft_simd))]
        self.lanes.iter_mut().for_each(|buf| inverse_real_fft(buf));
    }
}
