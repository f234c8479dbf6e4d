//! Every buffer is validated before the first one is transformed, so a batch
//! either runs completely or leaves all buffers untouched. Each transform is
//! single-threaded; with the `parallel` feature, whole buffers are spread
//! across the rayon pool once the batch is large enough.

use crate::fft::{complex_fft, validate_len, FftError};
use crate::num::Lane;
use crate::rfft::{inverse_real_fft, real_fft};

#[cfg(feature = "parallel")]
use core::sync::atomic::{AtomicUsize, Ordering};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::OnceLock;

/// Total lane count above which batches go parallel when nothing overrides it.
#[cfg(feature = "parallel")]
pub const DEFAULT_PARALLEL_BATCH_THRESHOLD: usize = 1 << 16;

/// Override for the parallel batch threshold; `0` means no override.
#[cfg(feature = "parallel")]
static PARALLEL_BATCH_THRESHOLD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
#[cfg(feature = "parallel")]
static PARALLEL_BATCH_THRESHOLD_ENV: OnceLock<usize> = OnceLock::new();

#[cfg(feature = "parallel")]
/// Set the total number of lanes a batch needs before it is spread across threads.
///
/// Passing `0` reverts to `LANEFFT_PAR_BATCH_THRESHOLD` or the built-in default.
pub fn set_parallel_batch_threshold(lanes: usize) {
    PARALLEL_BATCH_THRESHOLD_OVERRIDE.store(lanes, Ordering::Relaxed);
}

#[cfg(feature = "parallel")]
/// Current parallel batch threshold.
///
/// Resolution order: [`set_parallel_batch_threshold`], then the
/// `LANEFFT_PAR_BATCH_THRESHOLD` environment variable (read once), then
/// [`DEFAULT_PARALLEL_BATCH_THRESHOLD`]. Unparsable or zero values in the
/// environment are ignored.
pub fn parallel_batch_threshold() -> usize {
    let override_lanes = PARALLEL_BATCH_THRESHOLD_OVERRIDE.load(Ordering::Relaxed);
    if override_lanes != 0 {
        return override_lanes;
    }
    *PARALLEL_BATCH_THRESHOLD_ENV.get_or_init(|| {
        match std::env::var("LANEFFT_PAR_BATCH_THRESHOLD") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(lanes) if lanes != 0 => lanes,
                _ => {
                    fft_log!(
                        warn,
                        "ignoring LANEFFT_PAR_BATCH_THRESHOLD={:?}: expected a positive integer",
                        raw
                    );
                    DEFAULT_PARALLEL_BATCH_THRESHOLD
                }
            },
            Err(_) => DEFAULT_PARALLEL_BATCH_THRESHOLD,
        }
    })
}

/// [`complex_fft`] on every buffer.
///
/// ```
/// let mut frames = vec![vec![1.0f32, 0.0, 0.0, 0.0]; 3];
/// lanefft::batch::batch_complex_fft(&mut frames)?;
/// assert!(frames.iter().all(|f| f == &[1.0, 0.0, 1.0, 0.0]));
/// # Ok::<(), lanefft::FftError>(())
/// ```
pub fn batch_complex_fft<L, B>(buffers: &mut [B]) -> Result<(), FftError>
where
    L: Lane,
    B: AsMut<[L]> + Send,
{
    run_batch(buffers, complex_fft::<L>)
}

/// [`real_fft`] on every buffer.
pub fn batch_real_fft<L, B>(buffers: &mut [B]) -> Result<(), FftError>
where
    L: Lane,
    B: AsMut<[L]> + Send,
{
    run_batch(buffers, real_fft::<L>)
}

/// [`inverse_real_fft`] on every buffer.
pub fn batch_inverse_real_fft<L, B>(buffers: &mut [B]) -> Result<(), FftError>
where
    L: Lane,
    B: AsMut<[L]> + Send,
{
    run_batch(buffers, inverse_real_fft::<L>)
}

fn run_batch<L, B>(buffers: &mut [B], transform: fn(&mut [L])) -> Result<(), FftError>
where
    L: Lane,
    B: AsMut<[L]> + Send,
{
    let mut total = 0usize;
    for (index, buffer) in buffers.iter_mut().enumerate() {
        let len = buffer.as_mut().len();
        if let Err(err) = validate_len(len) {
            fft_log!(debug, "batch rejected: buffer {} has length {}: {}", index, len, err);
            return Err(err);
        }
        total += len;
    }

    #[cfg(feature = "parallel")]
    if buffers.len() > 1 && total >= parallel_batch_threshold() {
        fft_log!(
            debug,
            "parallel batch of {} buffers ({} lanes) on {} threads",
            buffers.len(),
            total,
            rayon::current_num_threads()
        );
        buffers
            .par_iter_mut()
            .for_each(|buffer| transform(buffer.as_mut()));
        return Ok(());
    }

    fft_log!(debug, "sequential batch of {} buffers ({} lanes)", buffers.len(), total);
    for buffer in buffers.iter_mut() {
        transform(buffer.as_mut());
    }
    Ok(())
}
