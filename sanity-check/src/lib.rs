use hound::{SampleFormat, WavReader};
use lanefft::spectrum::amplitude;
use lanefft::{real_fft, FftError, LaneBlock};
use rustfft::num_complex::Complex32;
use rustfft::FftPlanner;
use std::error::Error;
use std::f32::consts::PI;
use std::path::Path;

/// Reads a WAV file as mono `f32` samples in `[-1, 1]` plus its sample rate.
///
/// Multi-channel files are mixed down by averaging each frame.
pub fn read_wav(path: &Path) -> Result<(Vec<f32>, u32), Box<dyn Error>> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / full_scale))
                .collect::<Result<_, _>>()?
        }
    };
    let channels = usize::from(spec.channels.max(1));
    let samples = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };
    Ok((samples, spec.sample_rate))
}

/// Hann window of length `n`.
pub fn hann(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f32 / n as f32).cos())
        .collect()
}

/// Splits `samples` into windowed frames of `frame_len`, zero padding the last one.
fn frames(samples: &[f32], frame_len: usize) -> Vec<Vec<f32>> {
    let window = hann(frame_len);
    let count = samples.len().div_ceil(frame_len).max(1);
    (0..count)
        .map(|f| {
            let start = f * frame_len;
            (0..frame_len)
                .map(|i| samples.get(start + i).copied().unwrap_or(0.0) * window[i])
                .collect()
        })
        .collect()
}

fn accumulate(spectrum: &[f32], sum: &mut [f32]) {
    for (k, acc) in sum.iter_mut().enumerate() {
        *acc += amplitude(spectrum, k);
    }
}

/// Mean per-bin amplitude over non-overlapping Hann-windowed frames.
///
/// Returns `frame_len / 2 + 1` bins. With `use_lanes`, frames go through the
/// four-wide lane transform four at a time (on SIMD lanes when the build
/// has them).
pub fn average_spectrum(
    samples: &[f32],
    frame_len: usize,
    use_lanes: bool,
) -> Result<Vec<f32>, FftError> {
    lanefft::validate_len(frame_len)?;
    let mut frames = frames(samples, frame_len);
    let mut sum = vec![0.0f32; frame_len / 2 + 1];

    let scalar_from = if use_lanes {
        lane_frames(&mut frames, &mut sum)?
    } else {
        0
    };
    for frame in frames[scalar_from..].iter_mut() {
        real_fft(frame);
        accumulate(frame, &mut sum);
    }

    let count = frames.len() as f32;
    sum.iter_mut().for_each(|v| *v /= count);
    Ok(sum)
}

/// Transforms whole groups of four frames through a [`LaneBlock`] and
/// returns the index of the first frame left for the scalar path.
fn lane_frames(frames: &mut [Vec<f32>], sum: &mut [f32]) -> Result<usize, FftError> {
    let groups = frames.len() / 4;
    if groups == 0 {
        return Ok(0);
    }
    let mut block = LaneBlock::new(frames[0].len())?;
    for group in frames[..groups * 4].chunks_exact_mut(4) {
        if let [a, b, c, d] = &mut *group {
            block.load([&a[..], &b[..], &c[..], &d[..]])?;
            block.real_fft();
            block.store([&mut a[..], &mut b[..], &mut c[..], &mut d[..]])?;
        }
        for frame in group.iter() {
            accumulate(frame, sum);
        }
    }
    Ok(groups * 4)
}

/// [`average_spectrum`] computed with rustfft, for cross-checking.
pub fn reference_spectrum(samples: &[f32], frame_len: usize) -> Vec<f32> {
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(frame_len);
    let frames = frames(samples, frame_len);
    let mut sum = vec![0.0f32; frame_len / 2 + 1];
    for frame in &frames {
        let mut buffer: Vec<Complex32> = frame.iter().map(|&x| Complex32::new(x, 0.0)).collect();
        fft.process(&mut buffer);
        for (k, acc) in sum.iter_mut().enumerate() {
            let scale = if k == 0 || k == frame_len / 2 { 1.0 } else { 2.0 };
            *acc += buffer[k].norm() * scale / frame_len as f32;
        }
    }
    let count = frames.len() as f32;
    sum.iter_mut().for_each(|v| *v /= count);
    sum
}

/// Frequency in Hz of the strongest non-DC bin.
pub fn dominant_frequency(spectrum: &[f32], frame_len: usize, sample_rate: u32) -> f32 {
    let peak = spectrum
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map_or(0, |(k, _)| k);
    peak as f32 * sample_rate as f32 / frame_len as f32
}
