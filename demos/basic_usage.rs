//! Basic usage example for lanefft
//!
//! Walks through the complex transform, the packed real transform and its
//! inverse, the spectrum accessors, and a batch of frames.

use lanefft::batch::batch_real_fft;
use lanefft::spectrum::{amplitude, phase, spectrum_bins};
use lanefft::{
    allocate_aligned, complex_fft, inverse_real_fft, real_fft, FftImpl, ScalarFftImpl,
};

fn main() -> Result<(), lanefft::FftError> {
    println!("=== lanefft Basic Usage Example ===\n");

    // 1. Complex FFT over interleaved pairs
    println!("1. Complex FFT");
    let mut data = vec![1.0f32, 0.0, 2.0, 0.0, 3.0, 0.0, 4.0, 0.0];
    println!("   Input pairs: {:?}", data.chunks(2).collect::<Vec<_>>());
    complex_fft(&mut data);
    println!(
        "   FFT: {:?}",
        data.chunks(2)
            .map(|c| format!("{:.2}{:+.2}i", c[0], c[1]))
            .collect::<Vec<_>>()
    );

    // 2. Real FFT with the packed layout
    println!("\n2. Real FFT");
    let n = 32;
    let signal: Vec<f64> = (0..n)
        .map(|j| (2.0 * std::f64::consts::PI * 3.0 * j as f64 / n as f64).sin())
        .collect();
    let mut spectrum = signal.clone();
    let fft = ScalarFftImpl::<f64>::default();
    fft.rfft(&mut spectrum)?;
    println!("   DC = {:.3}, Nyquist = {:.3}", spectrum[0], spectrum[1]);
    println!(
        "   bin 3: amplitude {:.3}, phase {:.3} rad",
        amplitude(&spectrum, 3),
        phase(&spectrum, 3)
    );
    let strongest = spectrum_bins(&spectrum)?
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
        .map(|(k, _)| k);
    println!("   strongest bin: {:?}", strongest);

    // 3. Inverse real FFT
    println!("\n3. Inverse real FFT");
    inverse_real_fft(&mut spectrum);
    let max_err = signal
        .iter()
        .zip(&spectrum)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    println!("   max round-trip error: {:.2e}", max_err);

    // 4. Aligned buffers
    println!("\n4. Aligned buffer");
    let mut buf = allocate_aligned::<f32>(16)?;
    buf[0] = 1.0;
    real_fft(&mut buf);
    println!("   impulse spectrum: {:?}", &buf[..6]);

    // 5. Batches of frames
    println!("\n5. Batch of frames");
    let mut frames: Vec<Vec<f32>> = (0..4).map(|f| vec![f as f32; 64]).collect();
    batch_real_fft(&mut frames)?;
    for (i, frame) in frames.iter().enumerate() {
        println!("   frame {i}: DC = {:.1}", frame[0]);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
