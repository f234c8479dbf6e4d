use clap::Parser;
use lanefft::Backend;
use sanity_check::{average_spectrum, dominant_frequency, read_wav, reference_spectrum};
use std::error::Error;
use std::path::PathBuf;

/// Average the spectrum of a WAV file with lanefft, cross-check it against
/// rustfft and report the dominant frequency.
#[derive(Parser)]
struct Args {
    /// Path to input WAV file
    input: PathBuf,

    /// Frame length for each transform (power of two)
    #[arg(long, default_value_t = 4096)]
    frame_len: usize,

    /// Transform four frames at a time through the SIMD lane type
    #[arg(long)]
    simd: bool,

    /// Skip the rustfft cross-check
    #[arg(long)]
    no_reference: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let (samples, sample_rate) = read_wav(&args.input)?;
    println!(
        "{} samples at {} Hz, backend {}",
        samples.len(),
        sample_rate,
        Backend::active().name()
    );

    let spectrum = average_spectrum(&samples, args.frame_len, args.simd)?;
    let peak = dominant_frequency(&spectrum, args.frame_len, sample_rate);
    println!(
        "Dominant frequency: {:.1} Hz (bin width {:.2} Hz)",
        peak,
        sample_rate as f32 / args.frame_len as f32
    );

    if !args.no_reference {
        let reference = reference_spectrum(&samples, args.frame_len);
        let max_diff = spectrum
            .iter()
            .zip(&reference)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        println!("Max difference against rustfft: {:.6}", max_diff);
    }
    Ok(())
}
