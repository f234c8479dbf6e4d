//! Four independent transforms in one pass through `F32x4` lanes.

#[cfg(lanefft_simd)]
fn main() -> Result<(), lanefft::FftError> {
    use lanefft::simd::{deinterleave_lanes, interleave_lanes};
    use lanefft::spectrum::amplitude;
    use lanefft::{allocate_aligned, real_fft, Backend, F32x4};

    const N: usize = 256;
    println!("backend: {}", Backend::active().name());

    // Four tones at bins 4, 8, 16 and 32.
    let signals: Vec<Vec<f32>> = [4usize, 8, 16, 32]
        .iter()
        .map(|&bin| {
            (0..N)
                .map(|j| (2.0 * std::f32::consts::PI * (bin * j) as f32 / N as f32).sin())
                .collect()
        })
        .collect();

    let mut lanes = allocate_aligned::<F32x4>(N)?;
    interleave_lanes(
        [&signals[0], &signals[1], &signals[2], &signals[3]],
        &mut lanes,
    )?;
    real_fft(&mut lanes);

    let mut spectra: [Vec<f32>; 4] = std::array::from_fn(|_| vec![0.0; N]);
    let [a, b, c, d] = &mut spectra;
    deinterleave_lanes(&lanes, [a, b, c, d])?;

    for (slot, spectrum) in spectra.iter().enumerate() {
        let peak = (1..N / 2)
            .max_by(|&x, &y| amplitude(spectrum, x).total_cmp(&amplitude(spectrum, y)))
            .unwrap_or(0);
        println!(
            "slot {slot}: peak at bin {peak}, amplitude {:.3}",
            amplitude(spectrum, peak)
        );
    }
    Ok(())
}

#[cfg(not(lanefft_simd))]
fn main() {
    println!(
        "no SIMD backend on this target ({}); scalar lanes only",
        lanefft::Backend::active().name()
    );
}
