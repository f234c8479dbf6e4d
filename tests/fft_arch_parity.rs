// Test intent: every slot of an F32x4 transform matches the scalar f32 transform of that signal.
#![cfg(lanefft_simd)]

use lanefft::simd::{deinterleave_lanes, interleave_lanes};
use lanefft::{
    allocate_aligned, complex_fft, inverse_real_fft, real_fft, Backend, F32x4, FftImpl,
    ScalarFftImpl, SimdFftImpl,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Large amplitude used to check stability with extreme values.
const EXTREME_SAMPLE: f32 = 1.0e30;

fn random_signals(n: usize, seed: u64) -> [Vec<f32>; 4] {
    let mut rng = StdRng::seed_from_u64(seed);
    std::array::from_fn(|_| (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect())
}

fn pack(signals: &[Vec<f32>; 4]) -> Vec<F32x4> {
    let mut lanes = vec![F32x4::default(); signals[0].len()];
    interleave_lanes(
        [&signals[0], &signals[1], &signals[2], &signals[3]],
        &mut lanes,
    )
    .expect("Invariant: signals share one length");
    lanes
}

fn unpack(lanes: &[F32x4]) -> [Vec<f32>; 4] {
    let mut out: [Vec<f32>; 4] = std::array::from_fn(|_| vec![0.0; lanes.len()]);
    let [a, b, c, d] = &mut out;
    deinterleave_lanes(lanes, [a, b, c, d]).expect("Invariant: outputs sized to lanes");
    out
}

#[test]
fn complex_fft_matches_scalar_per_slot() {
    for log2 in 1..=11 {
        let n = 1usize << log2;
        let signals = random_signals(n, log2 as u64);
        let mut lanes = pack(&signals);
        complex_fft(&mut lanes);
        for (slot, got) in unpack(&lanes).iter().enumerate() {
            let mut want = signals[slot].clone();
            complex_fft(&mut want);
            for (a, b) in got.iter().zip(&want) {
                assert!((a - b).abs() <= 1e-6 * n as f32, "n={n} slot {slot}");
            }
        }
    }
}

#[test]
fn real_fft_and_inverse_match_scalar_per_slot() {
    for log2 in 1..=11 {
        let n = 1usize << log2;
        let signals = random_signals(n, 100 + log2 as u64);
        let mut lanes = pack(&signals);
        let simd = SimdFftImpl;
        simd.rfft(&mut lanes).expect("Invariant: operation should succeed");
        let spectra = unpack(&lanes);
        simd.irfft(&mut lanes).expect("Invariant: operation should succeed");
        let restored = unpack(&lanes);

        let scalar = ScalarFftImpl::<f32>::default();
        for slot in 0..4 {
            let mut want = signals[slot].clone();
            scalar.rfft(&mut want).expect("Invariant: operation should succeed");
            for (a, b) in spectra[slot].iter().zip(&want) {
                assert!((a - b).abs() < 1e-5, "n={n} slot {slot}");
            }
            scalar.irfft(&mut want).expect("Invariant: operation should succeed");
            for (a, b) in restored[slot].iter().zip(&want) {
                assert!((a - b).abs() < 1e-5, "n={n} slot {slot}");
            }
        }
    }
}

#[test]
fn slots_do_not_leak_into_each_other() {
    let n = 64;
    let mut lanes = vec![F32x4::default(); n];
    lanes[0] = F32x4::from_array([0.0, 1.0, 0.0, 0.0]);
    real_fft(&mut lanes);
    let spectra = unpack(&lanes);
    assert!(spectra[0].iter().all(|&v| v == 0.0));
    assert!(spectra[2].iter().all(|&v| v == 0.0));
    assert!(spectra[3].iter().all(|&v| v == 0.0));
    assert_eq!(spectra[1][0], 1.0);
    assert_eq!(spectra[1][1], 1.0);
}

#[test]
fn extreme_values_stay_finite() {
    let n = 16;
    let mut lanes = allocate_aligned::<F32x4>(n).expect("Invariant: small allocation");
    for (i, lane) in lanes.iter_mut().enumerate() {
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        *lane = F32x4::splat(sign * EXTREME_SAMPLE / n as f32);
    }
    real_fft(&mut lanes);
    inverse_real_fft(&mut lanes);
    for lane in lanes.iter() {
        assert!(lane.to_array().iter().all(|v| v.is_finite()));
    }
}

#[test]
fn backend_matches_target() {
    let backend = SimdFftImpl.backend();
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    assert_eq!(backend, Backend::Sse);
    #[cfg(target_arch = "aarch64")]
    assert_eq!(backend, Backend::Neon);
    assert_eq!(backend.width(), 4);
    assert_ne!(backend.name(), Backend::Scalar.name());
}
