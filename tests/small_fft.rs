use lanefft::{complex_fft, Complex64, FftImpl, ScalarFftImpl};

fn slow_dft(input: &[Complex64]) -> Vec<Complex64> {
    let n = input.len();
    let mut out = vec![Complex64::zero(); n];
    for (k, slot) in out.iter_mut().enumerate() {
        let mut sum = Complex64::zero();
        for (j, x) in input.iter().enumerate() {
            let angle = -2.0 * core::f64::consts::PI * (j * k) as f64 / n as f64;
            sum = sum + *x * Complex64::new(angle.cos(), angle.sin());
        }
        *slot = sum;
    }
    out
}

fn interleave(pairs: &[Complex64]) -> Vec<f64> {
    pairs.iter().flat_map(|c| [c.re, c.im]).collect()
}

#[test]
fn small_transforms_match_dft() {
    for pairs in [2usize, 4, 8, 16] {
        let input: Vec<Complex64> = (0..pairs)
            .map(|i| Complex64::new(i as f64, -(i as f64) * 0.5 + 1.0))
            .collect();
        let expected = slow_dft(&input);

        let mut data = interleave(&input);
        ScalarFftImpl::<f64>::default().fft(&mut data).unwrap();
        for (k, want) in expected.iter().enumerate() {
            assert!((data[2 * k] - want.re).abs() < 1e-12, "pairs={pairs} bin {k} re");
            assert!((data[2 * k + 1] - want.im).abs() < 1e-12, "pairs={pairs} bin {k} im");
        }

        let mut data32: Vec<f32> = interleave(&input).iter().map(|&v| v as f32).collect();
        ScalarFftImpl::<f32>::default().fft(&mut data32).unwrap();
        for (k, want) in expected.iter().enumerate() {
            assert!((data32[2 * k] as f64 - want.re).abs() < 1e-4, "pairs={pairs} bin {k} re");
            assert!((data32[2 * k + 1] as f64 - want.im).abs() < 1e-4, "pairs={pairs} bin {k} im");
        }
    }
}

#[test]
fn single_pair_dft_is_identity() {
    let mut data = [2.5f64, -1.0];
    complex_fft(&mut data);
    assert_eq!(data, [2.5, -1.0]);
}

#[test]
fn transform_is_linear() {
    let pairs = 32;
    let a: Vec<f64> = (0..2 * pairs).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
    let b: Vec<f64> = (0..2 * pairs).map(|i| ((i * 3) % 5) as f64 * 0.25).collect();
    let (alpha, beta) = (1.5, -0.75);

    let mut combined: Vec<f64> = a.iter().zip(&b).map(|(x, y)| alpha * x + beta * y).collect();
    let mut fa = a.clone();
    let mut fb = b.clone();
    complex_fft(&mut combined);
    complex_fft(&mut fa);
    complex_fft(&mut fb);

    for i in 0..2 * pairs {
        let expected = alpha * fa[i] + beta * fb[i];
        assert!((combined[i] - expected).abs() < 1e-10, "slot {i}");
    }
}
