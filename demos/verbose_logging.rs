//! Demonstrates enabling verbose logging for lanefft.
use lanefft::batch::batch_complex_fft;
use lanefft::{allocate_aligned, try_real_fft};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let mut buf = allocate_aligned::<f32>(1024).unwrap();
    buf[1] = 1.0;
    try_real_fft(&mut buf).unwrap();

    let mut frames = vec![vec![0.0f64; 128]; 8];
    batch_complex_fft(&mut frames).unwrap();

    let mut bad = vec![0.0f32; 100];
    if let Err(err) = try_real_fft(&mut bad) {
        log::info!("expected failure: {err}");
    }
}
