use std::alloc::{GlobalAlloc, Layout, System};
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lanefft::{complex_fft, inverse_real_fft, real_fft, Backend, LaneBlock};
use realfft::RealFftPlanner;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

// ---------------- Allocation tracking ----------------
struct CountingAllocator;

static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

/// Times `iters` runs of `op` on a fresh copy of `input`, panicking if the
/// timed region allocates.
fn timed<T: Copy>(
    iters: u64,
    input: &[T],
    data: &mut [T],
    mut op: impl FnMut(&mut [T]),
) -> Duration {
    let mut total = Duration::ZERO;
    for _ in 0..iters {
        data.copy_from_slice(input);
        let before = ALLOCATIONS.load(Ordering::Relaxed);
        let start = Instant::now();
        op(data);
        total += start.elapsed();
        assert_eq!(
            ALLOCATIONS.load(Ordering::Relaxed),
            before,
            "in-place transform allocated"
        );
    }
    total
}

fn signal(size: usize) -> Vec<f32> {
    (0..size).map(|i| ((i * 7919) % 1024) as f32 / 512.0 - 1.0).collect()
}

// ---------------- Benchmark helpers ----------------
fn bench_complex(c: &mut Criterion, size: usize) {
    let mut group = c.benchmark_group(format!("complex_{size}"));
    group.throughput(Throughput::Elements((size / 2) as u64));

    let input = signal(size);
    let mut data = input.clone();
    group.bench_function(BenchmarkId::new("lanefft/f32", size), |b| {
        b.iter_custom(|iters| timed(iters, &input, &mut data, complex_fft))
    });

    let input64: Vec<f64> = input.iter().map(|&v| v as f64).collect();
    let mut data64 = input64.clone();
    group.bench_function(BenchmarkId::new("lanefft/f64", size), |b| {
        b.iter_custom(|iters| timed(iters, &input64, &mut data64, complex_fft))
    });

    // rustfft on the same number of complex points
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(size / 2);
    let rust_input: Vec<Complex<f32>> = input
        .chunks(2)
        .map(|p| Complex::new(p[0], p[1]))
        .collect();
    let mut rust_data = rust_input.clone();
    group.bench_function(BenchmarkId::new("rustfft", size), |b| {
        b.iter_custom(|iters| {
            let mut total = Duration::ZERO;
            for _ in 0..iters {
                rust_data.copy_from_slice(&rust_input);
                let start = Instant::now();
                fft.process(&mut rust_data);
                total += start.elapsed();
            }
            total
        })
    });

    group.finish();
}

fn bench_real(c: &mut Criterion, size: usize) {
    let mut group = c.benchmark_group(format!("real_{size}"));
    group.throughput(Throughput::Elements(size as u64));

    let input = signal(size);
    let mut data = input.clone();
    group.bench_function(BenchmarkId::new("lanefft/forward", size), |b| {
        b.iter_custom(|iters| timed(iters, &input, &mut data, real_fft))
    });

    let mut spectrum = input.clone();
    real_fft(&mut spectrum);
    group.bench_function(BenchmarkId::new("lanefft/inverse", size), |b| {
        b.iter_custom(|iters| timed(iters, &spectrum, &mut data, inverse_real_fft))
    });

    let mut planner = RealFftPlanner::<f32>::new();
    let rfft = planner.plan_fft_forward(size);
    let mut in_data = input.clone();
    let mut out_data = rfft.make_output_vec();
    let mut scratch = rfft.make_scratch_vec();
    group.bench_function(BenchmarkId::new("realfft/forward", size), |b| {
        b.iter_custom(|iters| {
            let mut total = Duration::ZERO;
            for _ in 0..iters {
                in_data.copy_from_slice(&input);
                let start = Instant::now();
                rfft.process_with_scratch(&mut in_data, &mut out_data, &mut scratch)
                    .unwrap();
                total += start.elapsed();
            }
            total
        })
    });

    group.finish();
}

/// Four transforms per call through a `LaneBlock`; throughput counts all four.
fn bench_lanes(c: &mut Criterion, size: usize) {
    let mut group = c.benchmark_group(format!("lanes_{size}"));
    group.throughput(Throughput::Elements(4 * size as u64));
    let backend = Backend::active().name();

    let s = signal(size);
    let mut block = LaneBlock::new(size).unwrap();
    group.bench_function(BenchmarkId::new(format!("{backend}/real"), size), |b| {
        b.iter_custom(|iters| timed_block(iters, &s, &mut block, LaneBlock::real_fft))
    });
    group.bench_function(BenchmarkId::new(format!("{backend}/complex"), size), |b| {
        b.iter_custom(|iters| timed_block(iters, &s, &mut block, LaneBlock::complex_fft))
    });
    group.finish();
}

/// As [`timed`], reloading all four slots of `block` before each run.
fn timed_block(
    iters: u64,
    input: &[f32],
    block: &mut LaneBlock,
    op: fn(&mut LaneBlock),
) -> Duration {
    let mut total = Duration::ZERO;
    for _ in 0..iters {
        block.load([input; 4]).unwrap();
        let before = ALLOCATIONS.load(Ordering::Relaxed);
        let start = Instant::now();
        op(block);
        total += start.elapsed();
        assert_eq!(
            ALLOCATIONS.load(Ordering::Relaxed),
            before,
            "lane transform allocated"
        );
    }
    total
}

fn main_bench(c: &mut Criterion) {
    let sizes: Vec<usize> = env::var("LANEFFT_BENCH_POWERS")
        .ok()
        .map(|s| {
            s.split(',')
                .filter_map(|p| p.trim().parse::<u32>().ok())
                .map(|p| 1usize << p)
                .collect()
        })
        .unwrap_or_else(|| (6..=16).step_by(2).map(|p| 1usize << p).collect());
    for size in sizes {
        bench_complex(c, size);
        bench_real(c, size);
        bench_lanes(c, size);
    }
}

criterion_group!(benches, main_bench);
criterion_main!(benches);
