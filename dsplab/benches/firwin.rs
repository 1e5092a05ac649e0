use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dsplab::kernel::KernelLifecycle;
use dsplab::signal::convolve::ConvolveMode;
use dsplab::signal::filter::design::{FilterBandType, FirDesignConfig, FirDesignKernel};
use dsplab::signal::filter::{FirFilterConfig, FirFilterKernel};
use dsplab::signal::traits::{FirFilter1D, FirWinDesign};
use dsplab::signal::windows::WindowKind;
use rand::rngs::ThreadRng;

/// Get a randomized multi-tone signal from an instance of `rng`.
fn randomized_signal(mut rng: ThreadRng, n: usize) -> Vec<f64> {
    use rand::Rng;

    let tones: Vec<(f64, f64, f64)> = (1..=6)
        .map(|i| {
            (
                rng.random_range(0.5..1.5) / i as f64,
                rng.random_range(0.01..0.45),
                rng.random_range(0.0..std::f64::consts::PI),
            )
        })
        .collect();

    (0..n)
        .map(|i| {
            let noise = rng.random_range(-0.05..0.05);
            tones
                .iter()
                .map(|(a, f, p)| a * (2.0 * std::f64::consts::PI * f * i as f64 + p).sin())
                .sum::<f64>()
                + noise
        })
        .collect()
}

/// Window-method lowpass design cost over an order grid.
fn firwin_design_dyn(c: &mut Criterion) {
    for order in [64usize, 256, 1024] {
        let kernel = FirDesignKernel::try_new(FirDesignConfig {
            band: FilterBandType::Lowpass,
            cutoff: vec![0.1f64],
            order,
            window: WindowKind::Hamming,
            beta: None,
        })
        .expect("fir design kernel config should be valid");

        c.bench_with_input(
            BenchmarkId::new("firwin_design_dyn", order),
            &kernel,
            |bench, kernel| {
                bench.iter(|| {
                    black_box(
                        kernel
                            .run_alloc()
                            .expect("benchmark config should satisfy design preconditions"),
                    );
                })
            },
        );
    }
}

/// Design a decimation lowpass, then apply it to a long signal.
fn firwin_then_filter_dyn(c: &mut Criterion) {
    const DECIMATION_FACTOR: usize = 50;
    const FILTER_ORDER: usize = DECIMATION_FACTOR * 20;

    // Finite impulse response from a Hamming-windowed low-pass design.
    let design = FirDesignKernel::try_new(FirDesignConfig {
        band: FilterBandType::Lowpass,
        cutoff: vec![1.0 / DECIMATION_FACTOR as f64],
        order: FILTER_ORDER,
        window: WindowKind::Hamming,
        beta: None,
    })
    .expect("fir design kernel config should be valid");
    let taps: Vec<f64> = design
        .run_alloc()
        .expect("fir design kernel should produce benchmark taps");

    let filter = FirFilterKernel::try_new(FirFilterConfig {
        h: taps,
        mode: ConvolveMode::Same,
    })
    .expect("fir filter kernel config should be valid");

    let signal = randomized_signal(rand::rng(), 1 << 14);

    c.bench_with_input(
        BenchmarkId::new("firwin_then_filter_dyn", DECIMATION_FACTOR),
        &signal,
        |bench, sig| {
            bench.iter(|| {
                black_box(
                    filter
                        .run_alloc(black_box(sig.as_slice()))
                        .expect("benchmark input should satisfy fir filter preconditions"),
                );
            })
        },
    );
}

criterion_group!(benches, firwin_design_dyn, firwin_then_filter_dyn);
criterion_main!(benches);
