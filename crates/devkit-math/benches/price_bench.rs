//! Benchmarks for reserve to price/tick conversion.
//!
//! Run with: `cargo bench --package devkit-math`

use alloy::primitives::U256;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use devkit_math::{compute, price_to_sqrt_price_x96, price_to_tick};

/// Benchmark: one full reserve conversion, small and 256-bit wide.
fn bench_compute(c: &mut Criterion) {
    let (x, y) = (U256::from(2000u64), U256::from(9_018_596u64));
    c.bench_function("compute_reference_reserves", |b| {
        b.iter(|| compute(black_box(x), black_box(y)));
    });

    let wide_x = U256::from(1_000_000_000_000_000_071u128);
    c.bench_function("compute_wide_reserves", |b| {
        b.iter(|| compute(black_box(wide_x), black_box(U256::MAX)));
    });
}

/// Benchmark: tick and sqrt price over a spread of magnitudes.
fn bench_price_helpers(c: &mut Criterion) {
    let prices: Vec<f64> = (0..100).map(|i| 10f64.powf(f64::from(i) / 8.0)).collect();

    c.bench_function("price_to_tick_100", |b| {
        b.iter(|| {
            for p in &prices {
                let _ = price_to_tick(black_box(*p));
            }
        });
    });

    c.bench_function("price_to_sqrt_price_x96_100", |b| {
        b.iter(|| {
            for p in &prices {
                let _ = price_to_sqrt_price_x96(black_box(*p));
            }
        });
    });
}

criterion_group!(benches, bench_compute, bench_price_helpers);
criterion_main!(benches);
