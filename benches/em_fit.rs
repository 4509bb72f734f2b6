//! Mixture fitting benchmark
//!
//! Measures a full multi-restart EM fit on planted samples of increasing
//! size, sequential against parallel restarts.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench em_fit
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use netmix::distribution::isf;
use netmix::mixture::{fit, EmConfig};
use netmix::progress::Silent;

/// Normal quantiles with 10% of the mass shifted to mean 3
fn planted_sample(n: usize) -> Vec<f64> {
    let altered = n / 10;
    (0..n)
        .map(|i| {
            let z = isf((i as f64 + 0.5) / n as f64);
            if i % 10 == 0 && i / 10 < altered {
                z + 3.0
            } else {
                z
            }
        })
        .collect()
}

fn bench_em_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("em_fit");

    for &n in &[1_000usize, 10_000, 50_000] {
        let scores = planted_sample(n);

        group.bench_with_input(BenchmarkId::new("sequential", n), &scores, |b, scores| {
            let config = EmConfig::default();
            b.iter(|| fit(black_box(scores), &config, &mut Silent));
        });

        group.bench_with_input(BenchmarkId::new("parallel", n), &scores, |b, scores| {
            let config = EmConfig {
                parallel: true,
                ..EmConfig::default()
            };
            b.iter(|| fit(black_box(scores), &config, &mut Silent));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_em_fit);
criterion_main!(benches);
