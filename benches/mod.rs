use criterion::{Criterion, criterion_group, criterion_main};
use pnl_surface_rs::prelude::*;
use std::hint::black_box;

fn pricing_benchmarks(c: &mut Criterion) {
    let inputs = ModelInputs::new(100.0, 105.0, 0.25, 0.2, 0.05).unwrap();
    c.bench_function("black_scholes_price", |b| {
        b.iter(|| BlackScholes::price(black_box(&inputs)))
    });

    let params = IVParams::call(100.0, 105.0, 0.25, 0.05);
    let config = SolverConfig::default();
    c.bench_function("solve_iv_atm", |b| {
        b.iter(|| solve_iv(black_box(&params), black_box(2.4779), &config))
    });
}

fn surface_benchmarks(c: &mut Criterion) {
    let inputs = ModelInputs::new(100.0, 100.0, 0.25, 0.2, 0.05).unwrap();
    let (x, y) = HeatmapConfig::default()
        .with_grid_size(50)
        .axes(&inputs)
        .unwrap();
    let costs = PurchaseCosts::new(5.0, 3.0);

    c.bench_function("surface_50x50_call_pnl", |b| {
        b.iter(|| {
            generate_surface(
                black_box(&inputs),
                &x,
                &y,
                SurfaceMetric::CallPL,
                5.0,
                OptionType::Call,
            )
        })
    });

    c.bench_function("surfaces_50x50_all_metrics", |b| {
        b.iter(|| {
            generate_surfaces(
                black_box(&inputs),
                &x,
                &y,
                MetricSet::all(),
                costs,
                OptionType::Call,
            )
        })
    });
}

criterion_group!(benches, pricing_benchmarks, surface_benchmarks);
criterion_main!(benches);
