//! Benchmarks for curvature sampling and lookahead smoothing.
//!
//! Run with: cargo bench --bench curvature_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use openracing_track_curvature::{LookaheadSmoother, TrackPoint, TrackPointSequence, sample_track};
use openracing_track_geometry::TrackCurve;

const TRACK: &str = "M 0 100 C 0 40 60 0 150 0 L 400 0 Q 500 0 500 100 \
                     A 80 80 0 0 1 420 180 L 120 180 C 60 180 0 160 0 100 Z";

fn bench_sample_track(c: &mut Criterion) {
    let Ok(curve) = TrackCurve::parse(TRACK) else {
        return;
    };

    let mut group = c.benchmark_group("sample_track");
    for samples in [500usize, 2_000, 5_000] {
        group.throughput(Throughput::Elements(samples as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &samples, |b, &n| {
            b.iter(|| std::hint::black_box(sample_track(&curve, n as f64, 1.0)));
        });
    }
    group.finish();
}

fn bench_lookahead_smoothing(c: &mut Criterion) {
    let Ok(smoother) = LookaheadSmoother::new(0.95) else {
        return;
    };
    // One spike every 250 samples, the shape of a real circuit profile.
    let raw: TrackPointSequence = (0..5_000)
        .map(|i| {
            let curvature = if i % 250 == 0 { 1.2 } else { 0.01 };
            TrackPoint::default().with_curvature(curvature)
        })
        .collect();

    let mut group = c.benchmark_group("lookahead");
    group.throughput(Throughput::Elements(raw.len() as u64));
    group.bench_function("smooth_5000", |b| {
        b.iter(|| {
            let mut seq = raw.clone();
            std::hint::black_box(smoother.apply(&mut seq))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_sample_track, bench_lookahead_smoothing);
criterion_main!(benches);
