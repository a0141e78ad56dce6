//! Benchmarks for repeated extraction from one session

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rtincrate_simplification::{MeshLimits, Tin};

fn generate_terrain(size: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let base = (x as f32 * 0.05).sin() * 30.0 + (y as f32 * 0.03).cos() * 20.0;
            data.push(base + rng.gen_range(-0.5..0.5));
        }
    }
    data
}

fn bench_extraction(c: &mut Criterion) {
    let size = 257;
    let tin = Tin::new(generate_terrain(size, 7), size, size).unwrap();
    let thresholds = [0.0f32, 0.5, 2.0, 10.0];

    let mut group = c.benchmark_group("extraction");

    for &max_error in &thresholds {
        group.bench_with_input(
            BenchmarkId::new("extract", format!("e{}", max_error)),
            &max_error,
            |b, &max_error| {
                b.iter(|| {
                    let mesh = tin.extract(black_box(max_error)).unwrap();
                    black_box(mesh);
                });
            },
        );
    }

    let limits = MeshLimits::none().with_max_triangles(5_000);
    group.bench_function("extract_with_limits_5k", |b| {
        b.iter(|| {
            let mesh = tin.extract_with_limits(black_box(0.0), limits).unwrap();
            black_box(mesh);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_extraction);
criterion_main!(benches);
