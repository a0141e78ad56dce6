//! Benchmarks for error table construction, sequential vs rayon by depth level

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rtincrate_core::Heightmap;
use rtincrate_simplification::{ErrorMetric, ErrorTable, TriangleHierarchy};

fn generate_terrain(size: usize) -> Heightmap {
    let mut data = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / (size - 1) as f32 * std::f32::consts::PI * 3.0;
            let fy = y as f32 / (size - 1) as f32 * std::f32::consts::PI * 2.0;
            data.push(fx.sin() * fy.cos() * 40.0 + (fx * 7.0).sin() * 2.0);
        }
    }
    Heightmap::new(data, size, size).unwrap()
}

fn bench_error_table(c: &mut Criterion) {
    let sizes = [65, 129, 257];

    let mut group = c.benchmark_group("error_table");

    for &size in &sizes {
        let heightmap = generate_terrain(size);
        let hierarchy = TriangleHierarchy::for_heightmap(&heightmap).unwrap();

        for (name, metric, parallel) in [
            ("midpoint", ErrorMetric::Midpoint, false),
            ("exact", ErrorMetric::Exact, false),
            ("exact_parallel", ErrorMetric::Exact, true),
        ] {
            group.bench_with_input(
                BenchmarkId::new(name, size),
                &(&heightmap, &hierarchy),
                |b, &(heightmap, hierarchy)| {
                    b.iter(|| {
                        let table = ErrorTable::compute(
                            black_box(heightmap),
                            hierarchy,
                            metric,
                            parallel,
                            1024,
                        );
                        black_box(table);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_error_table);
criterion_main!(benches);
