use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lidarvox_grid::VoxelGrid;
use lidarvox_voxelize::{voxelize_concatenate, voxelize_pool, PoolingMode, DEFAULT_MAX_NUM_PTS};
use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn lidar_sweep(num_points: usize) -> (Vec<[f64; 3]>, Array2<f32>) {
    let mut rng = StdRng::seed_from_u64(42);
    let points = (0..num_points)
        .map(|_| {
            [
                rng.random_range(-60.0..60.0),
                rng.random_range(-60.0..60.0),
                rng.random_range(-4.0..4.0),
            ]
        })
        .collect::<Vec<_>>();
    // x, y, z, intensity
    let features = Array2::from_shape_fn((num_points, 4), |(i, j)| match j {
        3 => rng.random_range(0.0..1.0),
        _ => points[i][j] as f32,
    });
    (points, features)
}

fn bench_voxelize(c: &mut Criterion) {
    let mut group = c.benchmark_group("voxelize");
    let grid = VoxelGrid::new([512, 512, 1], [-50.0, -50.0, -3.0], [50.0, 50.0, 3.0]).unwrap();

    for num_points in [10_000, 50_000, 120_000].iter() {
        let (points, features) = lidar_sweep(*num_points);
        let parameter_string = format!("{num_points}");

        group.bench_with_input(
            BenchmarkId::new("pool_mean", &parameter_string),
            &(&points, &features),
            |b, i| {
                let (points, features) = (i.0, i.1);
                b.iter(|| {
                    black_box(voxelize_pool(
                        points,
                        features.view(),
                        &grid,
                        PoolingMode::Mean,
                    ))
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("concatenate", &parameter_string),
            &(&points, &features),
            |b, i| {
                let (points, features) = (i.0, i.1);
                b.iter(|| {
                    black_box(voxelize_concatenate(
                        points,
                        features.view(),
                        &grid,
                        DEFAULT_MAX_NUM_PTS,
                    ))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_voxelize);
criterion_main!(benches);
