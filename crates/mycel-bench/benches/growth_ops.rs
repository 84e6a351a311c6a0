//! Criterion micro-benchmarks for the growth step and its parts.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mycel_bench::{centre_agent, reference_config};
use mycel_core::{Cell, Grid, RandomSource};
use mycel_engine::{select_lowest, shuffle, IntensityMap, SharedRandom};

/// Benchmark: neighbours() for every cell of a 100x100 grid.
fn bench_neighbours_10k(c: &mut Criterion) {
    let grid = Grid::new(100, 100).unwrap();

    c.bench_function("neighbours_10k", |b| {
        b.iter(|| {
            for y in 0..100 {
                for x in 0..100 {
                    black_box(grid.neighbours(Cell::new(x, y)));
                }
            }
        });
    });
}

/// Benchmark: shuffle 8 candidates through the shared generator.
fn bench_shuffle_8(c: &mut Criterion) {
    let rng = SharedRandom::seeded(1);
    let grid = Grid::new(10, 10).unwrap();
    let base = grid.neighbours(Cell::new(5, 5));

    c.bench_function("shuffle_8", |b| {
        b.iter(|| {
            let mut cands = base.clone();
            shuffle(&mut cands, &rng);
            black_box(cands);
        });
    });
}

/// Benchmark: a single uncontended draw.
fn bench_draw(c: &mut Criterion) {
    let rng = SharedRandom::seeded(2);
    c.bench_function("shared_random_draw", |b| b.iter(|| black_box(rng.next(8))));
}

/// Benchmark: select_lowest over 8 candidates on a partly claimed map.
fn bench_select_lowest(c: &mut Criterion) {
    let config = reference_config();
    let map = IntensityMap::new(&config).unwrap();
    let grid = *map.grid();
    let cands = grid.neighbours(Cell::new(500, 500));
    for (i, cell) in cands.iter().enumerate() {
        for _ in 0..i {
            map.bump(*cell).unwrap();
        }
    }

    c.bench_function("select_lowest_8", |b| {
        b.iter(|| black_box(select_lowest(&cands, &map)));
    });
}

/// Benchmark: one full agent step on the reference grid.
fn bench_agent_step(c: &mut Criterion) {
    let config = reference_config();
    let mut agent = centre_agent(&config, 3);

    c.bench_function("agent_step_1000x1000", |b| {
        b.iter(|| black_box(agent.step().unwrap()));
    });
}

criterion_group!(
    benches,
    bench_neighbours_10k,
    bench_shuffle_8,
    bench_draw,
    bench_select_lowest,
    bench_agent_step
);
criterion_main!(benches);
