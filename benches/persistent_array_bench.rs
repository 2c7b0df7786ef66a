//! Benchmark for PersistentArray vs standard Vec.
//!
//! Compares the persistent array against `Vec` for construction, random
//! access, single-element updates and whole-array traversals.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use persistent_array::persistent::PersistentArray;
use std::hint::black_box;

const SIZES: [usize; 3] = [100, 1000, 10000];

// =============================================================================
// Construction Benchmark
// =============================================================================

fn benchmark_from_vec(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("from_vec");

    for size in SIZES {
        group.bench_with_input(
            BenchmarkId::new("PersistentArray", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let elements: Vec<usize> = (0..size).collect();
                    black_box(PersistentArray::from_vec(black_box(elements)))
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| black_box((0..size).collect::<Vec<usize>>()));
        });
    }

    group.finish();
}

// =============================================================================
// get Benchmark (Random Access)
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in SIZES {
        let persistent_array: PersistentArray<usize> = (0..size).collect();
        let standard_vector: Vec<usize> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentArray", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for index in 0..size {
                        if let Ok(value) = persistent_array.get(black_box(index)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for index in 0..size {
                    if let Some(value) = standard_vector.get(black_box(index)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// set Benchmark (Path Copying vs Full Clone)
// =============================================================================

fn benchmark_set(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set");

    for size in SIZES {
        let persistent_array: PersistentArray<usize> = (0..size).collect();
        let standard_vector: Vec<usize> = (0..size).collect();
        let index = size / 2;

        group.bench_with_input(
            BenchmarkId::new("PersistentArray", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(persistent_array.set(black_box(index), 0)));
            },
        );

        // A persistent update of a Vec has to copy every element.
        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut copy = standard_vector.clone();
                copy[black_box(index)] = 0;
                black_box(copy)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Traversal Benchmarks
// =============================================================================

fn benchmark_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iteration");

    for size in SIZES {
        let persistent_array: PersistentArray<usize> = (0..size).collect();
        let standard_vector: Vec<usize> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentArray::iter", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(persistent_array.iter().sum::<usize>()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("PersistentArray::fold_left", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    black_box(persistent_array.fold_left(0, |sum, element| sum + element))
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("PersistentArray::fold_right", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    black_box(persistent_array.fold_right(0, |element, sum| sum + element))
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, _| {
            bencher.iter(|| black_box(standard_vector.iter().sum::<usize>()));
        });
    }

    group.finish();
}

fn benchmark_map2(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map2");

    for size in SIZES {
        let left: PersistentArray<usize> = (0..size).collect();
        let right: PersistentArray<usize> = (0..size).rev().collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentArray", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(left.map2(&right, |l, r| l + r)));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_from_vec,
    benchmark_get,
    benchmark_set,
    benchmark_iteration,
    benchmark_map2
);

criterion_main!(benches);
