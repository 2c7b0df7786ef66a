//! Benchmark for parallel mapping with rayon.
//!
//! `par_map` only pays off when each element needs real work, so the mapped
//! function here runs a fixed number of mixing rounds per element.
//!
//! Requires the `rayon` feature to be enabled.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use persistent_array::persistent::PersistentArray;
use std::hint::black_box;

// =============================================================================
// CPU-Intensive Computation Functions
// =============================================================================

/// Mixes the input through 64 rounds of rotations and multiplications.
#[inline(never)]
fn mix(input: u64) -> u64 {
    let mut state = input ^ 0x6a09_e667_bb67_ae85;
    for round in 0..64 {
        state = state
            .rotate_left(13)
            .wrapping_mul(0x9e37_79b9_7f4a_7c15)
            .wrapping_add(round);
    }
    state
}

// =============================================================================
// map vs par_map Benchmark
// =============================================================================

fn benchmark_par_map(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("par_map");

    for size in [1000_u64, 10000, 100_000] {
        let array: PersistentArray<u64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("map", size), &size, |bencher, _| {
            bencher.iter(|| black_box(array.map(|element| mix(*element))));
        });

        group.bench_with_input(BenchmarkId::new("par_map", size), &size, |bencher, _| {
            bencher.iter(|| black_box(array.par_map(|element| mix(*element))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_par_map);

criterion_main!(benches);
