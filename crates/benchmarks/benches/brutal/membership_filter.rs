//! # Membership Filter Brutal Benchmarks
//!
//! Performance claims to validate:
//! - Add: O(k) seeded hash computations
//! - Check: O(k) hashes + O(k) bit lookups, early exit on the first zero bit
//! - Merge: O(m/8) byte operations (bitwise OR of raw storage)
//! - Parameter calculation: well under 1μs
//!
//! Brutal conditions:
//! - Large filters (1M expected items at p=0.0001)
//! - Long keys sharing a common prefix
//! - Readers contending with a writer on a shared handle

use std::thread;
use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use membership_filter::domain::parameters::calculate_optimal_parameters;
use membership_filter::{MembershipFilter, SharedFilter};
use membership_filter_benchmarks::utils::{generate_keys, generate_prefixed_keys};

pub fn brutal_add_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/brutal/add");
    group.measurement_time(Duration::from_secs(10));

    // Claim: add is O(k); lower p means larger k
    for p in [0.1, 0.01, 0.0001] {
        let mut filter = MembershipFilter::new(10_000, p).unwrap();
        let key = generate_keys(1, 16).remove(0);
        group.bench_with_input(
            BenchmarkId::new("single_add_k", filter.hash_count()),
            &key,
            |b, key| b.iter(|| filter.add(black_box(key.as_str()))),
        );
    }

    let keys = generate_keys(10_000, 16);
    group.throughput(Throughput::Elements(keys.len() as u64));
    group.bench_function("bulk_add_10000", |b| {
        b.iter(|| {
            let mut filter = MembershipFilter::new(10_000, 0.01).unwrap();
            for key in &keys {
                filter.add(black_box(key.as_str()));
            }
            black_box(filter.bits_set())
        });
    });

    let prefixed = generate_prefixed_keys(10_000);
    group.bench_function("bulk_add_10000_common_prefix", |b| {
        b.iter(|| {
            let mut filter = MembershipFilter::new(10_000, 0.01).unwrap();
            for key in &prefixed {
                filter.add(black_box(key.as_str()));
            }
            black_box(filter.bits_set())
        });
    });

    group.finish();
}

pub fn brutal_check_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/brutal/check");
    group.measurement_time(Duration::from_secs(10));

    let members = generate_keys(10_000, 16);
    let filter = MembershipFilter::from_items(10_000, 0.01, &members).unwrap();

    group.bench_function("check_present", |b| {
        let target = &members[5_000];
        b.iter(|| black_box(filter.check(black_box(target.as_str()))))
    });

    // Absent keys usually exit after the first zero bit
    group.bench_function("check_absent", |b| {
        let absent = generate_keys(1, 17).remove(0);
        b.iter(|| black_box(filter.check(black_box(absent.as_str()))))
    });

    let absent_keys = generate_keys(10_000, 17);
    group.throughput(Throughput::Elements(absent_keys.len() as u64));
    group.bench_function("bulk_check_10000_absent", |b| {
        b.iter(|| {
            let hits = absent_keys
                .iter()
                .filter(|key| filter.check(black_box(key.as_str())))
                .count();
            black_box(hits)
        });
    });

    group.finish();
}

pub fn brutal_merge_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/brutal/merge");
    group.measurement_time(Duration::from_secs(10));

    // Claim: merge is O(m/8) byte operations
    for n in [1_000, 100_000, 1_000_000] {
        let left = MembershipFilter::from_items(n, 0.01, generate_keys(100, 12)).unwrap();
        let right = MembershipFilter::from_items(n, 0.01, generate_keys(100, 12)).unwrap();

        group.throughput(Throughput::Bytes(left.size_bits().div_ceil(8) as u64));
        group.bench_with_input(BenchmarkId::new("merge_filters", n), &right, |b, right| {
            b.iter(|| {
                let mut merged = left.clone();
                merged.merge(black_box(right)).unwrap();
                black_box(merged.bits_set())
            });
        });
    }

    group.finish();
}

pub fn brutal_parallel_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/brutal/build");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(20);

    let keys = generate_keys(200_000, 16);
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("sequential_200000", |b| {
        b.iter(|| black_box(MembershipFilter::from_items(200_000, 0.01, &keys).unwrap()))
    });

    group.bench_function("parallel_200000", |b| {
        b.iter(|| {
            black_box(MembershipFilter::from_items_parallel(200_000, 0.01, &keys).unwrap())
        })
    });

    group.finish();
}

pub fn brutal_parameter_calculation(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/brutal/parameters");
    group.measurement_time(Duration::from_secs(5));

    // Claim: parameter calculation < 1μs
    group.bench_function("optimal_params_claim_1us", |b| {
        b.iter(|| black_box(calculate_optimal_parameters(black_box(1000), black_box(0.01))))
    });

    group.bench_function("allocate_1m_items_p0001", |b| {
        b.iter(|| black_box(MembershipFilter::new(black_box(1_000_000), 0.0001).unwrap()))
    });

    group.finish();
}

pub fn brutal_shared_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/brutal/shared");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(20);

    let members = generate_keys(10_000, 16);
    let absent_keys = generate_keys(10_000, 17);

    for readers in [1, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("readers_vs_one_writer", readers),
            &readers,
            |b, &readers| {
                b.iter(|| {
                    let shared = SharedFilter::new(20_000, 0.01).unwrap();
                    shared.add_all(&members);

                    thread::scope(|scope| {
                        let writer = shared.clone();
                        let batch = &absent_keys[..1_000];
                        scope.spawn(move || writer.add_all(batch));

                        for _ in 0..readers {
                            let reader = shared.clone();
                            let members = &members;
                            scope.spawn(move || {
                                members.iter().filter(|key| reader.check(key)).count()
                            });
                        }
                    });
                    black_box(shared.items_added())
                });
            },
        );
    }

    group.finish();
}

pub fn brutal_false_positive_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter/brutal/fpr_validation");
    group.measurement_time(Duration::from_secs(20));

    for target in [0.01, 0.001, 0.0001] {
        group.bench_with_input(
            BenchmarkId::new("validate_fpr_bound", format!("{:.4}", target)),
            &target,
            |b, &target| {
                b.iter(|| {
                    let n = 1_000;
                    let mut filter = MembershipFilter::new(n, target).unwrap();
                    for i in 0..n {
                        filter.add(&format!("inserted_{}", i));
                    }

                    let false_positives = (0..10_000)
                        .filter(|i| filter.check(&format!("not_inserted_{}", i)))
                        .count();

                    let observed = false_positives as f64 / 10_000.0;
                    black_box(observed <= target * 1.5)
                });
            },
        );
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    brutal_add_operations(c);
    brutal_check_operations(c);
    brutal_merge_operations(c);
    brutal_parallel_build(c);
    brutal_parameter_calculation(c);
    brutal_shared_contention(c);
    brutal_false_positive_validation(c);
}
