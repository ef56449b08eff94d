//! Benchmarks for string queue operations.
//!
//! Measures push/pop cycle latency and reverse/sort throughput at a few
//! chain lengths.

use braid::StrQueue;
use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use rand::distributions::{Alphanumeric, DistString};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn filled_queue(len: usize, seed: u64) -> StrQueue {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut queue = StrQueue::try_with_capacity(len).unwrap();
    for _ in 0..len {
        let value_len = rng.gen_range(1..16);
        let value = Alphanumeric.sample_string(&mut rng, value_len);
        queue.push_back(&value).unwrap();
    }
    queue
}

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop");

    group.bench_function("push_back_pop_front", |b| {
        let mut queue = StrQueue::try_with_capacity(16).unwrap();
        b.iter(|| {
            queue.push_back(black_box("benchmark value")).unwrap();
            black_box(queue.pop_front())
        });
    });

    group.bench_function("push_front_pop_front", |b| {
        let mut queue = StrQueue::try_with_capacity(16).unwrap();
        b.iter(|| {
            queue.push_front(black_box("benchmark value")).unwrap();
            black_box(queue.pop_front())
        });
    });

    group.bench_function("pop_front_into", |b| {
        let mut queue = StrQueue::try_with_capacity(16).unwrap();
        let mut buf = [0u8; 32];
        b.iter(|| {
            queue.push_back(black_box("benchmark value")).unwrap();
            black_box(queue.pop_front_into(&mut buf))
        });
    });

    group.finish();
}

fn bench_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse");

    for len in [64usize, 1024, 16384] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut queue = filled_queue(len, 1);
            // Reversal is an involution, so repeated iterations stay valid
            b.iter(|| queue.reverse());
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for len in [64usize, 1024, 16384] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_batched(
                || filled_queue(len, 2),
                |mut queue| {
                    queue.sort();
                    queue
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_push_pop, bench_reverse, bench_sort);
criterion_main!(benches);
