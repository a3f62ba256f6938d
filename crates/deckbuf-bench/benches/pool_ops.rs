//! Criterion micro-benchmarks for array pool rent/return cycles.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use deckbuf_pool::{ArrayPool, PoolConfig};

/// Benchmark: rent and give back a 4K block from a warm pool.
fn bench_rent_return_warm(c: &mut Criterion) {
    let pool: ArrayPool<u64> = ArrayPool::new();
    pool.give_back(pool.rent(4096));
    c.bench_function("rent_return_warm_4k", |b| {
        b.iter(|| {
            let block = pool.rent(black_box(4096));
            pool.give_back(block);
        });
    });
}

/// Benchmark: the same cycle with retention disabled, so every rent allocates.
fn bench_rent_return_cold(c: &mut Criterion) {
    let mut config = PoolConfig::new();
    config.max_retained_per_class = 0;
    let pool: ArrayPool<u64> =
        ArrayPool::with_config(config).expect("zero retention is a valid config");
    c.bench_function("rent_return_cold_4k", |b| {
        b.iter(|| {
            let block = pool.rent(black_box(4096));
            pool.give_back(block);
        });
    });
}

/// Benchmark: four threads cycling blocks through one shared pool.
fn bench_shared_pool_contended(c: &mut Criterion) {
    let pool: Arc<ArrayPool<u8>> = Arc::new(ArrayPool::new());
    c.bench_function("shared_pool_4_threads", |b| {
        b.iter(|| {
            std::thread::scope(|s| {
                for _ in 0..4 {
                    let pool = Arc::clone(&pool);
                    s.spawn(move || {
                        for len in [16, 64, 256, 1024] {
                            pool.give_back(pool.rent(len));
                        }
                    });
                }
            });
        });
    });
}

criterion_group!(
    benches,
    bench_rent_return_warm,
    bench_rent_return_cold,
    bench_shared_pool_contended
);
criterion_main!(benches);
