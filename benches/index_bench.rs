use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use minidex::core::types::Pair;
use minidex::{Config, Indexer, Store};
use std::time::Duration;

fn bench_index_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_batch");
    for batch_size in [16usize, 128, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), &batch_size, |b, &batch_size| {
            b.iter_batched(
                || {
                    let dir = tempfile::tempdir().unwrap();
                    let config = Config {
                        storage_path: dir.path().join("db"),
                        no_sync: true,
                        max_ids: 1000,
                        open_timeout: Duration::from_secs(1),
                    };
                    let store = Store::open(&config).unwrap();
                    let pairs: Vec<Pair> = (0..batch_size as u32)
                        .map(|id| Pair::new(id, "the quick brown fox jumps over the lazy dog"))
                        .collect();
                    (dir, store, pairs)
                },
                |(dir, store, pairs)| {
                    let indexer = Indexer::new(&store);
                    indexer.index_batch(&pairs, 1000).unwrap();
                    drop(dir);
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_index_batch);
criterion_main!(benches);
