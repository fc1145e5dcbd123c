use criterion::{criterion_group, criterion_main, Criterion};
use minidex::core::types::{Pair, SetOperation};
use minidex::{Config, Indexer, QueryEngine, Store};
use std::time::Duration;

fn populated_store() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        storage_path: dir.path().join("db"),
        no_sync: true,
        max_ids: 0,
        open_timeout: Duration::from_secs(1),
    };
    let store = Store::open(&config).unwrap();
    let indexer = Indexer::new(&store);
    let pairs: Vec<Pair> = (0..10_000u32)
        .map(|id| Pair::new(id, "the quick brown fox jumps over the lazy dog"))
        .collect();
    indexer.index_batch(&pairs, 0).unwrap();
    (dir, store)
}

fn bench_search(c: &mut Criterion) {
    let (_dir, store) = populated_store();
    c.bench_function("search_union", |b| {
        b.iter(|| QueryEngine::search(&store, "quick fox", SetOperation::Union, 0).unwrap())
    });
    c.bench_function("search_intersection", |b| {
        b.iter(|| QueryEngine::search(&store, "quick fox", SetOperation::Intersection, 0).unwrap())
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
