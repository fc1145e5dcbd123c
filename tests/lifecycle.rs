//! Exercises the full open -> index -> search -> stats lifecycle
//! against a real sled store.

use std::time::Duration;

use minidex::core::types::{Pair, SetOperation};
use minidex::{Config, Indexer, QueryEngine, Store};

fn open_temp() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        storage_path: dir.path().join("db"),
        no_sync: true,
        max_ids: 0,
        open_timeout: Duration::from_secs(1),
    };
    let store = Store::open(&config).unwrap();
    (dir, store)
}

#[test]
fn index_search_stats_round_trip() {
    let (_dir, store) = open_temp();
    let indexer = Indexer::new(&store);

    indexer
        .index_batch(
            &[
                Pair::new(1, "Café au lait"),
                Pair::new(2, "cafe CAFE"),
                Pair::new(3, "espresso machine"),
            ],
            0,
        )
        .unwrap();

    let union = QueryEngine::search(&store, "cafe", SetOperation::Union, 0).unwrap();
    assert_eq!(union.len(), 2);
    assert_eq!(union[0].id, 1);
    assert_eq!(union[1].id, 2);

    let nothing = QueryEngine::search(&store, "espresso cafe", SetOperation::Intersection, 0).unwrap();
    assert!(nothing.is_empty());

    store.set_last_id(3).unwrap();
    assert_eq!(store.last_id().unwrap(), Some(3));

    store.update_statistics().unwrap();
    assert!(store.key_count().unwrap() > 0);
    assert!(store.avg_count().unwrap() > 0.0);
}

#[test]
fn resuming_from_a_persisted_cursor_matches_an_uninterrupted_run() {
    let pairs: Vec<Pair> = (1..=10u32).map(|id| Pair::new(id, "alpha beta gamma")).collect();

    let (_dir_a, store_a) = open_temp();
    Indexer::new(&store_a).index_batch(&pairs, 0).unwrap();

    let (_dir_b, store_b) = open_temp();
    let indexer_b = Indexer::new(&store_b);
    let resume_after = 5;
    store_b.set_last_id(resume_after).unwrap();

    let first_half: Vec<Pair> = pairs.iter().filter(|p| p.id <= resume_after).cloned().collect();
    let second_half: Vec<Pair> = pairs.iter().filter(|p| p.id > resume_after).cloned().collect();
    indexer_b.index_batch(&first_half, 0).unwrap();
    // Simulates a feeder that skips already-indexed ids on resume.
    indexer_b.index_batch(&second_half, 0).unwrap();

    let a = QueryEngine::search(&store_a, "alpha", SetOperation::Union, 0).unwrap();
    let b = QueryEngine::search(&store_b, "alpha", SetOperation::Union, 0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn posting_lists_stay_capped_and_sorted_under_many_writes() {
    let (_dir, store) = open_temp();
    let indexer = Indexer::new(&store);
    for id in 1..=50u32 {
        indexer.index_pair(Pair::new(id, "popular"), 10).unwrap();
    }
    let results = QueryEngine::search(&store, "popular", SetOperation::Union, 0).unwrap();
    assert_eq!(results.len(), 10);
    for pair in results.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].id < pair[1].id)
        );
    }
}
