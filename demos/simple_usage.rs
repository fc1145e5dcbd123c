//! Minimal end-to-end demo: open a store, index a few pairs, search
//! them with both set operations, and refresh statistics.

use std::time::Duration;

use minidex::core::types::{Pair, SetOperation};
use minidex::{Config, Indexer, QueryEngine, Store};

fn main() -> minidex::Result<()> {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = Config {
        storage_path: dir.path().join("demo.idx"),
        no_sync: true,
        max_ids: 0,
        open_timeout: Duration::from_secs(1),
    };

    let store = Store::open(&config)?;
    let indexer = Indexer::new(&store);

    indexer.index_batch(
        &[
            Pair::new(1, "Café au lait recipe"),
            Pair::new(2, "The 100jähriges Jubiläum of the bakery"),
            Pair::new(3, "Straße food stalls and cafe culture"),
        ],
        config.max_ids,
    )?;

    let union = QueryEngine::search(&store, "cafe strasse", SetOperation::Union, 0)?;
    println!("union(\"cafe strasse\"):");
    for r in &union {
        println!("  id={} score={:.4}", r.id, r.score);
    }

    let intersection = QueryEngine::search(&store, "cafe strasse", SetOperation::Intersection, 0)?;
    println!("intersection(\"cafe strasse\"):");
    for r in &intersection {
        println!("  id={} score={:.4}", r.id, r.score);
    }

    store.update_statistics()?;
    println!(
        "keys={:?} avg_posting_len={:?}",
        store.key_count(),
        store.avg_count()
    );

    Ok(())
}
