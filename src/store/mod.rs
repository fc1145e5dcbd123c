//! The embedded key/value store backing the index: a `sled::Db` with
//! two trees (`words`, `stats`) and a single-writer transaction
//! discipline built on sled's transactional API.
//!
//! `read_tx`/`write_tx` are scoped to the `words` tree: it's the only
//! tree the indexer and query engine ever need transactionally
//! consistent multi-get/multi-put access to. The `stats` tree is
//! small, single-key-at-a-time, and accessed directly by
//! [`stats`]; `update_statistics` needs to iterate every key in
//! `words`, which `sled::transaction::TransactionalTree` doesn't
//! support, so that one pass runs outside a transaction (see
//! DESIGN.md).

pub mod stats;

use std::thread;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use sled::transaction::{ConflictableTransactionError, TransactionalTree};
use sled::{Db, Tree};

use crate::core::config::Config;
use crate::core::error::{Error, Result};

pub(crate) const WORDS_TREE: &str = "words";
pub(crate) const STATS_TREE: &str = "stats";

/// Cached copies of the statistics entity, refreshed only by an
/// explicit call to [`Store::update_statistics`].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CachedStats {
    pub key_count: Option<u32>,
    pub avg_count: Option<f32>,
}

/// A single opened index store. Owns the exclusive `sled::Db` handle;
/// process-wide, at most one writer is permitted, enforced by sled's
/// own exclusive open lock.
pub struct Store {
    db: Db,
    words: Tree,
    stats: Tree,
    no_sync: bool,
    cached: RwLock<CachedStats>,
}

impl Store {
    /// Opens (creating if absent) the backing sled database and its two
    /// trees, loading cached statistics. Retries acquiring sled's
    /// exclusive open lock for up to `config.open_timeout` before
    /// surfacing [`crate::core::error::ErrorKind::StoreOpen`].
    pub fn open(config: &Config) -> Result<Store> {
        let deadline = Instant::now() + config.open_timeout;
        let mut backoff = Duration::from_millis(10);
        let db = loop {
            let sled_config = sled::Config::new()
                .path(&config.storage_path)
                .flush_every_ms(if config.no_sync { None } else { Some(500) });
            match sled_config.open() {
                Ok(db) => break db,
                Err(_err) if Instant::now() < deadline => {
                    thread::sleep(backoff);
                    backoff = (backoff * 2).min(Duration::from_millis(200));
                }
                Err(err) => return Err(Error::store_open(err.to_string())),
            }
        };

        let words = db.open_tree(WORDS_TREE)?;
        let stats = db.open_tree(STATS_TREE)?;

        let cached = CachedStats {
            key_count: stats::read_key_count(&stats)?,
            avg_count: stats::read_avg_count(&stats)?,
        };

        Ok(Store { db, words, stats, no_sync: config.no_sync, cached: RwLock::new(cached) })
    }

    /// Drops the handle; sled flushes and releases its lock on `Drop`.
    pub fn close(self) {
        drop(self);
    }

    pub(crate) fn words_tree(&self) -> &Tree {
        &self.words
    }

    pub(crate) fn stats_tree(&self) -> &Tree {
        &self.stats
    }

    pub(crate) fn cached(&self) -> &RwLock<CachedStats> {
        &self.cached
    }

    fn flush_unless_no_sync(&self) -> Result<()> {
        if !self.no_sync {
            self.db.flush()?;
        }
        Ok(())
    }

    /// Runs `f` inside a transaction over the `words` tree, giving a
    /// transactionally consistent view across every get it performs.
    /// sled does not distinguish a read-only transaction type; callers
    /// of `read_tx` simply do not call `insert`/`remove` inside the
    /// closure. Byte slices returned from tree gets are only
    /// guaranteed valid for the closure's lifetime.
    pub fn read_tx<F, T>(&self, f: F) -> Result<T>
    where
        F: Fn(&TransactionalTree) -> std::result::Result<T, ConflictableTransactionError<Error>>,
    {
        self.words.transaction(|tt| f(tt)).map_err(Error::from)
    }

    /// Runs `f` inside a write transaction over the `words` tree, then
    /// (in durable mode) explicitly flushes so the commit is on disk
    /// before returning.
    pub fn write_tx<F, T>(&self, f: F) -> Result<T>
    where
        F: Fn(&TransactionalTree) -> std::result::Result<T, ConflictableTransactionError<Error>>,
    {
        let result = self.words.transaction(|tt| f(tt)).map_err(Error::from)?;
        self.flush_unless_no_sync()?;
        Ok(result)
    }
}

pub(crate) fn abort(err: Error) -> ConflictableTransactionError<Error> {
    ConflictableTransactionError::Abort(err)
}
