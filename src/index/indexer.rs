//! Transactionally folds batches of `(id, text)` pairs into posting
//! lists, maintaining sort order and an optional per-key cap.

use std::collections::HashMap;

use rayon::prelude::*;
use sled::transaction::{ConflictableTransactionResult, TransactionalTree};

use super::merge::merge;
use super::posting;
use crate::core::error::Result;
use crate::core::types::{Id, Pair};
use crate::normalize;
use crate::store::Store;

/// Folds batches of `(id, text)` pairs into a [`Store`]'s posting
/// lists.
pub struct Indexer<'a> {
    store: &'a Store,
}

impl<'a> Indexer<'a> {
    pub fn new(store: &'a Store) -> Self {
        Indexer { store }
    }

    /// Indexes a single pair. Equivalent to `index_batch(&[pair], max_ids)`.
    pub fn index_pair(&self, pair: Pair, max_ids: u32) -> Result<()> {
        self.index_batch(&[pair], max_ids)
    }

    /// Atomically applies a batch of pairs inside one write transaction.
    ///
    /// Per-pair normalization (pure, independent across pairs) runs in
    /// parallel via rayon; the sequential merge into each token's
    /// posting list runs inside the transaction closure, since sled
    /// transactions are not `Send` across threads and the merge must
    /// see a consistent view of the list it updates.
    pub fn index_batch(&self, pairs: &[Pair], max_ids: u32) -> Result<()> {
        let planned: Vec<(Id, Vec<(Vec<u8>, f32)>)> =
            pairs.par_iter().map(|pair| (pair.id, plan_pair(&pair.text))).collect();

        self.store.write_tx(|words| {
            for (id, scored_tokens) in &planned {
                for (token, score) in scored_tokens {
                    merge_one(words, token, *id, *score, max_ids)?;
                }
            }
            Ok(())
        })
    }
}

/// Normalizes `text` and builds the per-token score list: `score = 1.0
/// + count / total_segments`, where `total_segments` includes rejected,
/// non-whitespace segments (they still dilute a pair's scores).
fn plan_pair(text: &str) -> Vec<(Vec<u8>, f32)> {
    let normalized = normalize::normalize(text);
    if normalized.total_segments == 0 {
        return Vec::new();
    }
    let mut counts: HashMap<String, u32> = HashMap::new();
    for token in normalized.tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    let total_segments = normalized.total_segments as f32;
    counts
        .into_iter()
        .map(|(token, count)| (token.into_bytes(), 1.0 + count as f32 / total_segments))
        .collect()
}

fn merge_one(
    words: &TransactionalTree,
    token: &[u8],
    id: Id,
    score: f32,
    max_ids: u32,
) -> ConflictableTransactionResult<(), crate::core::error::Error> {
    let existing_blob = words.get(token)?;
    let existing = match existing_blob {
        Some(blob) => posting::decode(&blob).map_err(crate::store::abort)?,
        None => Vec::new(),
    };

    if let Some(updated) = merge(&existing, id, score, max_ids) {
        let encoded = posting::encode(&updated);
        words.insert(token, encoded)?;
    }
    Ok(())
}
