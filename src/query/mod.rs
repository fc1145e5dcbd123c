//! Resolves a query string into normalized tokens, fetches their
//! posting lists, and combines them into a ranked result set under a
//! union or intersection policy.

use std::collections::HashMap;

use crate::core::error::Result;
use crate::core::types::{Id, SetOperation};
use crate::index::posting::{self, Posting};
use crate::normalize;
use crate::store::{abort, Store};

pub struct QueryEngine;

impl QueryEngine {
    /// Segments and normalizes `query`, fetches each token's posting
    /// list inside one read transaction, combines them per `set_op`,
    /// and returns the result sorted by (score desc, id asc).
    ///
    /// `max_results` caps the accumulator's size during combination
    /// (not the final result length): 0 means uncapped.
    pub fn search(
        store: &Store,
        query: &str,
        set_op: SetOperation,
        max_results: usize,
    ) -> Result<Vec<Posting>> {
        let normalized = normalize::normalize(query);

        // sled transaction closures must be `Fn`, so every token's
        // posting list is decoded inside one transaction first; the
        // (mutable) accumulator combination happens afterwards.
        let lists: Vec<Vec<Posting>> = store.read_tx(|words| {
            let mut lists = Vec::with_capacity(normalized.tokens.len());
            for token in &normalized.tokens {
                let blob = words.get(token.as_bytes())?;
                let list = match blob {
                    Some(blob) => posting::decode(&blob).map_err(abort)?,
                    None => Vec::new(),
                };
                lists.push(list);
            }
            Ok(lists)
        })?;

        let mut acc: HashMap<Id, f32> = HashMap::new();
        for list in &lists {
            match set_op {
                SetOperation::Union => apply_union(list, &mut acc, max_results),
                SetOperation::Intersection => {
                    apply_intersection(list, &mut acc, max_results);
                    if acc.is_empty() {
                        break;
                    }
                }
            }
        }

        let mut results: Vec<Posting> =
            acc.into_iter().map(|(id, score)| Posting::new(id, score)).collect();
        results.sort_by(|a, b| {
            b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal).then(a.id.cmp(&b.id))
        });
        Ok(results)
    }
}

fn apply_union(list: &[Posting], acc: &mut HashMap<Id, f32>, max_results: usize) {
    let n = list.len() as f32;
    for r in list {
        if max_results == 0 || acc.len() < max_results {
            *acc.entry(r.id).or_insert(0.0) += 1.0 + r.score / n;
        }
    }
}

/// Uses the accumulator's sign as a "matched this round" marker:
/// matching entries are written back negated, then every entry that
/// stayed non-negative (unmatched this round) is swept out and the
/// rest are un-negated.
fn apply_intersection(list: &[Posting], acc: &mut HashMap<Id, f32>, max_results: usize) {
    let is_first = acc.is_empty();
    let n = list.len() as f32;
    for r in list {
        let already_present = acc.contains_key(&r.id);
        if already_present || (is_first && (max_results == 0 || acc.len() < max_results)) {
            let prev = acc.get(&r.id).copied().unwrap_or(0.0);
            let current = 1.0 + r.score / n;
            acc.insert(r.id, -(prev + current));
        }
    }
    acc.retain(|_, score| *score < 0.0);
    for score in acc.values_mut() {
        *score = -*score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::types::Pair;
    use crate::index::Indexer;

    fn open_temp() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { storage_path: dir.path().join("db"), ..Config::default() };
        let store = Store::open(&config).unwrap();
        (dir, store)
    }

    #[test]
    fn union_ranks_by_total_contribution() {
        let (_dir, store) = open_temp();
        let indexer = Indexer::new(&store);
        indexer.index_pair(Pair::new(1, "alpha beta"), 0).unwrap();
        indexer.index_pair(Pair::new(2, "alpha"), 0).unwrap();

        let results = QueryEngine::search(&store, "alpha beta", SetOperation::Union, 0).unwrap();
        assert_eq!(results[0].id, 1);
        assert_eq!(results[1].id, 2);
    }

    #[test]
    fn intersection_keeps_only_ids_in_every_token() {
        let (_dir, store) = open_temp();
        let indexer = Indexer::new(&store);
        indexer.index_pair(Pair::new(1, "alpha beta"), 0).unwrap();
        indexer.index_pair(Pair::new(2, "alpha"), 0).unwrap();

        let results =
            QueryEngine::search(&store, "alpha beta", SetOperation::Intersection, 0).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn missing_token_yields_no_matches_not_an_error() {
        let (_dir, store) = open_temp();
        let results = QueryEngine::search(&store, "nonexistent", SetOperation::Union, 0).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn results_sorted_score_desc_id_asc() {
        let (_dir, store) = open_temp();
        let indexer = Indexer::new(&store);
        indexer.index_pair(Pair::new(5, "gamma"), 0).unwrap();
        indexer.index_pair(Pair::new(1, "gamma gamma"), 0).unwrap();

        let results = QueryEngine::search(&store, "gamma", SetOperation::Union, 0).unwrap();
        assert!(results[0].score >= results[1].score);
    }
}
