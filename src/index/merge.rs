//! The canonical sorted-insert merge protocol: folds one `(id, score)`
//! candidate into an existing posting list, preserving
//! (score desc, id asc) order and an optional per-key cap.

use super::posting::Posting;
use crate::core::types::{Id, Score};

/// Merges `(id, score)` into `existing`, which must already be sorted
/// by (score desc, id asc) with unique ids.
///
/// Returns `None` when the candidate doesn't change the list: either
/// the cap rejected it outright, or an existing entry for `id` already
/// carries an equal or higher score. Otherwise returns the full
/// replacement list to persist.
pub fn merge(existing: &[Posting], id: Id, score: Score, max_ids: u32) -> Option<Vec<Posting>> {
    let capped = max_ids > 0 && (existing.len() as u32) >= max_ids;
    if capped {
        if let Some(last) = existing.last() {
            if score < last.score {
                return None;
            }
        }
    }

    let mut insert_idx = existing.len();
    let mut existing_idx = None;
    let mut found_insert = false;
    for (i, r) in existing.iter().enumerate() {
        if !found_insert && (score > r.score || (score == r.score && id < r.id)) {
            insert_idx = i;
            found_insert = true;
        }
        if r.id == id {
            existing_idx = Some(i);
            break;
        }
    }

    match existing_idx {
        None => {
            let mut out = Vec::with_capacity(existing.len() + 1);
            out.extend_from_slice(&existing[..insert_idx]);
            out.push(Posting::new(id, score));
            out.extend_from_slice(&existing[insert_idx..]);
            if max_ids > 0 && out.len() as u32 > max_ids {
                out.pop();
            }
            Some(out)
        }
        Some(old_idx) => {
            if score <= existing[old_idx].score {
                return None;
            }
            let mut out = Vec::with_capacity(existing.len());
            out.extend_from_slice(&existing[..insert_idx]);
            out.push(Posting::new(id, score));
            out.extend_from_slice(&existing[insert_idx..old_idx]);
            out.extend_from_slice(&existing[old_idx + 1..]);
            Some(out)
        }
    }
}
