//! The statistics entity: a resume cursor (`lastID`), key count, and
//! average posting-list length, held in the `stats` tree and cached on
//! the `Store` handle between explicit refreshes.
//!
//! Unlike the indexer/query path, these operations only ever touch one
//! key at a time (or, for `update_statistics`, iterate the whole
//! `words` tree) so they go straight through `sled::Tree`'s own atomic
//! single-key operations rather than `Store::read_tx`/`write_tx`, which
//! are scoped to transactional access over `words` (see `store::mod`).

use sled::Tree;

use super::Store;
use crate::core::error::Result;
use crate::core::types::Id;
use crate::index::posting::RECORD_SIZE;

const KEY_LAST_ID: &[u8] = b"lastID";
const KEY_AVG_COUNT: &[u8] = b"avgCount";
const KEY_KEY_COUNT: &[u8] = b"keyCount";

pub(super) fn read_key_count(stats: &Tree) -> Result<Option<u32>> {
    Ok(match stats.get(KEY_KEY_COUNT)? {
        Some(bytes) if bytes.len() == 4 => Some(u32::from_le_bytes(bytes[..4].try_into().unwrap())),
        _ => None,
    })
}

pub(super) fn read_avg_count(stats: &Tree) -> Result<Option<f32>> {
    Ok(match stats.get(KEY_AVG_COUNT)? {
        Some(bytes) if bytes.len() == 4 => {
            Some(f32::from_bits(u32::from_le_bytes(bytes[..4].try_into().unwrap())))
        }
        _ => None,
    })
}

impl Store {
    /// Writes the resume cursor. Does not affect posting data.
    pub fn set_last_id(&self, id: Id) -> Result<()> {
        self.stats_tree().insert(KEY_LAST_ID, &id.to_le_bytes())?;
        Ok(())
    }

    /// Reads the resume cursor. `None` when absent or wrong length —
    /// "not yet written" is an expected state for a freshly opened
    /// store, not a failure.
    pub fn last_id(&self) -> Result<Option<Id>> {
        Ok(match self.stats_tree().get(KEY_LAST_ID)? {
            Some(bytes) if bytes.len() == 4 => Some(u32::from_le_bytes(bytes[..4].try_into().unwrap())),
            _ => None,
        })
    }

    /// Iterates every key in the `words` tree, summing posting-list
    /// lengths and counting keys, then writes and caches both plus
    /// their average.
    pub fn update_statistics(&self) -> Result<()> {
        let mut total_entries: u64 = 0;
        let mut key_count: u32 = 0;
        for entry in self.words_tree().iter() {
            let (_, value) = entry?;
            total_entries += (value.len() / RECORD_SIZE) as u64;
            key_count += 1;
        }
        let avg_count = if key_count == 0 { 0.0 } else { total_entries as f32 / key_count as f32 };

        self.stats_tree().insert(KEY_KEY_COUNT, &key_count.to_le_bytes())?;
        self.stats_tree().insert(KEY_AVG_COUNT, &avg_count.to_bits().to_le_bytes())?;

        let mut cached = self.cached().write();
        cached.key_count = Some(key_count);
        cached.avg_count = Some(avg_count);
        Ok(())
    }

    /// The cached key count as of the last [`Store::update_statistics`]
    /// call; `None` if it was never calculated.
    pub fn key_count(&self) -> Option<u32> {
        self.cached().read().key_count
    }

    /// The cached average posting-list length as of the last
    /// [`Store::update_statistics`] call; `None` if it was never
    /// calculated.
    pub fn avg_count(&self) -> Option<f32> {
        self.cached().read().avg_count
    }
}
