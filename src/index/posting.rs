//! Fixed-width binary layout of a posting list: a sequence of 8-byte
//! `(id: u32, score: f32)` records, little-endian, sorted by
//! (score desc, id asc).

use crate::core::error::Error;
use crate::core::types::{Id, Score};

pub const RECORD_SIZE: usize = 8;

/// A single (id, score) entry in a posting list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posting {
    pub id: Id,
    pub score: Score,
}

impl Posting {
    pub fn new(id: Id, score: Score) -> Self {
        Posting { id, score }
    }
}

/// Decodes a posting-list blob into an owned vector of records.
///
/// `sled::IVec` gives no alignment guarantee, so this reads each record
/// with unaligned little-endian loads rather than reinterpret-casting
/// the blob.
pub fn decode(blob: &[u8]) -> Result<Vec<Posting>, Error> {
    if blob.len() % RECORD_SIZE != 0 {
        return Err(Error::corruption(format!(
            "posting list length {} is not a multiple of {}",
            blob.len(),
            RECORD_SIZE
        )));
    }
    Ok(blob
        .chunks_exact(RECORD_SIZE)
        .map(|chunk| {
            let id = u32::from_le_bytes(chunk[0..4].try_into().unwrap());
            let score = f32::from_bits(u32::from_le_bytes(chunk[4..8].try_into().unwrap()));
            Posting { id, score }
        })
        .collect())
}

/// Serializes a full posting list back to its blob form.
pub fn encode(list: &[Posting]) -> Vec<u8> {
    let mut out = Vec::with_capacity(list.len() * RECORD_SIZE);
    for p in list {
        out.extend_from_slice(&p.id.to_le_bytes());
        out.extend_from_slice(&p.score.to_bits().to_le_bytes());
    }
    out
}

/// Overwrites a single record's 8 bytes in place, without otherwise
/// changing the blob's length.
pub fn encode_inplace(blob: &mut [u8], index: usize, p: Posting) {
    let offset = index * RECORD_SIZE;
    blob[offset..offset + 4].copy_from_slice(&p.id.to_le_bytes());
    blob[offset + 4..offset + 8].copy_from_slice(&p.score.to_bits().to_le_bytes());
}
