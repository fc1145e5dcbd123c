//! A minimal persistent inverted-index engine for textual search.
//!
//! Ingests `(id, text)` pairs, segments and normalizes each text into
//! word-like tokens, and maintains for each token a posting list of
//! `(id, score)` entries sorted by descending score. Queries segment
//! and normalize an input string the same way, retrieve each token's
//! posting list, and combine them by union or intersection into a
//! ranked result set.

pub mod core;
pub mod index;
pub mod normalize;
pub mod query;
pub mod store;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{Id, Pair, Score, SetOperation};
pub use crate::index::{Indexer, Posting};
pub use crate::query::QueryEngine;
pub use crate::store::Store;
