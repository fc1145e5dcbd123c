pub mod indexer;
pub mod merge;
pub mod posting;

pub use indexer::Indexer;
pub use posting::Posting;
