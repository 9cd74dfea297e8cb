//! In-memory document search: tokenizer, chained hash map, posting lists,
//! prefix tree and the [`IndexEngine`] that ties them together.

pub mod chained_map;
pub mod config;
pub mod error;
pub mod index;
pub mod postings;
pub mod tokenizer;
pub mod trie;

pub use config::EngineConfig;
pub use error::IngestError;
pub use index::{DocId, Document, IndexEngine, Score, SearchMode};
pub use postings::{Posting, PostingList};
