//! staffsearch vector search
//!
//! Exact in-memory nearest-neighbor index over employee embeddings, the
//! startup indexer that fills it, and the query-time engine.

mod distance;
mod engine;
mod index;
mod indexer;
mod types;

#[cfg(test)]
mod test_support;

pub use distance::squared_euclidean;
pub use engine::SearchEngine;
pub use index::VectorIndex;
pub use indexer::{build_index, searchable_text, IndexedCorpus};
pub use types::{EmployeeMetadata, EmployeeProfile, IndexStats, Match, VectorRecord};
