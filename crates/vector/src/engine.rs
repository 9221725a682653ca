use chrono::{DateTime, Utc};
use staffsearch_common::{Result, StaffSearchError};
use staffsearch_embedding::EmbeddingProvider;
use staffsearch_source::RecordSource;
use std::sync::Arc;
use tracing::{debug, info};

use crate::index::VectorIndex;
use crate::indexer::{build_index, IndexedCorpus};
use crate::types::{EmployeeProfile, IndexStats, Match};

/// Query-time facade over a built index
///
/// Immutable once constructed. Share it behind an `Arc`; a future re-index
/// should build a new engine and swap the `Arc` rather than mutate this one.
pub struct SearchEngine {
    corpus: IndexedCorpus,
    embedder: Arc<dyn EmbeddingProvider>,
    indexed_at: DateTime<Utc>,
}

impl SearchEngine {
    /// Load all records from `source` and index them (fail-fast)
    pub async fn build(
        source: &dyn RecordSource,
        embedder: Arc<dyn EmbeddingProvider>,
        dimension: usize,
    ) -> Result<Self> {
        info!("Loading employee records from {}", source.describe());
        let records = source.load_records().await?;

        let corpus = build_index(&records, embedder.as_ref(), dimension).await?;
        info!(
            "Search engine ready - {} vectors, {} profiles",
            corpus.index.len(),
            corpus.profiles.len()
        );

        Ok(Self::from_corpus(corpus, embedder))
    }

    /// Wrap an already built corpus
    pub fn from_corpus(corpus: IndexedCorpus, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            corpus,
            embedder,
            indexed_at: Utc::now(),
        }
    }

    /// Embed `query` and return the `top_k` closest employees
    pub async fn search_by_text(&self, query: &str, top_k: usize) -> Result<Vec<Match>> {
        debug!("Searching for: {} (top_k={})", query, top_k);

        let query_vector = self.embedder.embed(query).await?;
        let matches = self.corpus.index.search(&query_vector, top_k)?;

        debug!("Search completed - {} results", matches.len());
        Ok(matches)
    }

    /// Profile for `employee_id`
    pub fn get_profile(&self, employee_id: &str) -> Result<&EmployeeProfile> {
        self.corpus
            .profiles
            .get(employee_id)
            .ok_or_else(|| StaffSearchError::not_found(format!("Employee '{}' not found", employee_id)))
    }

    /// Number of employees available for lookup
    pub fn employee_count(&self) -> usize {
        self.corpus.profiles.len()
    }

    pub fn index(&self) -> &VectorIndex {
        &self.corpus.index
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            indexed_employees: self.corpus.profiles.len(),
            indexed_vectors: self.corpus.index.len(),
            dimension: self.corpus.index.dimension(),
            embedding_model: self.embedder.model().to_string(),
            indexed_at: self.indexed_at,
        }
    }
}
