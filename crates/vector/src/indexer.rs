use staffsearch_common::Result;
use staffsearch_embedding::EmbeddingProvider;
use staffsearch_source::EmployeeRecord;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::index::VectorIndex;
use crate::types::{EmployeeMetadata, EmployeeProfile};

/// Freshly built index plus the profile table keyed by employee id
#[derive(Debug, Clone)]
pub struct IndexedCorpus {
    pub index: VectorIndex,
    pub profiles: HashMap<String, EmployeeProfile>,
}

/// Text embedded for a record: summary followed by its skills
pub fn searchable_text(record: &EmployeeRecord) -> String {
    format!("{} Skills: {}", record.summary, record.skills.join(", "))
}

/// Embed every record in order and build a new index
///
/// Fail-fast: the first embedding or insertion error aborts the build and is
/// returned unchanged. Duplicate employee ids keep every vector in the index;
/// the profile table keeps the last one seen.
pub async fn build_index(
    records: &[EmployeeRecord],
    embedder: &dyn EmbeddingProvider,
    dimension: usize,
) -> Result<IndexedCorpus> {
    let mut index = VectorIndex::with_capacity(dimension, records.len())?;
    let mut profiles = HashMap::with_capacity(records.len());

    info!("Indexing {} employee records (dimension {})", records.len(), dimension);

    for (i, record) in records.iter().enumerate() {
        let text = searchable_text(record);
        debug!("Embedding record {}/{}: {}", i + 1, records.len(), record.employee_id);

        let vector = embedder.embed(&text).await.map_err(|e| {
            warn!("Embedding failed for employee {}: {}", record.employee_id, e);
            e
        })?;

        index.insert(
            vector,
            EmployeeMetadata {
                employee_id: record.employee_id.clone(),
                skills: record.skills.clone(),
            },
        )?;

        let profile = EmployeeProfile {
            employee_id: record.employee_id.clone(),
            summary: record.summary.clone(),
            skills: record.skills.clone(),
            raw_doc: record.raw_doc.clone(),
        };
        if profiles.insert(record.employee_id.clone(), profile).is_some() {
            warn!("Duplicate employee id {}; profile replaced by later record", record.employee_id);
        }
    }

    info!("Indexed {} employees", index.len());
    Ok(IndexedCorpus { index, profiles })
}
