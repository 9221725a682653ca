use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata stored alongside each vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeMetadata {
    /// Employee identifier (the index does not enforce uniqueness)
    pub employee_id: String,

    /// Skill tags
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Vector index entry
///
/// Vector and metadata share one record so they cannot drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    /// 0-based insertion order; never changes
    pub position: usize,

    /// Embedding, exactly `dimension` values
    pub vector: Vec<f32>,

    /// Attached metadata
    pub metadata: EmployeeMetadata,
}

/// Search hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    /// Employee identifier
    pub employee_id: String,

    /// Squared Euclidean distance to the query (lower is closer, unbounded)
    pub score: f32,

    /// Skill tags
    pub skills: Vec<String>,

    /// Position of the matched record in the index
    #[serde(skip)]
    pub position: usize,
}

/// Full employee profile for lookups
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeProfile {
    pub employee_id: String,
    pub summary: String,
    pub skills: Vec<String>,

    /// Original document
    pub raw_doc: Value,
}

/// Index statistics
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    /// Distinct employees available for profile lookup
    pub indexed_employees: usize,

    /// Vectors in the index (counts duplicate ids separately)
    pub indexed_vectors: usize,

    pub dimension: usize,
    pub embedding_model: String,
    pub indexed_at: DateTime<Utc>,
}
