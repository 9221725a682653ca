use staffsearch_common::{Result, StaffSearchError};

use crate::distance::squared_euclidean;
use crate::types::{EmployeeMetadata, Match, VectorRecord};

/// In-memory exact nearest-neighbor index
///
/// Append-only: records keep their insertion position for the life of the
/// index. Search is a brute-force scan, O(n·D) distance work plus an
/// O(n log n) sort per query, which is fine for organization-sized rosters
/// but is the scaling limit of this design.
///
/// `insert` takes `&mut self` and `search` takes `&self`, so an index shared
/// behind an `Arc` is read-only and needs no lock.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimension: usize,
    records: Vec<VectorRecord>,
}

impl VectorIndex {
    /// Create an empty index for vectors of `dimension` values
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(StaffSearchError::config("Index dimension must be positive"));
        }
        Ok(Self {
            dimension,
            records: Vec::new(),
        })
    }

    /// Create with pre-allocated capacity
    pub fn with_capacity(dimension: usize, capacity: usize) -> Result<Self> {
        let mut index = Self::new(dimension)?;
        index.records.reserve(capacity);
        Ok(index)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `position`, if any
    pub fn get(&self, position: usize) -> Option<&VectorRecord> {
        self.records.get(position)
    }

    /// Records in insertion order
    pub fn records(&self) -> impl Iterator<Item = &VectorRecord> {
        self.records.iter()
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(StaffSearchError::dimension_mismatch(self.dimension, vector.len()));
        }
        Ok(())
    }

    /// Append a vector with its metadata; returns the assigned position
    ///
    /// On a dimension mismatch the index is left untouched.
    pub fn insert(&mut self, vector: Vec<f32>, metadata: EmployeeMetadata) -> Result<usize> {
        self.check_dimension(&vector)?;
        let position = self.records.len();
        self.records.push(VectorRecord {
            position,
            vector,
            metadata,
        });
        Ok(position)
    }

    /// The `k` records closest to `query`, closest first
    ///
    /// Scores are squared Euclidean distances. Equal distances keep insertion
    /// order. Returns fewer than `k` matches when the index is smaller, and an
    /// empty list for an empty index.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Match>> {
        self.check_dimension(query)?;
        if k == 0 {
            return Err(StaffSearchError::invalid_input("k must be positive"));
        }
        if self.records.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, f32)> = self
            .records
            .iter()
            .map(|record| (record.position, squared_euclidean(query, &record.vector)))
            .collect();

        // sort_by is stable, which gives the tie-break
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(position, score)| {
                let metadata = &self.records[position].metadata;
                Match {
                    employee_id: metadata.employee_id.clone(),
                    score,
                    skills: metadata.skills.clone(),
                    position,
                }
            })
            .collect())
    }
}
