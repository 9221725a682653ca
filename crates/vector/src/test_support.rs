//! Deterministic fixtures for unit tests.

use async_trait::async_trait;
use serde_json::json;
use staffsearch_common::{Result, StaffSearchError};
use staffsearch_embedding::EmbeddingProvider;
use staffsearch_source::EmployeeRecord;
use std::sync::Mutex;

/// Embeds text by hashing it; same text, same vector
pub struct HashEmbedder {
    dimension: usize,
    fail_on: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail any text containing `needle`
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        (0..self.dimension)
            .map(|i| {
                // FNV-1a over the text, salted with the component index
                let mut hash: u64 = 0xcbf29ce484222325 ^ i as u64;
                for byte in text.bytes() {
                    hash ^= byte as u64;
                    hash = hash.wrapping_mul(0x100000001b3);
                }
                (hash % 1000) as f32 / 1000.0
            })
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.lock().unwrap().push(text.to_string());
        if let Some(needle) = &self.fail_on {
            if text.contains(needle.as_str()) {
                return Err(StaffSearchError::embedding("provider unavailable"));
            }
        }
        Ok(self.vector_for(text))
    }

    fn model(&self) -> &str {
        "hash-test"
    }
}

pub fn record(id: &str, summary: &str, skills: &[&str]) -> EmployeeRecord {
    EmployeeRecord {
        employee_id: id.to_string(),
        summary: summary.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        raw_doc: json!({ "employee_record": { "employee_id": id } }),
    }
}
