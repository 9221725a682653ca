use async_trait::async_trait;
use serde_json::Value;
use staffsearch_common::{Result, StaffSearchError};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::types::{records_from_rows, AllDocsResponse, EmployeeRecord};
use crate::RecordSource;

/// Employee documents exported to a local JSON file
///
/// Accepts either an `_all_docs` response (`{"rows": [{"doc": ...}]}`) or a
/// plain array of documents.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse file contents in either supported layout
fn parse_records(data: &str) -> Result<Vec<EmployeeRecord>> {
    match serde_json::from_str::<Value>(data)? {
        Value::Array(docs) => Ok(docs
            .into_iter()
            .filter_map(EmployeeRecord::from_document)
            .collect()),
        value @ Value::Object(_) => {
            let all_docs: AllDocsResponse = serde_json::from_value(value)?;
            Ok(records_from_rows(all_docs.rows))
        }
        _ => Err(StaffSearchError::source(
            "Records file must contain an _all_docs object or an array of documents",
        )),
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn load_records(&self) -> Result<Vec<EmployeeRecord>> {
        let data = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StaffSearchError::source(format!(
                "Failed to read records file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let records = parse_records(&data)?;
        info!("Loaded {} employee records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_array_layout() {
        let data = r#"[
            {"employee_record": {"employee_id": "E1", "contributions": {"jira": {"components": ["Go"]}}}},
            {"unrelated": true}
        ]"#;
        let records = parse_records(data).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].skills, vec!["Go"]);
    }

    #[test]
    fn test_parse_rejects_scalar() {
        assert!(matches!(parse_records("42"), Err(StaffSearchError::Source(_))));
        assert!(matches!(parse_records("{not json"), Err(StaffSearchError::Json(_))));
    }

    #[tokio::test]
    async fn test_load_all_docs_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"total_rows": 2, "rows": [
                {{"id": "1", "doc": {{"employee_record": {{"employee_id": "E1"}}}}}},
                {{"id": "2", "doc": {{"employee_record": {{"employee_id": "E2"}}}}}}
            ]}}"#
        )
        .unwrap();

        let source = JsonFileSource::new(file.path());
        let records = source.load_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].employee_id, "E2");
        assert!(source.describe().starts_with("file:"));
    }

    #[tokio::test]
    async fn test_missing_file_is_source_error() {
        let source = JsonFileSource::new("/nonexistent/employees.json");
        assert!(matches!(
            source.load_records().await,
            Err(StaffSearchError::Source(_))
        ));
    }
}
