//! staffsearch record source
//!
//! Loads employee documents from Cloudant (or a local export) and normalizes
//! them into [`EmployeeRecord`]s.

mod cloudant;
mod file;
mod types;

use async_trait::async_trait;
use staffsearch_common::{AppConfig, Result};
use std::sync::Arc;

pub use cloudant::{CloudantSource, IAM_TOKEN_URL};
pub use file::JsonFileSource;
pub use types::{records_from_rows, AllDocsResponse, AllDocsRow, EmployeeRecord};

/// Supplier of employee records to index
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Load every indexable record, in source order
    async fn load_records(&self) -> Result<Vec<EmployeeRecord>>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// Pick the configured source: a local file when `RECORDS_FILE` is set,
/// Cloudant otherwise
pub fn source_from_config(config: &AppConfig) -> Result<Arc<dyn RecordSource>> {
    match &config.records_file {
        Some(path) => Ok(Arc::new(JsonFileSource::new(path))),
        None => Ok(Arc::new(CloudantSource::from_config(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_source_from_config_prefers_file() {
        let mut config = AppConfig::default();
        config.records_file = Some(PathBuf::from("employees.json"));
        let source = source_from_config(&config).unwrap();
        assert_eq!(source.describe(), "file:employees.json");
    }

    #[test]
    fn test_source_from_config_without_credentials() {
        assert!(source_from_config(&AppConfig::default()).is_err());
    }
}
