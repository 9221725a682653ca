use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Employee record ready for indexing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Employee identifier (not guaranteed unique)
    pub employee_id: String,

    /// Contribution summary text, possibly empty
    pub summary: String,

    /// Skill tags in source order
    pub skills: Vec<String>,

    /// Original document as stored in the document store
    pub raw_doc: Value,
}

/// `_all_docs` response body
#[derive(Debug, Clone, Deserialize)]
pub struct AllDocsResponse {
    #[serde(default)]
    pub total_rows: Option<u64>,

    #[serde(default)]
    pub rows: Vec<AllDocsRow>,
}

/// One row of `_all_docs`; `doc` is only present with `include_docs`
#[derive(Debug, Clone, Deserialize)]
pub struct AllDocsRow {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub doc: Option<Value>,
}

// Document shape. Every field is optional in the store.

#[derive(Debug, Default, Deserialize)]
struct EmployeeDocument {
    #[serde(default)]
    employee_record: Option<EmployeeSection>,
}

#[derive(Debug, Default, Deserialize)]
struct EmployeeSection {
    #[serde(default)]
    employee_id: Option<String>,

    #[serde(default)]
    contributions: Contributions,
}

#[derive(Debug, Default, Deserialize)]
struct Contributions {
    #[serde(default)]
    jira: JiraContributions,

    #[serde(default)]
    gitlab: GitlabContributions,
}

#[derive(Debug, Default, Deserialize)]
struct JiraContributions {
    #[serde(default)]
    summary_jira: String,

    #[serde(default)]
    components: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GitlabContributions {
    #[serde(default)]
    summary_gitlab: String,
}

impl EmployeeRecord {
    /// Normalize a stored document into a record
    ///
    /// Returns `None` for documents without an `employee_record` or without an
    /// `employee_id`; those are not indexable.
    pub fn from_document(doc: Value) -> Option<Self> {
        let parsed: EmployeeDocument = match serde_json::from_value(doc.clone()) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Skipping malformed document: {}", e);
                return None;
            }
        };

        let section = parsed.employee_record?;
        let employee_id = section.employee_id.filter(|id| !id.is_empty())?;
        let contributions = section.contributions;

        let summary = format!(
            "{} {}",
            contributions.jira.summary_jira, contributions.gitlab.summary_gitlab
        )
        .trim()
        .to_string();

        Some(Self {
            employee_id,
            summary,
            skills: contributions.jira.components,
            raw_doc: doc,
        })
    }
}

/// Normalize `_all_docs` rows, skipping rows without usable documents
pub fn records_from_rows(rows: Vec<AllDocsRow>) -> Vec<EmployeeRecord> {
    let total = rows.len();
    let records: Vec<EmployeeRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id.clone().unwrap_or_default();
            let record = row.doc.and_then(EmployeeRecord::from_document);
            if record.is_none() {
                debug!("Skipping row without employee record: {}", id);
            }
            record
        })
        .collect();

    debug!("Normalized {} of {} rows", records.len(), total);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_document_full() {
        let doc = json!({
            "_id": "emp-1",
            "employee_record": {
                "employee_id": "E001",
                "contributions": {
                    "jira": {"summary_jira": "Led payments epic.", "components": ["Rust", "Kafka"]},
                    "gitlab": {"summary_gitlab": "Maintains the ledger service."}
                }
            }
        });
        let record = EmployeeRecord::from_document(doc.clone()).unwrap();
        assert_eq!(record.employee_id, "E001");
        assert_eq!(record.summary, "Led payments epic. Maintains the ledger service.");
        assert_eq!(record.skills, vec!["Rust", "Kafka"]);
        assert_eq!(record.raw_doc, doc);
    }

    #[test]
    fn test_from_document_defaults() {
        let doc = json!({"employee_record": {"employee_id": "E002"}});
        let record = EmployeeRecord::from_document(doc).unwrap();
        assert_eq!(record.summary, "");
        assert!(record.skills.is_empty());

        let gitlab_only = json!({
            "employee_record": {
                "employee_id": "E003",
                "contributions": {"gitlab": {"summary_gitlab": "Ships CI tooling."}}
            }
        });
        let record = EmployeeRecord::from_document(gitlab_only).unwrap();
        assert_eq!(record.summary, "Ships CI tooling.");
    }

    #[test]
    fn test_from_document_skips_unindexable() {
        assert!(EmployeeRecord::from_document(json!({"_id": "design-doc"})).is_none());
        assert!(EmployeeRecord::from_document(json!({"employee_record": {}})).is_none());
        assert!(EmployeeRecord::from_document(json!({"employee_record": {"employee_id": ""}})).is_none());
        assert!(EmployeeRecord::from_document(json!({"employee_record": {"employee_id": 42}})).is_none());
    }

    #[test]
    fn test_records_from_rows_keeps_order() {
        let body = json!({
            "total_rows": 3,
            "rows": [
                {"id": "a", "doc": {"employee_record": {"employee_id": "A"}}},
                {"id": "b"},
                {"id": "c", "doc": {"employee_record": {"employee_id": "C"}}}
            ]
        });
        let resp: AllDocsResponse = serde_json::from_value(body).unwrap();
        let ids: Vec<String> = records_from_rows(resp.rows)
            .into_iter()
            .map(|r| r.employee_id)
            .collect();
        assert_eq!(ids, vec!["A", "C"]);
    }
}
