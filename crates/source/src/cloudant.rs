use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use staffsearch_common::{AppConfig, Result, StaffSearchError};
use std::time::Duration;
use tracing::{debug, info};

use crate::types::{records_from_rows, AllDocsResponse, EmployeeRecord};
use crate::RecordSource;

/// IBM Cloud IAM token endpoint
pub const IAM_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct IamToken {
    access_token: String,
}

/// Cloudant document store client (IAM auth)
#[derive(Debug, Clone)]
pub struct CloudantSource {
    url: String,
    apikey: String,
    database: String,
    iam_url: String,
    client: Client,
}

impl CloudantSource {
    /// Create new Cloudant client
    pub fn new(
        url: impl Into<String>,
        apikey: impl Into<String>,
        database: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StaffSearchError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into().trim_end_matches('/').to_string(),
            apikey: apikey.into(),
            database: database.into(),
            iam_url: IAM_TOKEN_URL.to_string(),
            client,
        })
    }

    /// Create client from application config
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let (Some(apikey), Some(url)) = (&config.cloudant_apikey, &config.cloudant_url) else {
            return Err(StaffSearchError::config(
                "CLOUDANT_APIKEY and CLOUDANT_URL must be set in environment",
            ));
        };

        if !config.cloudant_auth_type.eq_ignore_ascii_case("iam") {
            return Err(StaffSearchError::config(format!(
                "Unsupported CLOUDANT_AUTH_TYPE '{}': only IAM auth is implemented",
                config.cloudant_auth_type
            )));
        }

        Self::new(url, apikey, &config.cloudant_db)
    }

    /// Use a different IAM token endpoint (private endpoints, tests)
    pub fn with_iam_url(mut self, iam_url: impl Into<String>) -> Self {
        self.iam_url = iam_url.into();
        self
    }

    /// Database name
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Exchange the API key for a bearer token
    async fn access_token(&self) -> Result<String> {
        debug!("Requesting IAM token from {}", self.iam_url);

        let response = self
            .client
            .post(&self.iam_url)
            .header("Accept", "application/json")
            .form(&[("grant_type", IAM_GRANT_TYPE), ("apikey", self.apikey.as_str())])
            .send()
            .await
            .map_err(|e| StaffSearchError::network(format!("IAM token request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| StaffSearchError::source(format!("IAM token request rejected: {}", e)))?;

        let token: IamToken = response
            .json()
            .await
            .map_err(|e| StaffSearchError::source(format!("Failed to parse IAM token: {}", e)))?;

        Ok(token.access_token)
    }

    /// List databases visible to the credentials
    pub async fn list_databases(&self) -> Result<Vec<String>> {
        let token = self.access_token().await?;
        let url = format!("{}/_all_dbs", self.url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StaffSearchError::network(format!("Failed to reach Cloudant: {}", e)))?
            .error_for_status()
            .map_err(|e| StaffSearchError::source(format!("Cloudant API error: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| StaffSearchError::source(format!("Failed to parse database list: {}", e)))
    }

    /// Fetch every document in the database
    pub async fn fetch_all_docs(&self) -> Result<AllDocsResponse> {
        let token = self.access_token().await?;
        let url = format!("{}/{}/_all_docs", self.url, self.database);

        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "include_docs": true }))
            .send()
            .await
            .map_err(|e| StaffSearchError::network(format!("Failed to reach Cloudant: {}", e)))?
            .error_for_status()
            .map_err(|e| StaffSearchError::source(format!("Cloudant API error: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| StaffSearchError::source(format!("Failed to parse _all_docs response: {}", e)))
    }
}

#[async_trait]
impl RecordSource for CloudantSource {
    async fn load_records(&self) -> Result<Vec<EmployeeRecord>> {
        let all_docs = self.fetch_all_docs().await?;
        let row_count = all_docs.rows.len();
        let records = records_from_rows(all_docs.rows);

        info!(
            "Loaded {} employee records from Cloudant database '{}' ({} rows)",
            records.len(),
            self.database,
            row_count
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("cloudant:{}/{}", self.url, self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloudant_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.cloudant_url = Some("https://acct.cloudant.com/".to_string());
        config.cloudant_apikey = Some("key".to_string());
        config
    }

    #[test]
    fn test_from_config() {
        let source = CloudantSource::from_config(&cloudant_config()).unwrap();
        assert_eq!(source.database(), "employeeinfo");
        assert_eq!(source.describe(), "cloudant:https://acct.cloudant.com/employeeinfo");
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let mut config = cloudant_config();
        config.cloudant_apikey = None;
        assert!(matches!(
            CloudantSource::from_config(&config),
            Err(StaffSearchError::Config(_))
        ));
    }

    #[test]
    fn test_from_config_rejects_non_iam_auth() {
        let mut config = cloudant_config();
        config.cloudant_auth_type = "basic".to_string();
        assert!(CloudantSource::from_config(&config).is_err());

        config.cloudant_auth_type = "IAM".to_string();
        assert!(CloudantSource::from_config(&config).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_iam_is_network_error() {
        let source = CloudantSource::from_config(&cloudant_config())
            .unwrap()
            .with_iam_url("http://127.0.0.1:9/identity/token");
        let err = source.load_records().await.unwrap_err();
        assert!(matches!(err, StaffSearchError::Network(_)));
    }
}
