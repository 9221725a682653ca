use crate::error::StaffSearchError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// staffsearch application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenAI API key
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,

    /// OpenAI-compatible API base URL
    pub openai_base_url: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Embedding dimension (must match the model output)
    pub embedding_dim: usize,

    /// Cloudant service URL
    pub cloudant_url: Option<String>,

    /// Cloudant IAM API key
    #[serde(skip_serializing)]
    pub cloudant_apikey: Option<String>,

    /// Cloudant auth type (only "iam" is supported)
    pub cloudant_auth_type: String,

    /// Cloudant database holding employee documents
    pub cloudant_db: String,

    /// Local JSON file with employee documents (replaces Cloudant when set)
    pub records_file: Option<PathBuf>,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Externally visible URL advertised in the OpenAPI document
    pub public_url: Option<String>,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: "https://api.openai.com".to_string(),
            embedding_model: "text-embedding-3-large".to_string(),
            embedding_dim: 3072,
            cloudant_url: None,
            cloudant_apikey: None,
            cloudant_auth_type: "iam".to_string(),
            cloudant_db: "employeeinfo".to_string(),
            records_file: None,
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            public_url: None,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, StaffSearchError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StaffSearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let embedding_dim = match get("EMBEDDING_DIM") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                StaffSearchError::config(format!("EMBEDDING_DIM must be a positive integer, got '{}'", raw))
            })?,
            None => defaults.embedding_dim,
        };

        let server_port = match get("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                StaffSearchError::config(format!("SERVER_PORT must be a port number, got '{}'", raw))
            })?,
            None => defaults.server_port,
        };

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            embedding_model: get("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            embedding_dim,
            cloudant_url: get("CLOUDANT_URL"),
            cloudant_apikey: get("CLOUDANT_APIKEY"),
            cloudant_auth_type: get("CLOUDANT_AUTH_TYPE").unwrap_or(defaults.cloudant_auth_type),
            cloudant_db: get("CLOUDANT_DB").unwrap_or(defaults.cloudant_db),
            records_file: get("RECORDS_FILE").map(PathBuf::from),
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            public_url: get("PUBLIC_URL"),
            log_dir: get("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// URL advertised to API clients
    pub fn advertised_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.server_bind_address()))
    }

    /// Names of required environment variables that are not set
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openai_api_key.is_none() {
            missing.push("OPENAI_API_KEY");
        }
        if self.records_file.is_none() {
            if self.cloudant_apikey.is_none() {
                missing.push("CLOUDANT_APIKEY");
            }
            if self.cloudant_url.is_none() {
                missing.push("CLOUDANT_URL");
            }
        }
        missing
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), StaffSearchError> {
        if self.embedding_dim == 0 {
            return Err(StaffSearchError::config("Embedding dimension must be positive"));
        }

        if self.embedding_model.is_empty() {
            return Err(StaffSearchError::config("Embedding model name cannot be empty"));
        }

        if !self.openai_base_url.starts_with("http://")
            && !self.openai_base_url.starts_with("https://") {
            return Err(StaffSearchError::config(
                "OpenAI base URL must start with http:// or https://"
            ));
        }

        if self.server_port == 0 {
            return Err(StaffSearchError::config("Server port cannot be 0"));
        }

        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(StaffSearchError::config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}
