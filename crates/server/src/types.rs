use serde::{Deserialize, Serialize};
use serde_json::Value;
use staffsearch_common::StaffSearchError;
use staffsearch_vector::{EmployeeProfile, Match};

/// Smallest accepted `top_k`
pub const MIN_TOP_K: usize = 1;

/// Largest accepted `top_k`
pub const MAX_TOP_K: usize = 50;

/// Search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Job description to match employees against
    pub role_description: String,

    /// Number of matches to return
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    5
}

impl SearchRequest {
    /// Reject input before it reaches the engine
    pub fn validate(&self) -> Result<(), StaffSearchError> {
        if self.role_description.trim().is_empty() {
            return Err(StaffSearchError::invalid_input("role_description cannot be empty"));
        }
        if !(MIN_TOP_K..=MAX_TOP_K).contains(&self.top_k) {
            return Err(StaffSearchError::invalid_input(format!(
                "top_k must be between {} and {}",
                MIN_TOP_K, MAX_TOP_K
            )));
        }
        Ok(())
    }
}

/// Search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub matches: Vec<MatchItem>,
}

/// One ranked candidate
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchItem {
    pub employee_id: String,

    /// Squared L2 distance; lower is a closer match
    pub score: f32,

    pub skills: Vec<String>,
}

impl From<Match> for MatchItem {
    fn from(m: Match) -> Self {
        Self {
            employee_id: m.employee_id,
            score: m.score,
            skills: m.skills,
        }
    }
}

/// Profile response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub employee_id: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub raw_doc: Option<Value>,
}

impl From<&EmployeeProfile> for ProfileResponse {
    fn from(profile: &EmployeeProfile) -> Self {
        Self {
            employee_id: profile.employee_id.clone(),
            summary: profile.summary.clone(),
            skills: profile.skills.clone(),
            raw_doc: Some(profile.raw_doc.clone()).filter(|doc| !doc.is_null()),
        }
    }
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
    pub indexed_employees: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, top_k: usize) -> SearchRequest {
        SearchRequest {
            role_description: text.to_string(),
            top_k,
        }
    }

    #[test]
    fn test_default_top_k() {
        let req: SearchRequest = serde_json::from_str(r#"{"role_description": "SRE"}"#).unwrap();
        assert_eq!(req.top_k, 5);
    }

    #[test]
    fn test_validate() {
        assert!(request("Rust backend developer", 5).validate().is_ok());
        assert!(request("x", 50).validate().is_ok());
        assert!(request("   ", 5).validate().is_err());
        assert!(request("x", 0).validate().is_err());
        assert!(request("x", 51).validate().is_err());
    }
}
