use serde::{Deserialize, Serialize};

/// OpenAI embeddings request
#[derive(Debug, Clone, Serialize)]
pub struct EmbedRequest<'a> {
    /// Model name (e.g., "text-embedding-3-large")
    pub model: &'a str,

    /// Input text
    pub input: &'a str,
}

/// OpenAI embeddings response
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedResponse {
    /// One entry per input
    pub data: Vec<EmbeddingData>,

    /// Model that produced the vectors
    #[serde(default)]
    pub model: Option<String>,
}

/// Single embedding in a response
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingData {
    pub embedding: Vec<f32>,

    #[serde(default)]
    pub index: usize,
}

/// Error body returned by OpenAI-compatible APIs
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

impl EmbedResponse {
    /// Take the first embedding, if any
    pub fn into_first(self) -> Option<Vec<f32>> {
        self.data
            .into_iter()
            .min_by_key(|d| d.index)
            .map(|d| d.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_response() {
        let body = r#"{
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.5, -0.25, 1.0]}],
            "model": "text-embedding-3-large",
            "usage": {"prompt_tokens": 3, "total_tokens": 3}
        }"#;
        let resp: EmbedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.model.as_deref(), Some("text-embedding-3-large"));
        assert_eq!(resp.into_first(), Some(vec![0.5, -0.25, 1.0]));
    }

    #[test]
    fn test_decode_empty_data() {
        let resp: EmbedResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(resp.into_first().is_none());
    }

    #[test]
    fn test_encode_request() {
        let req = EmbedRequest { model: "m", input: "hello" };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"model": "m", "input": "hello"}));
    }
}
