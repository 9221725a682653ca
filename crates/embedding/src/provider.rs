use async_trait::async_trait;
use staffsearch_common::Result;

/// Text that providers receive in place of an empty string
pub const EMPTY_INPUT: &str = " ";

/// Common trait for embedding providers
///
/// Every call for a given provider configuration must return vectors of the
/// same length.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Model identifier, for stats and logs
    fn model(&self) -> &str;
}

/// Replace empty input with a single space; providers reject empty input.
/// Whitespace-only text is passed through unchanged.
pub fn non_empty(text: &str) -> &str {
    if text.is_empty() {
        EMPTY_INPUT
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(""), " ");
        assert_eq!(non_empty("\n\t"), "\n\t");
        assert_eq!(non_empty("rust"), "rust");
    }
}
