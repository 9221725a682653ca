//! staffsearch embedding provider
//!
//! Turns text into fixed-length vectors via the OpenAI embeddings API.

mod client;
mod provider;
mod types;

pub use client::OpenAiEmbedder;
pub use provider::{non_empty, EmbeddingProvider, EMPTY_INPUT};
pub use types::{EmbedRequest, EmbedResponse, EmbeddingData};
