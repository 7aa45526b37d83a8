use async_trait::async_trait;

use crate::domain::RetrievalError;

/// Abstract single-shot text-generation provider (§6), used for HyDE (§4.6) and
/// optional LLM rerank (§4.9). Neither feature is ever load-bearing: every
/// caller treats an `Err` here as "fall back to the non-LLM path" (§9).
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, RetrievalError>;
}
