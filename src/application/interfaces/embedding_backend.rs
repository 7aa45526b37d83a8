use async_trait::async_trait;

use crate::domain::RetrievalError;

/// Abstract embedding provider (§6). The core only ever calls `embed_many`;
/// which concrete provider backs it (OpenAI, Google, a local model) is an
/// external collaborator's concern.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Embeds a batch of texts, returning vectors aligned positionally with
    /// `texts`. The caller (the Semantic Ranker) is responsible for batching
    /// at 20 items per call (§4.6); a batch either succeeds in full or fails
    /// in full — partial-batch failure is represented by the caller treating
    /// an `Err` batch's chunks as score 0 (§8 scenario 6).
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError>;

    fn model_name(&self) -> &str;

    fn dimensions(&self) -> usize;
}
