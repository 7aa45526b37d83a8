use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::application::CompletionBackend;
use crate::domain::RetrievalError;

/// Deterministic completion backend for tests (§10.5): derives a
/// reproducible pseudo-score from a hash of the prompt, in the same spirit as
/// the reference pack's hash-seeded reranking mock.
pub struct MockCompletionBackend;

impl MockCompletionBackend {
    pub fn new() -> Self {
        Self
    }

    fn pseudo_score(prompt: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        prompt.hash(&mut hasher);
        hasher.finish() % 1000
    }
}

impl Default for MockCompletionBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionBackend for MockCompletionBackend {
    async fn generate_text(&self, prompt: &str) -> Result<String, RetrievalError> {
        let score = Self::pseudo_score(prompt);
        Ok(format!("mock response for deterministic prompt hash {score}"))
    }
}
