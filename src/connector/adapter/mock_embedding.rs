use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use rand::{Rng, SeedableRng};

use crate::application::EmbeddingBackend;
use crate::domain::RetrievalError;

const DEFAULT_DIMENSIONS: usize = 384;

/// Deterministic, hash-seeded embedding backend for offline use and tests
/// (§10.5). Same text always yields the same normalized vector, so
/// embedding-dependent tests stay reproducible without a real provider.
pub struct MockEmbeddingBackend {
    dimensions: usize,
}

impl MockEmbeddingBackend {
    pub fn new() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn generate(&self, text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut vector: Vec<f32> = (0..self.dimensions).map(|_| rng.gen_range(-1.0..1.0)).collect();

        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for x in &mut vector {
                *x /= magnitude;
            }
        }
        vector
    }
}

impl Default for MockEmbeddingBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingBackend for MockEmbeddingBackend {
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        Ok(texts.iter().map(|t| self.generate(t)).collect())
    }

    fn model_name(&self) -> &str {
        "mock-embedding"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_text_yields_same_vector() {
        let backend = MockEmbeddingBackend::new();
        let a = backend.embed_many(&["hello".to_string()]).await.unwrap();
        let b = backend.embed_many(&["hello".to_string()]).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn vectors_are_normalized() {
        let backend = MockEmbeddingBackend::new();
        let v = &backend.embed_many(&["x".to_string()]).await.unwrap()[0];
        let magnitude: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 1e-3);
    }

    #[tokio::test]
    async fn respects_requested_dimensions() {
        let backend = MockEmbeddingBackend::with_dimensions(64);
        let v = &backend.embed_many(&["x".to_string()]).await.unwrap()[0];
        assert_eq!(v.len(), 64);
    }
}
