use tracing::warn;

use crate::application::EmbeddingBackend;
use crate::connector::adapter::embedding_cache::EmbeddingCache;
use crate::domain::{Chunk, RetrievalError};

const CONTENT_TRUNCATE: usize = 2000;
const INPUT_TRUNCATE: usize = 8000;
const BATCH_SIZE: usize = 20;

/// Cosine similarity scores for `chunks` against `query`, via a cached
/// embedding backend (§4.6). Falls back to `None` (caller reverts to lexical
/// scores unchanged) if the query itself can't be embedded.
pub async fn score(
    query: &str,
    chunks: &[Chunk],
    backend: &dyn EmbeddingBackend,
    cache: &EmbeddingCache,
) -> Option<Vec<f32>> {
    let query_text = truncate(query, INPUT_TRUNCATE);
    let query_vec = match embed_one(&query_text, backend, cache).await {
        Some(v) => v,
        None => {
            warn!("semantic ranker: query embedding unavailable, falling back to lexical order");
            return None;
        }
    };

    let texts: Vec<String> = chunks
        .iter()
        .map(|c| truncate(&truncate(c.content(), CONTENT_TRUNCATE), INPUT_TRUNCATE))
        .collect();

    let vectors = embed_many_cached(&texts, backend, cache).await;

    Some(
        vectors
            .iter()
            .map(|v| v.as_ref().map(|v| cosine_similarity(&query_vec, v)).unwrap_or(0.0))
            .collect(),
    )
}

async fn embed_one(text: &str, backend: &dyn EmbeddingBackend, cache: &EmbeddingCache) -> Option<Vec<f32>> {
    embed_many_cached(std::slice::from_ref(&text.to_string()), backend, cache)
        .await
        .into_iter()
        .next()
        .flatten()
}

/// Batches uncached texts at [`BATCH_SIZE`] (§4.6); a failed batch leaves its
/// entries as `None`, which the caller treats as a zero semantic score.
async fn embed_many_cached(
    texts: &[String],
    backend: &dyn EmbeddingBackend,
    cache: &EmbeddingCache,
) -> Vec<Option<Vec<f32>>> {
    let mut results: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
    let mut misses: Vec<usize> = Vec::new();

    for (i, text) in texts.iter().enumerate() {
        match cache.get(text).await {
            Some(vector) => results[i] = Some(vector),
            None => misses.push(i),
        }
    }

    for batch in misses.chunks(BATCH_SIZE) {
        let batch_texts: Vec<String> = batch.iter().map(|&i| texts[i].clone()).collect();
        match fetch_batch(backend, &batch_texts).await {
            Ok(vectors) => {
                for (&idx, vector) in batch.iter().zip(vectors) {
                    cache.put(&texts[idx], &vector).await;
                    results[idx] = Some(vector);
                }
            }
            Err(err) => {
                warn!(error = %err, batch_size = batch.len(), "embedding batch failed");
            }
        }
    }

    results
}

async fn fetch_batch(backend: &dyn EmbeddingBackend, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
    backend.embed_many(texts).await
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}
