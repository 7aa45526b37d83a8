use futures_util::stream::{self, StreamExt};
use tracing::warn;

use crate::application::CompletionBackend;
use crate::domain::ScoredChunk;

const RERANK_CONCURRENCY: usize = 5;
const BATCH_SIZE: usize = 10;

/// Optional LLM rerank (§4.9): asks a completion backend, per batch, for a
/// relevance judgement against `query`. Fan-out is bounded to
/// [`RERANK_CONCURRENCY`] concurrent calls via `buffer_unordered`, matching
/// the teacher's bounded-concurrency idiom rather than a semaphore type.
///
/// A batch's failure leaves that batch's chunks in their pre-rerank order —
/// rerank degrades silently, never aborting the pipeline (§9).
pub async fn rerank(query: &str, chunks: Vec<ScoredChunk>, backend: &dyn CompletionBackend) -> Vec<ScoredChunk> {
    let batches: Vec<Vec<ScoredChunk>> = chunks
        .chunks(BATCH_SIZE)
        .map(|b| b.to_vec())
        .collect();

    let reranked_batches: Vec<Vec<ScoredChunk>> = stream::iter(batches)
        .map(|batch| async move { rerank_batch(query, batch, backend).await })
        .buffer_unordered(RERANK_CONCURRENCY)
        .collect()
        .await;

    reranked_batches.into_iter().flatten().collect()
}

async fn rerank_batch(
    query: &str,
    batch: Vec<ScoredChunk>,
    backend: &dyn CompletionBackend,
) -> Vec<ScoredChunk> {
    let listing: String = batch
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{i}: {} ({})", c.chunk().path(), c.chunk().name().unwrap_or("")))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        "Query: {query}\n\nRank these code chunks by relevance to the query, most relevant \
         first. Respond with a JSON array of their indices only.\n\n{listing}"
    );

    match backend.generate_text(&prompt).await {
        Ok(text) => match parse_order(&text, batch.len()) {
            Some(order) => reorder(batch, order),
            None => {
                warn!("rerank: unparseable response, keeping hybrid order");
                batch
            }
        },
        Err(err) => {
            warn!(error = %err, "rerank batch failed, keeping hybrid order");
            batch
        }
    }
}

fn parse_order(text: &str, len: usize) -> Option<Vec<usize>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    let indices: Vec<usize> = serde_json::from_str(&text[start..=end]).ok()?;

    if indices.len() != len {
        return None;
    }
    let mut seen = vec![false; len];
    for &i in &indices {
        if i >= len || seen[i] {
            return None;
        }
        seen[i] = true;
    }
    Some(indices)
}

fn reorder(batch: Vec<ScoredChunk>, order: Vec<usize>) -> Vec<ScoredChunk> {
    let mut slots: Vec<Option<ScoredChunk>> = batch.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::adapter::mock_completion::MockCompletionBackend;
    use crate::domain::{Chunk, ChunkType, Language};
    use async_trait::async_trait;
    use crate::domain::RetrievalError;

    fn chunk(path: &str) -> ScoredChunk {
        ScoredChunk::new(
            Chunk::new(path.to_string(), "x".to_string(), 1, 1, ChunkType::File, None, Language::Python),
            0.5,
        )
    }

    struct ReversingBackend;

    #[async_trait]
    impl CompletionBackend for ReversingBackend {
        async fn generate_text(&self, prompt: &str) -> Result<String, RetrievalError> {
            let count = prompt.lines().filter(|l| l.contains(": ")).count();
            let order: Vec<usize> = (0..count).rev().collect();
            Ok(serde_json::to_string(&order).unwrap())
        }
    }

    #[tokio::test]
    async fn degrades_to_original_order_on_backend_failure() {
        struct Failing;
        #[async_trait]
        impl CompletionBackend for Failing {
            async fn generate_text(&self, _p: &str) -> Result<String, RetrievalError> {
                Err(RetrievalError::backend_unavailable("down"))
            }
        }

        let chunks = vec![chunk("a.py"), chunk("b.py")];
        let out = rerank("q", chunks, &Failing).await;
        assert_eq!(out[0].chunk().path(), "a.py");
        assert_eq!(out[1].chunk().path(), "b.py");
    }

    #[tokio::test]
    async fn applies_parsed_order() {
        let chunks = vec![chunk("a.py"), chunk("b.py")];
        let out = rerank("q", chunks, &ReversingBackend).await;
        assert_eq!(out[0].chunk().path(), "b.py");
        assert_eq!(out[1].chunk().path(), "a.py");
    }

    #[tokio::test]
    async fn unparseable_response_keeps_original_order() {
        let chunks = vec![chunk("a.py"), chunk("b.py")];
        let out = rerank("q", chunks, &MockCompletionBackend::new()).await;
        assert_eq!(out[0].chunk().path(), "a.py");
        assert_eq!(out[1].chunk().path(), "b.py");
    }
}
