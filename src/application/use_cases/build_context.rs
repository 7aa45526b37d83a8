use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::{CompletionBackend, EmbeddingBackend};
use crate::connector::adapter::embedding_cache::EmbeddingCache;
use crate::connector::analyzer::analyze;
use crate::connector::chunker::chunk_file;
use crate::connector::scanner::scan_root;
use crate::connector::scoring::{
    combine, composite_importance, expand_query, lexical_score, rerank, select, semantic_score,
};
use crate::domain::{Chunk, ContextResult, RetrievalConfig, RetrievalError};

/// The retrieval core's single entry point (§2): orchestrates
/// Scanner → Chunker → (Analyzer ∥ Rankers) → Combiner → Selector and
/// returns a [`ContextResult`].
///
/// CLI argument parsing and textual rendering are external collaborators
/// (§1) — this type has no knowledge of either.
pub struct ContextBuilder {
    embedding_backend: Option<Arc<dyn EmbeddingBackend>>,
    completion_backend: Option<Arc<dyn CompletionBackend>>,
    cache: EmbeddingCache,
}

impl ContextBuilder {
    pub fn new(cache: EmbeddingCache) -> Self {
        Self {
            embedding_backend: None,
            completion_backend: None,
            cache,
        }
    }

    pub fn with_embedding_backend(mut self, backend: Arc<dyn EmbeddingBackend>) -> Self {
        self.embedding_backend = Some(backend);
        self
    }

    pub fn with_completion_backend(mut self, backend: Arc<dyn CompletionBackend>) -> Self {
        self.completion_backend = Some(backend);
        self
    }

    pub async fn build(
        &self,
        root: &str,
        query: &str,
        config: &RetrievalConfig,
    ) -> Result<ContextResult, RetrievalError> {
        let start = Instant::now();
        info!(root, query, budget = config.budget, "pipeline: starting");

        let (items, scan_stats) =
            scan_root(root, &config.include, &config.exclude, config.force_large).await?;
        info!(files = items.len(), "pipeline: scan complete");

        let chunks: Vec<Chunk> = items.iter().flat_map(chunk_file).collect();
        info!(chunks = chunks.len(), "pipeline: chunking complete");

        let graph = analyze(&items);
        debug!(nodes = graph.node_count(), "pipeline: dependency graph built");

        let importance: Vec<f32> = chunks.iter().map(|c| composite_importance(c.path(), &graph)).collect();

        let effective_query = if config.use_hyde && self.completion_backend.is_some() {
            let backend = self.completion_backend.as_ref().unwrap();
            expand_query(query, backend.as_ref()).await
        } else {
            query.to_string()
        };

        let lexical = lexical_score(&effective_query, &chunks);

        let semantic = if config.use_hybrid_ranking {
            match &self.embedding_backend {
                Some(backend) => semantic_score(&effective_query, &chunks, backend.as_ref(), &self.cache).await,
                None => None,
            }
        } else {
            None
        };

        let combined = combine(
            chunks,
            &lexical,
            semantic.as_deref(),
            &importance,
            &config.weights,
            config.doc_penalty,
        );
        info!(scored = combined.len(), "pipeline: hybrid combine complete");

        let combined = if config.use_smart_rerank {
            match &self.completion_backend {
                Some(backend) => rerank(&effective_query, combined, backend.as_ref()).await,
                None => combined,
            }
        } else {
            combined
        };

        let selection = select(
            combined,
            config.budget,
            config.primary_pass_reserve,
            config.follow_imports,
            config.import_depth,
            &graph,
        );

        let files_included = selection
            .chunks
            .iter()
            .map(|c| c.chunk().path())
            .collect::<std::collections::HashSet<_>>()
            .len();

        info!(
            included = selection.chunks.len(),
            tokens = selection.total_tokens,
            elapsed_ms = start.elapsed().as_millis(),
            "pipeline: selection complete"
        );

        Ok(ContextResult::new(
            query.to_string(),
            selection.chunks,
            selection.total_tokens,
            config.budget,
            items.len(),
            files_included,
            selection.expanded_file_count,
            scan_stats,
        ))
    }
}
