use std::collections::HashSet;

use crate::connector::scoring::tokenizer::count_tokens;
use crate::domain::{DependencyGraph, ScoredChunk};

/// Result of the Budgeted Selector (§4.8): the final selection (re-sorted by
/// score descending) plus the accounting the caller needs to build a
/// [`ContextResult`](crate::domain::ContextResult).
pub struct Selection {
    pub chunks: Vec<ScoredChunk>,
    pub total_tokens: usize,
    pub expanded_file_count: usize,
}

/// Greedy two-pass budgeted selection (§4.8).
///
/// `chunks` must already be sorted descending by score (the Hybrid
/// Combiner's output). `reserve_fraction` is the configurable primary-pass
/// threshold (default 0.7, §9).
pub fn select(
    chunks: Vec<ScoredChunk>,
    budget: usize,
    reserve_fraction: f32,
    follow_imports: bool,
    import_depth: usize,
    graph: &DependencyGraph,
) -> Selection {
    if budget == 0 {
        return Selection {
            chunks: Vec::new(),
            total_tokens: 0,
            expanded_file_count: 0,
        };
    }

    let primary_budget = (budget as f32 * reserve_fraction) as usize;

    let mut primary = Vec::new();
    let mut cumulative = 0usize;
    let mut included_paths: HashSet<String> = HashSet::new();

    for scored in &chunks {
        let tokens = count_tokens(scored.chunk().content());
        if cumulative + tokens > primary_budget {
            continue;
        }
        cumulative += tokens;
        included_paths.insert(scored.chunk().path().to_string());
        primary.push(scored.clone());
    }

    let mut expanded_paths: HashSet<String> = HashSet::new();
    if follow_imports {
        let related = graph.related(&included_paths, import_depth);
        for scored in &chunks {
            let path = scored.chunk().path();
            if !related.contains(path) || included_paths.contains(path) {
                continue;
            }
            let tokens = count_tokens(scored.chunk().content());
            if cumulative + tokens > budget {
                continue;
            }
            cumulative += tokens;
            included_paths.insert(path.to_string());
            expanded_paths.insert(path.to_string());
            primary.push(scored.clone());
        }
    }

    primary.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(std::cmp::Ordering::Equal));

    Selection {
        chunks: primary,
        total_tokens: cumulative,
        expanded_file_count: expanded_paths.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Chunk, ChunkType, Language};

    fn chunk_with_tokens(path: &str, score: f32, word_count: usize) -> ScoredChunk {
        let content = vec!["w"; word_count].join(" ");
        ScoredChunk::new(
            Chunk::new(path.to_string(), content, 1, 1, ChunkType::File, None, Language::Python),
            score,
        )
    }

    #[test]
    fn budget_zero_yields_empty_selection() {
        let chunks = vec![chunk_with_tokens("a.py", 1.0, 10)];
        let graph = DependencyGraph::new();
        let sel = select(chunks, 0, 0.7, true, 1, &graph);
        assert!(sel.chunks.is_empty());
        assert_eq!(sel.total_tokens, 0);
    }

    #[test]
    fn primary_pass_stops_at_reserve_fraction() {
        let chunks = vec![
            chunk_with_tokens("a.py", 1.0, 40),
            chunk_with_tokens("b.py", 0.9, 40),
            chunk_with_tokens("c.py", 0.8, 40),
        ];
        let graph = DependencyGraph::new();
        let sel = select(chunks, 100, 0.7, false, 1, &graph);
        assert_eq!(sel.chunks.len(), 1);
        assert_eq!(sel.total_tokens, 40);
    }

    #[test]
    fn expansion_pass_adds_related_file_within_budget() {
        let chunks = vec![
            chunk_with_tokens("a.py", 1.0, 40),
            chunk_with_tokens("b.py", 0.5, 40),
        ];
        let mut graph = DependencyGraph::new();
        graph.insert_edges("a.py", ["b.py".to_string()]);

        let sel = select(chunks, 100, 0.7, true, 1, &graph);
        let paths: Vec<_> = sel.chunks.iter().map(|c| c.chunk().path()).collect();
        assert!(paths.contains(&"b.py"));
        assert_eq!(sel.expanded_file_count, 1);
    }

    #[test]
    fn unrelated_file_is_not_pulled_in_by_expansion() {
        let chunks = vec![
            chunk_with_tokens("a.py", 1.0, 40),
            chunk_with_tokens("z.py", 0.5, 40),
        ];
        let graph = DependencyGraph::new();
        let sel = select(chunks, 100, 0.7, true, 1, &graph);
        assert_eq!(sel.chunks.len(), 1);
        assert_eq!(sel.expanded_file_count, 0);
    }

    #[test]
    fn total_tokens_never_exceeds_budget() {
        let chunks = vec![
            chunk_with_tokens("a.py", 1.0, 40),
            chunk_with_tokens("b.py", 0.9, 40),
        ];
        let mut graph = DependencyGraph::new();
        graph.insert_edges("a.py", ["b.py".to_string()]);

        let sel = select(chunks, 100, 0.7, true, 1, &graph);
        assert!(sel.total_tokens <= 100);
    }
}
