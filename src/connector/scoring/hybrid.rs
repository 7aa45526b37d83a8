use crate::domain::{sort_and_normalize, Chunk, HybridWeights, ScoredChunk};

/// Blends lexical, semantic, and importance scores per §4.7. `semantic` is
/// `None` when embeddings were unavailable, in which case the lexical and
/// embedding weights merge onto the lexical signal alone.
///
/// Applies the documentation penalty before the final sort/normalize.
pub fn combine(
    chunks: Vec<Chunk>,
    lexical: &[f32],
    semantic: Option<&[f32]>,
    importance: &[f32],
    weights: &HybridWeights,
    doc_penalty: f32,
) -> Vec<ScoredChunk> {
    let scored: Vec<ScoredChunk> = chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let kw = lexical[i];
            let imp = importance[i];
            let mut final_score = match semantic {
                Some(emb) => weights.keyword * kw + weights.embedding * emb[i] + weights.importance * imp,
                None => (weights.keyword + weights.embedding) * kw + weights.importance * imp,
            };

            if chunk.is_documentation() {
                final_score *= doc_penalty;
            }

            ScoredChunk::new(chunk, final_score)
        })
        .collect();

    sort_and_normalize(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChunkType, Language};

    fn chunk(path: &str) -> Chunk {
        Chunk::new(path.to_string(), "x".to_string(), 1, 1, ChunkType::File, None, Language::Python)
    }

    #[test]
    fn blends_all_three_signals_when_semantic_present() {
        let chunks = vec![chunk("a.py")];
        let weights = HybridWeights::default();
        let out = combine(chunks, &[1.0], Some(&[1.0]), &[1.0], &weights, 0.6);
        assert!((out[0].score() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn merges_embedding_weight_onto_lexical_without_semantic() {
        let chunks = vec![chunk("a.py"), chunk("b.py")];
        let weights = HybridWeights::default();
        let out = combine(chunks, &[1.0, 0.0], None, &[0.0, 0.0], &weights, 0.6);
        assert_eq!(out[0].chunk().path(), "a.py");
        assert!(out[0].score() > out[1].score());
    }

    #[test]
    fn documentation_penalty_can_demote_a_leading_chunk() {
        let mut doc = chunk("docs/intro.md");
        doc = Chunk::new(
            doc.path().to_string(),
            doc.content().to_string(),
            1,
            1,
            ChunkType::File,
            None,
            Language::Markdown,
        );
        let code = chunk("src/lib.py");
        let weights = HybridWeights::default();

        // lexical-only doc score 0.9 vs code 0.65, per the scenario in §8.
        let out = combine(vec![doc, code], &[0.9, 0.65], None, &[0.0, 0.0], &weights, 0.6);
        assert_eq!(out[0].chunk().path(), "src/lib.py");
    }
}
