use serde::{Deserialize, Serialize};

use super::Chunk;

/// A [`Chunk`] paired with a score. Scores are comparable only within one
/// pipeline invocation — they are normalized to that invocation's maximum (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    chunk: Chunk,
    score: f32,
}

impl ScoredChunk {
    pub fn new(chunk: Chunk, score: f32) -> Self {
        Self { chunk, score }
    }

    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    pub fn into_chunk(self) -> Chunk {
        self.chunk
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }
}

/// Sorts descending by score with a stable sort, so ties keep their input
/// order (§5's ordering guarantee). Then, if any score was positive,
/// renormalizes so the top score is exactly 1.0 (§8's normalization invariant).
pub fn sort_and_normalize(mut chunks: Vec<ScoredChunk>) -> Vec<ScoredChunk> {
    chunks.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    let top = chunks.first().map(|c| c.score).unwrap_or(0.0);
    if top > 0.0 {
        for c in &mut chunks {
            c.score /= top;
        }
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChunkType, Language};

    fn chunk(path: &str) -> Chunk {
        Chunk::new(
            path.to_string(),
            "x".to_string(),
            1,
            1,
            ChunkType::File,
            None,
            Language::Python,
        )
    }

    #[test]
    fn normalization_scales_to_one() {
        let scored = vec![
            ScoredChunk::new(chunk("a.py"), 0.5),
            ScoredChunk::new(chunk("b.py"), 0.25),
        ];
        let out = sort_and_normalize(scored);
        assert!((out[0].score() - 1.0).abs() < 1e-6);
        assert!((out[1].score() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn all_zero_scores_preserve_order() {
        let scored = vec![
            ScoredChunk::new(chunk("a.py"), 0.0),
            ScoredChunk::new(chunk("b.py"), 0.0),
        ];
        let out = sort_and_normalize(scored);
        assert_eq!(out[0].chunk().path(), "a.py");
        assert_eq!(out[1].chunk().path(), "b.py");
    }
}
