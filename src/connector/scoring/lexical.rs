use std::collections::{HashMap, HashSet};

use crate::connector::scoring::tokenizer::tokenize;
use crate::domain::{Chunk, ScoredChunk};

const K1: f32 = 1.5;
const B: f32 = 0.75;
const PATH_BOOST: f32 = 2.0;
const NAME_BOOST: f32 = 3.0;

/// Scores `chunks` against `query` with a BM25-like formula plus path/name
/// boosts (§4.5), returning unsorted, unnormalized scores aligned with input
/// order — callers are expected to feed this through
/// [`sort_and_normalize`](crate::domain::sort_and_normalize).
pub fn score(query: &str, chunks: &[Chunk]) -> Vec<f32> {
    let query_tokens: HashSet<String> = tokenize(query).into_iter().collect();
    if query_tokens.is_empty() {
        return vec![0.0; chunks.len()];
    }

    let docs: Vec<Vec<String>> = chunks.iter().map(|c| tokenize(c.content())).collect();
    let n = docs.len() as f32;
    let avg_len = if docs.is_empty() {
        0.0
    } else {
        docs.iter().map(|d| d.len()).sum::<usize>() as f32 / n
    };

    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for token in &query_tokens {
        let df = docs
            .iter()
            .filter(|doc| doc.iter().any(|t| t == token))
            .count();
        doc_freq.insert(token.as_str(), df);
    }

    chunks
        .iter()
        .zip(docs.iter())
        .map(|(chunk, doc)| {
            let bm25 = bm25_score(&query_tokens, doc, &doc_freq, n, avg_len);
            let path_tokens: HashSet<String> = tokenize(chunk.path()).into_iter().collect();
            let name_tokens: HashSet<String> = chunk
                .name()
                .map(|n| tokenize(n).into_iter().collect())
                .unwrap_or_default();

            let path_overlap = query_tokens.intersection(&path_tokens).count() as f32;
            let name_overlap = query_tokens.intersection(&name_tokens).count() as f32;

            bm25 + PATH_BOOST * path_overlap + NAME_BOOST * name_overlap
        })
        .collect()
}

/// Scores and wraps chunks into [`ScoredChunk`]s, preserving input order
/// (normalization is the caller's responsibility — see [`score`]).
pub fn rank(query: &str, chunks: Vec<Chunk>) -> Vec<ScoredChunk> {
    let scores = score(query, &chunks);
    chunks
        .into_iter()
        .zip(scores)
        .map(|(chunk, s)| ScoredChunk::new(chunk, s))
        .collect()
}

fn bm25_score(
    query_tokens: &HashSet<String>,
    doc: &[String],
    doc_freq: &HashMap<&str, usize>,
    n: f32,
    avg_len: f32,
) -> f32 {
    let doc_len = doc.len() as f32;
    let mut term_freq: HashMap<&str, usize> = HashMap::new();
    for token in doc {
        *term_freq.entry(token.as_str()).or_insert(0) += 1;
    }

    let mut total = 0.0;
    for token in query_tokens {
        let tf = *term_freq.get(token.as_str()).unwrap_or(&0) as f32;
        if tf == 0.0 {
            continue;
        }
        let df = *doc_freq.get(token.as_str()).unwrap_or(&0) as f32;
        let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
        let denom = tf + K1 * (1.0 - B + B * doc_len / avg_len.max(1.0));
        total += idf * (tf * (K1 + 1.0)) / denom;
    }
    total
}
