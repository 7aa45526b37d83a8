use serde::{Deserialize, Serialize};

use super::ScoredChunk;

/// Per-exclusion-reason scan counters (§10.6), supplementing but not replacing
/// [`ContextResult`]'s documented fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_skipped_ignored_dir: usize,
    pub files_skipped_ignored_file: usize,
    pub files_skipped_binary: usize,
    pub files_skipped_oversized: usize,
    pub files_skipped_glob: usize,
    pub files_skipped_unreadable: usize,
}

/// The pipeline's output (§3): the query, an ordered list of scored chunks
/// (descending score), the approximate total token count, the requested
/// budget, scan/selection counts, and how many additional files graph
/// expansion pulled in. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextResult {
    query: String,
    chunks: Vec<ScoredChunk>,
    total_tokens: usize,
    budget: usize,
    files_scanned: usize,
    files_included: usize,
    expanded_file_count: usize,
    scan_stats: ScanStats,
}

impl ContextResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        query: String,
        chunks: Vec<ScoredChunk>,
        total_tokens: usize,
        budget: usize,
        files_scanned: usize,
        files_included: usize,
        expanded_file_count: usize,
        scan_stats: ScanStats,
    ) -> Self {
        Self {
            query,
            chunks,
            total_tokens,
            budget,
            files_scanned,
            files_included,
            expanded_file_count,
            scan_stats,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn chunks(&self) -> &[ScoredChunk] {
        &self.chunks
    }

    pub fn total_tokens(&self) -> usize {
        self.total_tokens
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    pub fn files_included(&self) -> usize {
        self.files_included
    }

    pub fn expanded_file_count(&self) -> usize {
        self.expanded_file_count
    }

    pub fn scan_stats(&self) -> &ScanStats {
        &self.scan_stats
    }
}
