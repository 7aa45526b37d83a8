mod git_fetch;
mod github_url;
mod ignore_rules;
mod source_scanner;

pub use git_fetch::{materialize, repo_cache_dir};
pub use github_url::{looks_like_url, parse_repo_url, RepoUrl};
pub use source_scanner::scan;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{RetrievalError, ScanStats, SourceItem};

const CACHE_APP_NAME: &str = "codectx";

/// Resolves `root` (a local path or a hosting URL) to a directory to scan,
/// materializing a remote clone first if needed (§4.1).
pub async fn resolve_root(root: &str) -> Result<(PathBuf, Option<String>), RetrievalError> {
    if looks_like_url(root) {
        let repo = parse_repo_url(root)?;
        let cache_dir = repo_cache_dir(CACHE_APP_NAME, &repo)?;
        let scan_root = materialize(&repo, &cache_dir).await?;
        Ok((scan_root, Some(repo.cache_key())))
    } else {
        let path = Path::new(root);
        if !path.exists() {
            return Err(RetrievalError::invalid_input(format!(
                "path does not exist: {root}"
            )));
        }
        Ok((path.to_path_buf(), None))
    }
}

/// Runs the full Source Scanner stage: resolves `root`, then walks and reads
/// the corpus under it.
pub async fn scan_root(
    root: &str,
    include: &[String],
    exclude: &[String],
    force_large: bool,
) -> Result<(Vec<SourceItem>, ScanStats), RetrievalError> {
    let (scan_root, prefix) = resolve_root(root).await?;
    info!(root = %scan_root.display(), "scan: resolved root");
    scan(&scan_root, prefix.as_deref(), include, exclude, force_large).await
}
