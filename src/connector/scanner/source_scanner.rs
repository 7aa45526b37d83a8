use std::path::{Path, PathBuf};

use futures_util::stream::{self, StreamExt};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use tracing::{debug, info, warn};

use crate::connector::scanner::ignore_rules::{
    is_ignored_dir, is_ignored_file, is_binary_extension, MAX_FILE_BYTES, MAX_FILE_LINES,
    READ_CONCURRENCY,
};
use crate::domain::{Language, RetrievalError, ScanStats, SourceItem};

const CUSTOM_IGNORE_FILENAME: &str = ".codectxignore";

enum Rejection {
    IgnoredDir,
    IgnoredFile,
    Binary,
    Oversized,
    Glob,
}

/// Enumerates the regular files under `root`, applies §4.1's filters, and
/// reads the survivors concurrently (bounded to [`READ_CONCURRENCY`]).
///
/// `path_prefix` is prepended to every returned path (used for remote roots,
/// which are globally-prefixed with `owner/repo/`, per §4.1).
pub async fn scan(
    root: &Path,
    path_prefix: Option<&str>,
    include: &[String],
    exclude: &[String],
    force_large: bool,
) -> Result<(Vec<SourceItem>, ScanStats), RetrievalError> {
    let overrides = build_overrides(root, include, exclude)?;

    let mut walker = WalkBuilder::new(root);
    walker
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .add_custom_ignore_filename(CUSTOM_IGNORE_FILENAME)
        .overrides(overrides);

    let mut stats = ScanStats::default();
    let mut candidates: Vec<PathBuf> = Vec::new();

    for entry in walker.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!(error = %err, "walk entry error");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }

        match classify(root, path, force_large) {
            Ok(()) => candidates.push(path.to_path_buf()),
            Err(Rejection::IgnoredDir) => stats.files_skipped_ignored_dir += 1,
            Err(Rejection::IgnoredFile) => stats.files_skipped_ignored_file += 1,
            Err(Rejection::Binary) => stats.files_skipped_binary += 1,
            Err(Rejection::Oversized) => stats.files_skipped_oversized += 1,
            Err(Rejection::Glob) => stats.files_skipped_glob += 1,
        }
    }

    info!(candidates = candidates.len(), "scan: candidate files enumerated");

    let prefix = path_prefix.map(|p| p.trim_end_matches('/').to_string());
    let items: Vec<SourceItem> = stream::iter(candidates)
        .map(|path| {
            let root = root.to_path_buf();
            let prefix = prefix.clone();
            async move { read_item(&root, &path, prefix.as_deref(), force_large).await }
        })
        .buffer_unordered(READ_CONCURRENCY)
        .filter_map(|result| async move {
            match result {
                Ok(item) => Some(item),
                Err(()) => None,
            }
        })
        .collect()
        .await;

    stats.files_scanned = items.len();
    Ok((items, stats))
}

fn build_overrides(
    root: &Path,
    include: &[String],
    exclude: &[String],
) -> Result<ignore::overrides::Override, RetrievalError> {
    if include.is_empty() && exclude.is_empty() {
        return Ok(OverrideBuilder::new(root)
            .build()
            .map_err(|e| RetrievalError::internal(format!("building overrides: {e}")))?);
    }

    let mut builder = OverrideBuilder::new(root);
    for pattern in include {
        builder
            .add(pattern)
            .map_err(|e| RetrievalError::invalid_input(format!("bad include glob {pattern:?}: {e}")))?;
    }
    for pattern in exclude {
        let negated = format!("!{pattern}");
        builder
            .add(&negated)
            .map_err(|e| RetrievalError::invalid_input(format!("bad exclude glob {pattern:?}: {e}")))?;
    }
    builder
        .build()
        .map_err(|e| RetrievalError::internal(format!("building overrides: {e}")))
}

fn classify(root: &Path, path: &Path, force_large: bool) -> Result<(), Rejection> {
    let rel = path.strip_prefix(root).unwrap_or(path);
    for component in rel.parent().into_iter().flat_map(|p| p.components()) {
        if let std::path::Component::Normal(name) = component {
            if is_ignored_dir(&name.to_string_lossy()) {
                return Err(Rejection::IgnoredDir);
            }
        }
    }

    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if is_ignored_file(&basename) {
        return Err(Rejection::IgnoredFile);
    }

    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if is_binary_extension(ext) {
            return Err(Rejection::Binary);
        }
    }

    if !force_large {
        if let Ok(meta) = std::fs::metadata(path) {
            if meta.len() > MAX_FILE_BYTES {
                return Err(Rejection::Oversized);
            }
        }
    }

    Ok(())
}

async fn read_item(
    root: &Path,
    path: &Path,
    prefix: Option<&str>,
    force_large: bool,
) -> Result<SourceItem, ()> {
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "dropping unreadable file");
            return Err(());
        }
    };

    let content = String::from_utf8_lossy(&bytes).into_owned();
    if !force_large && content.lines().count() > MAX_FILE_LINES {
        return Err(());
    }

    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut normalized = rel.to_string_lossy().replace('\\', "/");
    if let Some(prefix) = prefix {
        normalized = format!("{prefix}/{normalized}");
    }

    let language = Language::from_path(path);
    Ok(SourceItem::new(normalized, content, language))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn scans_plain_files_and_skips_ignored_dirs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.py"), "import os\n").unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/lib.js"), "module.exports = {}").unwrap();

        let (items, stats) = scan(dir.path(), None, &[], &[], false).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path(), "main.py");
        assert_eq!(stats.files_scanned, 1);
    }

    #[tokio::test]
    async fn applies_path_prefix_for_remote_roots() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lib.rs"), "fn main() {}").unwrap();

        let (items, _) = scan(dir.path(), Some("acme/tool"), &[], &[], false)
            .await
            .unwrap();
        assert_eq!(items[0].path(), "acme/tool/lib.rs");
    }

    #[tokio::test]
    async fn skips_binary_extensions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), [0u8, 1, 2]).unwrap();
        fs::write(dir.path().join("main.go"), "package main").unwrap();

        let (items, stats) = scan(dir.path(), None, &[], &[], false).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(stats.files_skipped_binary, 1);
    }

    #[tokio::test]
    async fn force_large_bypasses_the_line_count_cap() {
        let dir = tempdir().unwrap();
        let big = "x\n".repeat(MAX_FILE_LINES + 1);
        fs::write(dir.path().join("huge.py"), &big).unwrap();

        let (items, _) = scan(dir.path(), None, &[], &[], false).await.unwrap();
        assert!(items.is_empty());

        let (items, _) = scan(dir.path(), None, &[], &[], true).await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn exclude_glob_filters_out_matches() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("keep.rs"), "fn keep() {}").unwrap();
        fs::write(dir.path().join("skip_test.rs"), "fn skip() {}").unwrap();

        let (items, _) = scan(dir.path(), None, &[], &["skip_*.rs".to_string()], false)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path(), "keep.rs");
    }
}
