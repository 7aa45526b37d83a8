use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::process::Command;
use tracing::{info, warn};

use crate::connector::scanner::github_url::RepoUrl;
use crate::domain::RetrievalError;

const REFRESH_TTL: Duration = Duration::from_secs(60 * 60);

/// `~/.cache/<app>/repos/<owner>/<repo>` (§6).
pub fn repo_cache_dir(app: &str, repo: &RepoUrl) -> Result<PathBuf, RetrievalError> {
    let base = dirs::cache_dir()
        .ok_or_else(|| RetrievalError::internal("no cache directory available on this platform"))?;
    Ok(base.join(app).join("repos").join(&repo.owner).join(&repo.repo))
}

/// Ensures a local clone of `repo` exists under `dest`, cloning or refreshing
/// as needed, and returns the directory to scan (`dest` joined with the
/// requested subpath, if any).
///
/// Clone failure is fatal (`RemoteFetch`); refresh failure on an existing
/// clone is logged and the stale copy is used (§4.1, §7).
pub async fn materialize(repo: &RepoUrl, dest: &Path) -> Result<PathBuf, RetrievalError> {
    if dest.join(".git").exists() {
        if is_stale(dest).await {
            if let Err(err) = pull(dest).await {
                warn!(repo = %repo.cache_key(), error = %err, "refresh failed, using stale clone");
            }
        }
    } else {
        clone(repo, dest).await?;
    }

    let root = match &repo.subpath {
        Some(subpath) => dest.join(subpath),
        None => dest.to_path_buf(),
    };
    Ok(root)
}

async fn is_stale(dest: &Path) -> bool {
    let head = dest.join(".git").join("HEAD");
    match tokio::fs::metadata(&head).await.and_then(|m| m.modified()) {
        Ok(modified) => SystemTime::now()
            .duration_since(modified)
            .map(|age| age > REFRESH_TTL)
            .unwrap_or(false),
        Err(_) => true,
    }
}

async fn clone(repo: &RepoUrl, dest: &Path) -> Result<(), RetrievalError> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| RetrievalError::remote_fetch(format!("creating cache dir: {e}")))?;
    }

    let mut cmd = Command::new("git");
    cmd.arg("clone")
        .arg("--depth")
        .arg("1")
        .arg("--single-branch");
    if let Some(git_ref) = &repo.git_ref {
        cmd.arg("--branch").arg(git_ref);
    }
    cmd.arg(repo.clone_url()).arg(dest);

    info!(repo = %repo.cache_key(), "cloning repository");
    let output = cmd
        .output()
        .await
        .map_err(|e| RetrievalError::remote_fetch(format!("spawning git: {e}")))?;

    if !output.status.success() {
        return Err(RetrievalError::remote_fetch(format!(
            "git clone exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        )));
    }
    Ok(())
}

async fn pull(dest: &Path) -> Result<(), RetrievalError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dest)
        .arg("pull")
        .arg("--ff-only")
        .output()
        .await
        .map_err(|e| RetrievalError::remote_refresh(format!("spawning git: {e}")))?;

    if !output.status.success() {
        return Err(RetrievalError::remote_refresh(format!(
            "git pull exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::scanner::github_url::parse_repo_url;

    #[test]
    fn cache_dir_is_keyed_by_owner_and_repo() {
        let repo = parse_repo_url("https://github.com/acme/tool").unwrap();
        let dir = repo_cache_dir("codectx", &repo).unwrap();
        assert!(dir.ends_with("codectx/repos/acme/tool"));
    }
}
