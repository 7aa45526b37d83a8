use crate::domain::RetrievalError;

/// A parsed hosting URL of the form `<host>/<owner>/<repo>[/(tree|blob)/<ref>/<subpath>]` (§4.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub git_ref: Option<String>,
    pub subpath: Option<String>,
}

impl RepoUrl {
    /// The key used for the repo cache directory and the globally-unique path
    /// prefix applied to scanned items (§4.1).
    pub fn cache_key(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn clone_url(&self) -> String {
        format!("https://{}/{}/{}.git", self.host, self.owner, self.repo)
    }
}

/// Parses a `https?://` hosting URL. Trailing `/` and `.git` are tolerated.
/// Returns `InvalidInput` for anything that isn't `<host>/<owner>/<repo>[...]`.
pub fn parse_repo_url(url: &str) -> Result<RepoUrl, RetrievalError> {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| RetrievalError::invalid_input(format!("not a hosting URL: {url}")))?;

    let without_scheme = without_scheme.trim_end_matches('/');
    let mut segments = without_scheme.split('/');

    let host = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RetrievalError::invalid_input("missing host"))?
        .to_string();
    let owner = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RetrievalError::invalid_input("missing owner"))?
        .to_string();
    let repo_raw = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RetrievalError::invalid_input("missing repo"))?;
    let repo = repo_raw.trim_end_matches(".git").to_string();
    if repo.is_empty() {
        return Err(RetrievalError::invalid_input("empty repo name"));
    }

    let rest: Vec<&str> = segments.collect();
    let (git_ref, subpath) = match rest.as_slice() {
        [] => (None, None),
        [kind, r, tail @ ..] if *kind == "tree" || *kind == "blob" => {
            let subpath = if tail.is_empty() {
                None
            } else {
                Some(tail.join("/"))
            };
            (Some(r.to_string()), subpath)
        }
        _ => (None, None),
    };

    Ok(RepoUrl {
        host,
        owner,
        repo,
        git_ref,
        subpath,
    })
}

/// Whether `path` looks like a hosting URL rather than a local filesystem path.
pub fn looks_like_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_repo() {
        let parsed = parse_repo_url("https://github.com/acme/tool").unwrap();
        assert_eq!(parsed.host, "github.com");
        assert_eq!(parsed.owner, "acme");
        assert_eq!(parsed.repo, "tool");
        assert_eq!(parsed.git_ref, None);
        assert_eq!(parsed.subpath, None);
    }

    #[test]
    fn parses_tree_with_subpath() {
        let parsed = parse_repo_url("https://github.com/acme/tool/tree/main/src/core").unwrap();
        assert_eq!(parsed.owner, "acme");
        assert_eq!(parsed.repo, "tool");
        assert_eq!(parsed.git_ref.as_deref(), Some("main"));
        assert_eq!(parsed.subpath.as_deref(), Some("src/core"));
    }

    #[test]
    fn tolerates_trailing_slash_and_dot_git() {
        let parsed = parse_repo_url("https://github.com/acme/tool.git/").unwrap();
        assert_eq!(parsed.repo, "tool");
    }

    #[test]
    fn rejects_non_url() {
        assert!(parse_repo_url("/local/path").is_err());
    }

    #[test]
    fn rejects_missing_repo() {
        assert!(parse_repo_url("https://github.com/acme").is_err());
    }

    #[test]
    fn cache_key_is_owner_slash_repo() {
        let parsed = parse_repo_url("https://github.com/acme/tool").unwrap();
        assert_eq!(parsed.cache_key(), "acme/tool");
    }
}
