use std::collections::HashMap;
use std::path::PathBuf;

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::{debug, warn};

const CACHE_APP_NAME: &str = "codectx";
const KEY_HEX_LEN: usize = 16;

/// Content-addressed embedding cache (§4.6): SHA-256 (first 16 hex chars) of
/// the text keys a JSON-array file under `~/.cache/<app>/embeddings/`,
/// mirrored in an in-process memoization table for the lifetime of one
/// pipeline invocation.
///
/// Writes are best-effort; read failures are treated as a cache miss, never
/// as an error (§4.6, §5's single-reader/single-writer-per-invocation model).
pub struct EmbeddingCache {
    dir: PathBuf,
    memo: Mutex<HashMap<String, Vec<f32>>>,
}

impl EmbeddingCache {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves the default `~/.cache/<app>/embeddings/` directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|base| base.join(CACHE_APP_NAME).join("embeddings"))
    }

    fn key_for(text: &str) -> String {
        let digest = Sha256::digest(text.as_bytes());
        format!("{digest:x}")[..KEY_HEX_LEN].to_string()
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub async fn get(&self, text: &str) -> Option<Vec<f32>> {
        let key = Self::key_for(text);

        if let Some(vector) = self.memo.lock().await.get(&key).cloned() {
            return Some(vector);
        }

        let path = self.path_for(&key);
        let bytes = tokio::fs::read(&path).await.ok()?;
        match serde_json::from_slice::<Vec<f32>>(&bytes) {
            Ok(vector) => {
                self.memo.lock().await.insert(key, vector.clone());
                Some(vector)
            }
            Err(err) => {
                debug!(error = %err, path = %path.display(), "cache entry unreadable, treating as miss");
                None
            }
        }
    }

    pub async fn put(&self, text: &str, vector: &[f32]) {
        let key = Self::key_for(text);
        self.memo.lock().await.insert(key.clone(), vector.to_vec());

        if let Err(err) = self.write_through(&key, vector).await {
            warn!(error = %err, "embedding cache write failed, continuing with in-memory copy only");
        }
    }

    async fn write_through(&self, key: &str, vector: &[f32]) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec(vector).unwrap_or_default();
        tokio::fs::write(self.path_for(key), bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let cache = EmbeddingCache::new(dir.path().to_path_buf());

        assert!(cache.get("hello").await.is_none());
        cache.put("hello", &[1.0, 2.0, 3.0]).await;

        let fresh = EmbeddingCache::new(dir.path().to_path_buf());
        let vector = fresh.get("hello").await.unwrap();
        assert_eq!(vector, vec![1.0, 2.0, 3.0]);
    }

    #[tokio::test]
    async fn memoizes_without_touching_disk_twice() {
        let dir = tempdir().unwrap();
        let cache = EmbeddingCache::new(dir.path().to_path_buf());
        cache.put("hello", &[1.0]).await;

        // Removing the backing directory must not affect the in-process hit.
        tokio::fs::remove_dir_all(dir.path()).await.unwrap();
        assert_eq!(cache.get("hello").await, Some(vec![1.0]));
    }

    #[test]
    fn keys_are_16_hex_chars() {
        let key = EmbeddingCache::key_for("some content");
        assert_eq!(key.len(), 16);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
