use tracing::{debug, warn};

use crate::application::CompletionBackend;

const HYPO_TRUNCATE: usize = 1000;

/// Expands `query` into a hypothetical-document-augmented query (§4.6): asks
/// the completion backend for a hypothetical code/doc snippet that would
/// answer the query, then appends it. Any failure silently reverts to the raw
/// query — HyDE is never load-bearing (§9).
pub async fn expand_query(query: &str, backend: &dyn CompletionBackend) -> String {
    let prompt = format!(
        "Write a short hypothetical code snippet or docstring that would appear in a \
         codebase and directly answers this query. Return only the snippet.\n\nQuery: {query}"
    );

    match backend.generate_text(&prompt).await {
        Ok(hypo) => {
            let truncated = truncate(&hypo, HYPO_TRUNCATE);
            debug!(chars = truncated.chars().count(), "HyDE expansion produced");
            format!("{query}\n---\n{truncated}")
        }
        Err(err) => {
            warn!(error = %err, "HyDE generation failed, using raw query");
            query.to_string()
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::adapter::mock_completion::MockCompletionBackend;
    use async_trait::async_trait;
    use crate::domain::RetrievalError;

    struct FailingBackend;

    #[async_trait]
    impl CompletionBackend for FailingBackend {
        async fn generate_text(&self, _prompt: &str) -> Result<String, RetrievalError> {
            Err(RetrievalError::backend_unavailable("down"))
        }
    }

    #[tokio::test]
    async fn appends_hypothetical_snippet_on_success() {
        let backend = MockCompletionBackend::new();
        let expanded = expand_query("parse url", &backend).await;
        assert!(expanded.starts_with("parse url\n---\n"));
    }

    #[tokio::test]
    async fn falls_back_to_raw_query_on_failure() {
        let expanded = expand_query("parse url", &FailingBackend).await;
        assert_eq!(expanded, "parse url");
    }
}
