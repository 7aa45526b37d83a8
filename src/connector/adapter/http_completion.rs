use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::CompletionBackend;
use crate::domain::RetrievalError;

/// Default target: a local LM Studio instance, so HyDE/rerank work with no
/// cloud account needed out of the box.
const DEFAULT_BASE_URL: &str = "http://localhost:1234";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "ministral-3b-2512";
const MAX_TOKENS: u32 = 512;

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// [`CompletionBackend`] over any Anthropic-Messages-API-compatible server
/// (§6), used for HyDE (§4.6) and optional LLM rerank (§4.9).
///
/// Before each request, a lightweight `HEAD /` probe with a 2-second timeout
/// checks reachability; an unreachable server fails fast instead of hanging
/// for the full request timeout, and the caller absorbs the resulting
/// `BackendUnavailable` per §9 (HyDE/rerank are never load-bearing).
pub struct HttpCompletionBackend {
    client: reqwest::Client,
    probe_client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
    base_url: String,
}

impl HttpCompletionBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let trimmed = base.trim_end_matches('/');
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            probe_client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(2))
                .timeout(Duration::from_secs(2))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url: format!("{trimmed}{MESSAGES_PATH}"),
            base_url: format!("{trimmed}/"),
        }
    }

    /// Constructs from environment variables, local-first (§6's `LMFETCH_MODEL`
    /// names the model; `ANTHROPIC_BASE_URL`/`ANTHROPIC_API_KEY` target a real
    /// provider when set).
    pub fn from_env() -> Self {
        let base = std::env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("LMFETCH_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let key = std::env::var("ANTHROPIC_API_KEY").unwrap_or_default();
        Self::new(key, model, base)
    }

    async fn is_reachable(&self) -> bool {
        self.probe_client.head(&self.base_url).send().await.is_ok()
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    async fn generate_text(&self, prompt: &str) -> Result<String, RetrievalError> {
        if !self.is_reachable().await {
            return Err(RetrievalError::backend_unavailable(format!(
                "completion backend unreachable at {}",
                self.base_url
            )));
        }

        let request = ApiRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| RetrievalError::backend_unavailable(format!("completion request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body, "completion backend returned an error");
            return Err(RetrievalError::backend_unavailable(format!(
                "completion backend returned {status}"
            )));
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::backend_unavailable(format!("bad completion response: {e}")))?;

        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| RetrievalError::backend_unavailable("completion response had no content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_base_plus_messages_path() {
        let backend = HttpCompletionBackend::new("", "m", "http://localhost:1234/");
        assert_eq!(backend.url, "http://localhost:1234/v1/messages");
    }
}
