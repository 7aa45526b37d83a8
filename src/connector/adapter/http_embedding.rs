use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::EmbeddingBackend;
use crate::domain::RetrievalError;

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const OPENAI_EMBEDDINGS_PATH: &str = "/v1/embeddings";
const OPENAI_DEFAULT_MODEL: &str = "text-embedding-3-small";
const OPENAI_DIMENSIONS: usize = 1536;

const GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const GOOGLE_DEFAULT_MODEL: &str = "text-embedding-004";
const GOOGLE_DIMENSIONS: usize = 768;

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiEmbedding>,
}

#[derive(Deserialize)]
struct OpenAiEmbedding {
    embedding: Vec<f32>,
}

/// [`EmbeddingBackend`] for OpenAI's `/v1/embeddings` endpoint (§6's
/// `OPENAI_API_KEY` provider). Construction never fails; a missing or invalid
/// key simply surfaces as a `BackendUnavailable` on the first call.
pub struct OpenAiEmbeddingBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiEmbeddingBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: OPENAI_DEFAULT_MODEL.to_string(),
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn from_env() -> Option<Self> {
        std::env::var("OPENAI_API_KEY").ok().map(Self::new)
    }
}

#[async_trait]
impl EmbeddingBackend for OpenAiEmbeddingBackend {
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), OPENAI_EMBEDDINGS_PATH);
        let request = OpenAiRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RetrievalError::backend_unavailable(format!("openai request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::backend_unavailable(format!(
                "openai returned {status}: {body}"
            )));
        }

        let parsed: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::backend_unavailable(format!("bad openai response: {e}")))?;

        debug!(count = parsed.data.len(), "openai embeddings received");
        Ok(parsed.data.into_iter().map(|e| e.embedding).collect())
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        OPENAI_DIMENSIONS
    }
}

#[derive(Serialize)]
struct GoogleBatchRequest<'a> {
    requests: Vec<GoogleSingleRequest<'a>>,
}

#[derive(Serialize)]
struct GoogleSingleRequest<'a> {
    model: String,
    content: GoogleContent<'a>,
}

#[derive(Serialize)]
struct GoogleContent<'a> {
    parts: Vec<GooglePart<'a>>,
}

#[derive(Serialize)]
struct GooglePart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GoogleBatchResponse {
    embeddings: Vec<GoogleEmbedding>,
}

#[derive(Deserialize)]
struct GoogleEmbedding {
    values: Vec<f32>,
}

/// [`EmbeddingBackend`] for Google's Generative Language embedding endpoint
/// (§6's `GOOGLE_API_KEY` provider).
pub struct GoogleEmbeddingBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GoogleEmbeddingBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: GOOGLE_DEFAULT_MODEL.to_string(),
            base_url: GOOGLE_BASE_URL.to_string(),
        }
    }

    pub fn from_env() -> Option<Self> {
        std::env::var("GOOGLE_API_KEY").ok().map(Self::new)
    }
}

#[async_trait]
impl EmbeddingBackend for GoogleEmbeddingBackend {
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        let url = format!(
            "{}/v1beta/models/{}:batchEmbedContents?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        );

        let requests = texts
            .iter()
            .map(|t| GoogleSingleRequest {
                model: format!("models/{}", self.model),
                content: GoogleContent {
                    parts: vec![GooglePart { text: t }],
                },
            })
            .collect();

        let response = self
            .client
            .post(&url)
            .json(&GoogleBatchRequest { requests })
            .send()
            .await
            .map_err(|e| RetrievalError::backend_unavailable(format!("google request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::backend_unavailable(format!(
                "google returned {status}: {body}"
            )));
        }

        let parsed: GoogleBatchResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::backend_unavailable(format!("bad google response: {e}")))?;

        Ok(parsed.embeddings.into_iter().map(|e| e.values).collect())
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        GOOGLE_DIMENSIONS
    }
}
