pub mod embedding_cache;
mod http_completion;
mod http_embedding;
pub mod mock_completion;
pub mod mock_embedding;

pub use embedding_cache::EmbeddingCache;
pub use http_completion::HttpCompletionBackend;
pub use http_embedding::{GoogleEmbeddingBackend, OpenAiEmbeddingBackend};
pub use mock_completion::MockCompletionBackend;
pub use mock_embedding::MockEmbeddingBackend;
