use thiserror::Error;

/// Error taxonomy for the retrieval pipeline.
///
/// Only [`RetrievalError::InvalidInput`] and [`RetrievalError::RemoteFetch`] are ever
/// returned to a caller. Every other variant is constructed at the point of failure,
/// logged, and absorbed so the pipeline degrades instead of aborting.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("remote fetch failed: {0}")]
    RemoteFetch(String),

    #[error("remote refresh failed: {0}")]
    RemoteRefresh(String),

    #[error("file read failed: {0}")]
    FileRead(String),

    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RetrievalError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn remote_fetch(msg: impl Into<String>) -> Self {
        Self::RemoteFetch(msg.into())
    }

    pub fn remote_refresh(msg: impl Into<String>) -> Self {
        Self::RemoteRefresh(msg.into())
    }

    pub fn file_read(msg: impl Into<String>) -> Self {
        Self::FileRead(msg.into())
    }

    pub fn backend_unavailable(msg: impl Into<String>) -> Self {
        Self::BackendUnavailable(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this kind is ever allowed to abort the pipeline (§7 top-level contract).
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::RemoteFetch(_))
    }
}
