use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConversationError>;

/// Errors that can occur during conversation management.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("LLM provider error: {0}")]
    Provider(#[from] anyhow::Error),

    #[error("Empty response from LLM")]
    EmptyResponse,

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),

    #[error("Invalid export timestamp: {0}")]
    Timestamp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
