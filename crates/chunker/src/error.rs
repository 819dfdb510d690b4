use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur while chunking a book
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// The input text was empty (or whitespace only)
    #[error("empty input text")]
    EmptyText,

    /// The chunk policy failed validation
    #[error("invalid chunk policy: {0}")]
    InvalidPolicy(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChunkerError {
    /// Create an invalid policy error
    pub fn invalid_policy(msg: impl Into<String>) -> Self {
        Self::InvalidPolicy(msg.into())
    }
}
