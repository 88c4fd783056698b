use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MindMapError {
    /// Empty or whitespace-only title/content.
    #[error("Invalid input: {0}")]
    Input(String),
    /// The endpoint reported success but left out a field we need.
    #[error("Unexpected response: {0}")]
    Protocol(String),
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for MindMapError {
    fn from(e: serde_json::Error) -> Self {
        MindMapError::Encoding(e.to_string())
    }
}
