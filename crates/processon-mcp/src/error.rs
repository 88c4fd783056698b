#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Unexpected response: {0}")]
    Protocol(String),

    #[error("Request failed: {0}")]
    Transport(String),
}

impl From<processon_core::MindMapError> for Error {
    fn from(e: processon_core::MindMapError) -> Self {
        use processon_core::MindMapError;

        match e {
            MindMapError::Input(msg) => Error::Input(msg),
            MindMapError::Protocol(msg) => Error::Protocol(msg),
            MindMapError::Encoding(msg) => Error::Protocol(msg),
        }
    }
}
