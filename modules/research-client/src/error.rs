use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResearchError>;

#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Research service returned no answer text")]
    EmptyResponse,
}

impl From<reqwest::Error> for ResearchError {
    fn from(err: reqwest::Error) -> Self {
        ResearchError::Network(err.to_string())
    }
}
