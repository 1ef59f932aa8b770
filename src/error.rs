use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortabilityError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response shape: {0}")]
    InvalidResponse(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PortabilityError>;
