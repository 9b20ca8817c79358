use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Parsing service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parsing job {0} failed: {1}")]
    JobFailed(String, String),

    #[error("Parsing job {0} did not finish within {1}s")]
    Timeout(String, u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
