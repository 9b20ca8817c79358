use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("No analysis context found for {0}")]
    ContextNotFound(String),
}

pub type Result<T> = std::result::Result<T, ChatError>;
