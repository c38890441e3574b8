use thiserror::Error;

#[derive(Debug, Error)]
pub enum FibError {
    #[error("invalid strategy: {0}")]
    InvalidStrategy(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type FibResult<T> = Result<T, FibError>;
