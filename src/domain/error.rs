use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Timed out: {0}")]
    Timeout(String),
}
