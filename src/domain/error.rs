use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing secret: {0}")]
    MissingSecret(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Log append failed: {0}")]
    Log(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn missing_secret(msg: impl Into<String>) -> Self {
        Self::MissingSecret(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_missing_secret(&self) -> bool {
        matches!(self, Self::MissingSecret(_))
    }

    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_))
    }

    pub fn is_log(&self) -> bool {
        matches!(self, Self::Log(_))
    }
}
