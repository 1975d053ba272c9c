use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("token error: {0}")]
    Token(String),
}

impl From<bson::de::Error> for AppError {
    fn from(e: bson::de::Error) -> Self {
        Self::Store(e.to_string())
    }
}
