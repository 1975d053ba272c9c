use crate::errors::AppError;
use std::env;

/// Runtime configuration, built explicitly and injected into [`crate::Backend`].
#[derive(Debug, Clone)]
pub struct Config {
    pub db_name: String,
    /// Secret keying the login-token codec. Must be non-empty; there is no
    /// built-in fallback value.
    pub token_secret: String,
}

impl Config {
    pub fn new(db_name: impl Into<String>, token_secret: impl Into<String>) -> Self {
        Self { db_name: db_name.into(), token_secret: token_secret.into() }
    }

    /// Reads configuration from the environment:
    /// - `TOYSTORE_DB_NAME` (default: `toy_shop_db`)
    /// - `TOYSTORE_TOKEN_SECRET` (required)
    pub fn from_env() -> Result<Self, AppError> {
        let db_name = env::var("TOYSTORE_DB_NAME").unwrap_or_else(|_| "toy_shop_db".to_string());
        let token_secret = env::var("TOYSTORE_TOKEN_SECRET")
            .map_err(|_| AppError::Config("TOYSTORE_TOKEN_SECRET must be set".to_string()))?;
        if token_secret.trim().is_empty() {
            return Err(AppError::Config("TOYSTORE_TOKEN_SECRET must not be empty".to_string()));
        }
        Ok(Self { db_name, token_secret })
    }
}
