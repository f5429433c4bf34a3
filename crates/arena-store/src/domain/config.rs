//! Store connection configuration with validation.

use std::time::Duration;

/// Configuration for the hosted document store connection.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the database, e.g. `https://<project>.firebaseio.com`.
    pub database_url: String,
    /// Optional auth token appended as the `auth` query parameter.
    /// `None` works against an open emulator or public rules.
    pub auth_token: Option<String>,
    /// Per-call deadline. Elapsing surfaces `StoreError::Timeout`.
    pub request_timeout: Duration,
    /// Bound on compare-and-set retries before giving up with a conflict.
    pub cas_retries: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            auth_token: None,
            request_timeout: Duration::from_secs(10),
            cas_retries: 10,
        }
    }
}

impl StoreConfig {
    /// Validate configuration before an adapter is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if !self.database_url.starts_with("http://") && !self.database_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidDatabaseUrl(self.database_url.clone()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        if self.cas_retries == 0 {
            return Err(ConfigError::InvalidRetries);
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed.
    pub fn normalized_url(&self) -> &str {
        self.database_url.trim_end_matches('/')
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// No database URL configured.
    #[error("database URL is not set (FIREBASE_DATABASE_URL)")]
    MissingDatabaseUrl,
    /// Database URL is not an http(s) endpoint.
    #[error("invalid database URL: {0}")]
    InvalidDatabaseUrl(String),
    /// Zero request timeout.
    #[error("request timeout cannot be zero")]
    InvalidTimeout,
    /// Zero CAS retry budget.
    #[error("cas_retries cannot be zero")]
    InvalidRetries,
    /// HTTP client construction failed.
    #[error("http client error: {0}")]
    Client(String),
}
