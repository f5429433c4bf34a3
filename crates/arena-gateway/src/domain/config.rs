//! Gateway configuration with validation.

use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// HTTP server configuration.
    pub http: HttpConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
    /// Request limits.
    pub limits: LimitsConfig,
}

impl GatewayConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeouts.request.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }
        if self.limits.max_request_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size cannot be 0".into(),
            ));
        }
        if self.cors.enabled {
            let methods: HashSet<_> = self.cors.allowed_methods.iter().collect();
            if methods.is_empty() {
                return Err(ConfigError::InvalidCors("no allowed methods".into()));
            }
        }
        Ok(())
    }

    /// Get the HTTP bind address.
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Port (default: 3000, the platform's conventional listen port).
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3000,
        }
    }
}

/// CORS configuration. The mobile client and the web dashboard call from
/// arbitrary origins, so the default is permissive.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Enable CORS.
    pub enabled: bool,
    /// Allowed origins ("*" for all).
    pub allowed_origins: Vec<String>,
    /// Allowed methods.
    pub allowed_methods: Vec<String>,
    /// Allowed headers.
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache, seconds.
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec!["Content-Type".to_string()],
            max_age: 86400,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Whole-request deadline.
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(10),
        }
    }
}

/// Request limits.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Max request body size in bytes.
    pub max_request_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: 1024 * 1024, // 1MB
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Invalid timeout value.
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Invalid size limit.
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid CORS configuration.
    #[error("invalid CORS config: {0}")]
    InvalidCors(String),
}
