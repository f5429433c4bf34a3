//! Domain types for the gateway: configuration, errors, wire DTOs.

pub mod config;
pub mod error;
pub mod types;

pub use config::GatewayConfig;
pub use error::{ApiError, GatewayError};
pub use types::*;
