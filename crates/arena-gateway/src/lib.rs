//! # Arena Gateway
//!
//! HTTP surface of the Diamond Arena backend.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      ARENA GATEWAY                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │               Middleware Stack                     │  │
//! │  │        CORS → Trace → Timeout → BodyLimit          │  │
//! │  └─────────────────────────┬──────────────────────────┘  │
//! │                            │                             │
//! │  GET  /api/tournaments     │    POST /api/claim-reward   │
//! │  POST /api/join-tournament │    POST /api/redeem-referral│
//! │  GET  /health              │                             │
//! │                            ▼                             │
//! │                      CoreServices                        │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │
//!                     Arc<dyn DocumentStore>
//! ```
//!
//! Every handler returns the single envelope the mobile client expects:
//! `{success: true, ...}` on success, `{success: false, message}` on error.
//!
//! # Usage
//!
//! ```ignore
//! use arena_gateway::{GatewayConfig, GatewayService};
//!
//! let mut service = GatewayService::new(GatewayConfig::default(), services)?;
//! service.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod service;

pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, GatewayError};
pub use service::{AppState, GatewayService};
