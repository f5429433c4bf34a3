//! # Runtime Configuration
//!
//! Unified configuration for the store adapter, the gateway, and the reward
//! amounts, with environment-variable overrides on typed defaults.
//!
//! | Variable | Effect |
//! |---|---|
//! | `FIREBASE_DATABASE_URL` | base URL of the hosted store (required) |
//! | `FIREBASE_AUTH_TOKEN` | auth token for the store REST calls |
//! | `PORT` | HTTP listen port (default 3000) |
//! | `ARENA_HTTP_HOST` | HTTP bind address (default 0.0.0.0) |
//! | `ARENA_REFERRAL_BONUS` | referral bonus amount (default 100) |
//! | `ARENA_GAME_REWARD` | game reward amount (default 10) |

use arena_core::RewardConfig;
use arena_gateway::GatewayConfig;
use arena_store::StoreConfig;
use std::str::FromStr;
use tracing::warn;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Store connection configuration.
    pub store: StoreConfig,
    /// HTTP gateway configuration.
    pub gateway: GatewayConfig,
    /// Reward amounts.
    pub rewards: RewardConfig,
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an injected lookup, so tests can supply
    /// variables without touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("FIREBASE_DATABASE_URL") {
            config.store.database_url = url;
        }
        if let Some(token) = lookup("FIREBASE_AUTH_TOKEN") {
            config.store.auth_token = Some(token);
        }
        if let Some(port) = parse(&lookup, "PORT") {
            config.gateway.http.port = port;
        }
        if let Some(host) = parse(&lookup, "ARENA_HTTP_HOST") {
            config.gateway.http.host = host;
        }
        if let Some(bonus) = parse(&lookup, "ARENA_REFERRAL_BONUS") {
            config.rewards.referral_bonus = bonus;
        }
        if let Some(reward) = parse(&lookup, "ARENA_GAME_REWARD") {
            config.rewards.game_reward = reward;
        }

        config
    }
}

/// Parse an override, warning (and keeping the default) on garbage.
fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, raw = %raw, "ignoring unparseable environment override");
            None
        }
    }
}
