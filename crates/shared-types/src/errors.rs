//! # Error Types
//!
//! Defines error types used across the service crates.
//!
//! `StoreError` covers the transport to the hosted document store;
//! `WorkflowError` is the request-level taxonomy every workflow returns and
//! the gateway maps onto HTTP statuses. Display strings double as the wire
//! `message` field, so they match what the mobile client expects verbatim.

use thiserror::Error;

/// Errors from the document store port.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Store unreachable or a call failed outright.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A per-call deadline elapsed before the store answered.
    ///
    /// Surfaced distinctly from `Unavailable` so operators can tell a slow
    /// store from a dead one.
    #[error("store timeout: {0}")]
    Timeout(String),

    /// An optimistic update kept losing the compare-and-set race.
    #[error("conditional update conflict after {retries} retries")]
    Conflict { retries: u32 },

    /// A path segment violates the store's key rules.
    #[error("invalid store path segment: {0:?}")]
    InvalidPath(String),

    /// A stored node did not decode as the expected shape.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Request-level errors returned by the core workflows.
#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    /// Missing or malformed request data.
    #[error("{0}")]
    Validation(String),

    /// A referenced user, tournament, or referral code does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The user has already redeemed a referral code.
    #[error("Already referred.")]
    AlreadyRedeemed,

    /// The user is already registered in this tournament.
    #[error("Already joined!")]
    AlreadyJoined,

    /// Balance below the requested deduction; nothing was written.
    #[error("Insufficient Balance")]
    InsufficientFunds,

    /// The store failed mid-request.
    #[error(transparent)]
    Store(#[from] StoreError),
}
