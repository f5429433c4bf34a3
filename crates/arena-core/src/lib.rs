//! # Arena Core
//!
//! The wallet-and-referral consistency core of the Diamond Arena backend.
//!
//! Every workflow is a short read-check-write sequence against the injected
//! [`arena_store::DocumentStore`] port. The invariants enforced here:
//!
//! - a balance never goes negative from a fee deduction (conditional
//!   transaction, never a blind subtract)
//! - `referredBy` is set at most once per user; self-referral is rejected
//! - every balance-affecting workflow appends a matching history record
//! - tournament membership is idempotent; re-joins are rejected
//!
//! Multi-key workflows are *not* atomic across keys (the store only offers
//! single-key transactions), so mid-sequence failures leave the completed
//! prefix in place. Each workflow logs the completed steps at WARN before
//! propagating the error.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod container;
pub mod ledger;
pub mod paths;
pub mod referral;
pub mod reward;
pub mod tournament;
pub mod wallet;

pub use config::RewardConfig;
pub use container::CoreServices;
pub use ledger::LedgerWriter;
pub use referral::ReferralService;
pub use reward::RewardService;
pub use tournament::TournamentService;
pub use wallet::WalletService;
