//! # Core Domain Entities
//!
//! Defines the entities stored in the hosted document tree.
//!
//! ## Clusters
//!
//! - **Users & Wallets**: `User`, `Wallet`
//! - **Tournaments**: `Tournament`, `TournamentSummary`, `Participant`
//! - **Audit Trail**: `HistoryRecord`, `RecordKind`
//!
//! Store tree layout:
//!
//! ```text
//! users/{uid}:               { referCode, referredBy?, wallet }
//! tournaments/{tid}:         { title|gameName, prize|prizePool, entryFee,
//!                              status, map?, schedule?, participants? }
//! walletHistory/{uid}/{key}: HistoryRecord
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Diamond amounts are signed so a ledger delta can carry direction,
/// but a stored balance is never driven negative by a deduction.
pub type DiamondAmount = i64;

// =============================================================================
// CLUSTER A: USERS & WALLETS
// =============================================================================

/// The in-app currency wallet, owned exclusively by its user and mutated
/// only through the wallet mutator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    /// Current diamond balance. A fee deduction never takes it negative.
    #[serde(rename = "greenDiamondBalance", default)]
    pub green_diamond_balance: DiamondAmount,
}

/// A user record under `users/{uid}`.
///
/// `refer_code` is unique per user and pre-assigned externally.
/// `referred_by` transitions from unset to a fixed value exactly once;
/// the redemption workflow enforces this, not the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "referCode", default)]
    pub refer_code: String,
    #[serde(rename = "referredBy", default, skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    #[serde(default)]
    pub wallet: Wallet,
}

// =============================================================================
// CLUSTER B: TOURNAMENTS
// =============================================================================

/// A participant entry under `tournaments/{tid}/participants/{uid}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Store-assigned join timestamp (epoch milliseconds).
    #[serde(rename = "joinedAt")]
    pub joined_at: i64,
}

/// The client-facing view of a tournament, as returned by the listing
/// endpoint. Field fallbacks mirror the seeded tree: older records carry
/// `gameName`/`prizePool` instead of `title`/`prize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: String,
    pub title: String,
    pub prize: String,
    #[serde(rename = "entryFee")]
    pub entry_fee: DiamondAmount,
    pub status: String,
    pub map: String,
    pub schedule: String,
}

impl TournamentSummary {
    /// Build a summary from a raw `tournaments/{tid}` node, applying the
    /// field fallbacks and coercions the mobile client relies on.
    pub fn from_record(id: &str, record: &Value) -> Self {
        let text = |keys: &[&str], fallback: &str| -> String {
            keys.iter()
                .find_map(|k| record.get(*k).and_then(Value::as_str))
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            id: id.to_string(),
            title: text(&["title", "gameName"], "Tournament Match"),
            prize: text(&["prizePool", "prize"], "0"),
            entry_fee: coerce_entry_fee(record.get("entryFee")),
            status: text(&["status"], "Upcoming"),
            map: text(&["map"], ""),
            schedule: text(&["schedule"], ""),
        }
    }
}

/// Coerce a raw `entryFee` field to a non-negative amount.
///
/// Numbers pass through, numeric strings parse, anything else (and any
/// negative value) coerces to 0 rather than rejecting the record.
pub fn coerce_entry_fee(raw: Option<&Value>) -> DiamondAmount {
    let fee = match raw {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    fee.max(0)
}

// =============================================================================
// CLUSTER C: AUDIT TRAIL
// =============================================================================

/// Direction of a wallet-affecting event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// Balance credit (green in the app).
    Reward,
    /// Balance deduction (red in the app).
    Debit,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Reward => write!(f, "Reward"),
            RecordKind::Debit => write!(f, "Debit"),
        }
    }
}

/// An immutable audit-trail entry under `walletHistory/{uid}/{key}`.
///
/// Written exactly once by the ledger writer, never updated or deleted.
/// `id` equals the store-assigned push key; `timestamp` is assigned by the
/// store at write time, never by the caller's clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub amount: DiamondAmount,
    /// App subtitle label, e.g. "Game Zone Win" or "Tournament Entry Fee".
    pub method: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Always "approved" for records this service writes.
    pub status: String,
    /// Counterpart identifier: the other party's uid for referral bonuses,
    /// the tournament id for entry fees, empty otherwise.
    #[serde(rename = "transactionId", default)]
    pub transaction_id: String,
    /// Store-assigned epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
}
