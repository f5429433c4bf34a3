//! Ledger writer: appends immutable history records.

use crate::paths;
use arena_store::{DocumentStore, CHILD_KEY};
use serde_json::json;
use shared_types::{DiamondAmount, RecordKind, WorkflowError};
use std::sync::Arc;
use tracing::debug;

/// Appends one `HistoryRecord` per wallet-affecting event under
/// `walletHistory/{uid}`. Records are never updated or deleted.
#[derive(Clone)]
pub struct LedgerWriter {
    store: Arc<dyn DocumentStore>,
}

impl LedgerWriter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Append exactly one record and return its store-assigned key.
    ///
    /// The record embeds its own key (`id`) and a store-assigned timestamp,
    /// so ordering never depends on this process's clock. A store failure
    /// propagates to the caller, which decides whether the surrounding
    /// workflow still counts as successful.
    pub async fn record(
        &self,
        user_id: &str,
        amount: DiamondAmount,
        method: &str,
        kind: RecordKind,
        status: &str,
        transaction_id: &str,
    ) -> Result<String, WorkflowError> {
        let history = paths::history(user_id)?;
        let record = json!({
            "amount": amount,
            "id": CHILD_KEY,
            "method": method,
            "status": status,
            "timestamp": self.store.server_timestamp(),
            "transactionId": transaction_id,
            "type": kind.to_string(),
            "userId": user_id,
        });
        let key = self.store.append_child(&history, record).await?;
        debug!(user_id, amount, kind = %kind, key = %key, "history record appended");
        Ok(key)
    }
}
