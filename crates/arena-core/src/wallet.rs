//! Wallet mutator: the only code that changes a diamond balance.

use crate::paths;
use arena_store::{DocumentStore, TxnDecision, TxnOutcome};
use serde_json::Value;
use shared_types::{DiamondAmount, WorkflowError};
use std::sync::Arc;
use tracing::debug;

/// Applies signed balance deltas to `users/{uid}/wallet/greenDiamondBalance`.
///
/// Credits use the store's commutative increment and need no read. Debits
/// run inside the store's single-key optimistic transaction so that two
/// concurrent deductions can never both succeed against one fee's worth of
/// balance.
#[derive(Clone)]
pub struct WalletService {
    store: Arc<dyn DocumentStore>,
}

impl WalletService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Atomic additive credit. Safe under arbitrary concurrency.
    pub async fn credit(
        &self,
        user_id: &str,
        amount: DiamondAmount,
    ) -> Result<(), WorkflowError> {
        let balance = paths::balance(user_id)?;
        self.store.increment(&balance, amount).await?;
        debug!(user_id, amount, "wallet credited");
        Ok(())
    }

    /// Conditional deduction: read, compute `current - amount`, commit only
    /// if unchanged since the read. Aborts without writing when the result
    /// would be negative. Absent or malformed balances count as 0.
    pub async fn debit(
        &self,
        user_id: &str,
        amount: DiamondAmount,
    ) -> Result<(), WorkflowError> {
        let balance = paths::balance(user_id)?;
        let outcome = self
            .store
            .conditional_update(&balance, &|current| {
                let available = current.and_then(Value::as_i64).unwrap_or(0);
                if available < amount {
                    TxnDecision::Abort
                } else {
                    TxnDecision::Commit(Value::from(available - amount))
                }
            })
            .await?;

        match outcome {
            TxnOutcome::Committed { .. } => {
                debug!(user_id, amount, "wallet debited");
                Ok(())
            }
            TxnOutcome::Aborted => Err(WorkflowError::InsufficientFunds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_store::MemoryStore;
    use serde_json::json;

    fn service() -> (Arc<MemoryStore>, WalletService) {
        let store = Arc::new(MemoryStore::new());
        let wallet = WalletService::new(store.clone());
        (store, wallet)
    }

    async fn balance_of(store: &MemoryStore, uid: &str) -> i64 {
        store
            .snapshot(&paths::balance(uid).unwrap())
            .unwrap()
            .and_then(|v| v.as_i64())
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn test_credit_creates_wallet_on_demand() {
        let (store, wallet) = service();
        wallet.credit("u1", 10).await.unwrap();
        wallet.credit("u1", 5).await.unwrap();
        assert_eq!(balance_of(&store, "u1").await, 15);
    }

    #[tokio::test]
    async fn test_debit_happy_path() {
        let (store, wallet) = service();
        store
            .seed(&paths::balance("u1").unwrap(), json!(100))
            .unwrap();
        wallet.debit("u1", 40).await.unwrap();
        assert_eq!(balance_of(&store, "u1").await, 60);
    }

    #[tokio::test]
    async fn test_debit_never_goes_negative() {
        let (store, wallet) = service();
        store
            .seed(&paths::balance("u1").unwrap(), json!(30))
            .unwrap();
        let err = wallet.debit("u1", 31).await.unwrap_err();
        assert!(matches!(err, WorkflowError::InsufficientFunds));
        assert_eq!(balance_of(&store, "u1").await, 30, "rejection must not write");
    }

    #[tokio::test]
    async fn test_debit_against_absent_wallet() {
        let (_, wallet) = service();
        let err = wallet.debit("ghost", 1).await.unwrap_err();
        assert!(matches!(err, WorkflowError::InsufficientFunds));
    }

    #[tokio::test]
    async fn test_exact_balance_debits_to_zero() {
        let (store, wallet) = service();
        store
            .seed(&paths::balance("u1").unwrap(), json!(50))
            .unwrap();
        wallet.debit("u1", 50).await.unwrap();
        assert_eq!(balance_of(&store, "u1").await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_debits_cannot_double_spend() {
        let (store, wallet) = service();
        store
            .seed(&paths::balance("u1").unwrap(), json!(50))
            .unwrap();

        let a = {
            let wallet = wallet.clone();
            tokio::spawn(async move { wallet.debit("u1", 50).await })
        };
        let b = {
            let wallet = wallet.clone();
            tokio::spawn(async move { wallet.debit("u1", 50).await })
        };
        let results = [a.await.unwrap(), b.await.unwrap()];

        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "only one deduction may win");
        assert_eq!(balance_of(&store, "u1").await, 0);
    }
}
