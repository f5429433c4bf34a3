//! Game reward claims.

use crate::ledger::LedgerWriter;
use crate::wallet::WalletService;
use shared_types::{DiamondAmount, RecordKind, WorkflowError};
use tracing::{info, warn};

/// App subtitle shown for a claimed game reward.
const METHOD_GAME_REWARD: &str = "Game Zone Win";

/// Credits the fixed game reward and records it.
///
/// No eligibility check beyond a usable user id: the claim is gated
/// client-side by game completion, and any caller who can produce a uid
/// can claim repeatedly.
#[derive(Clone)]
pub struct RewardService {
    wallet: WalletService,
    ledger: LedgerWriter,
    amount: DiamondAmount,
}

impl RewardService {
    pub fn new(wallet: WalletService, ledger: LedgerWriter, amount: DiamondAmount) -> Self {
        Self {
            wallet,
            ledger,
            amount,
        }
    }

    /// Credit the reward, then append the Reward record. The credit is not
    /// rolled back if the record write fails; the request surfaces the
    /// failure after logging it.
    pub async fn claim(&self, uid: &str) -> Result<DiamondAmount, WorkflowError> {
        self.wallet.credit(uid, self.amount).await?;

        if let Err(err) = self
            .ledger
            .record(uid, self.amount, METHOD_GAME_REWARD, RecordKind::Reward, "approved", "")
            .await
        {
            warn!(uid, error = %err, "reward credited but history write failed");
            return Err(err);
        }

        info!(uid, amount = self.amount, "game reward claimed");
        Ok(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths;
    use arena_store::MemoryStore;
    use std::sync::Arc;

    fn service(amount: DiamondAmount) -> (Arc<MemoryStore>, RewardService) {
        let store = Arc::new(MemoryStore::new());
        let reward = RewardService::new(
            WalletService::new(store.clone()),
            LedgerWriter::new(store.clone()),
            amount,
        );
        (store, reward)
    }

    #[tokio::test]
    async fn test_claim_credits_and_records() {
        let (store, reward) = service(10);
        let credited = reward.claim("u1").await.unwrap();
        assert_eq!(credited, 10);

        let balance = store
            .snapshot(&paths::balance("u1").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(balance, serde_json::json!(10));

        let history = store
            .snapshot(&paths::history("u1").unwrap())
            .unwrap()
            .unwrap();
        let records = history.as_object().unwrap();
        assert_eq!(records.len(), 1);
        let record = records.values().next().unwrap();
        assert_eq!(record["method"], "Game Zone Win");
        assert_eq!(record["type"], "Reward");
        assert_eq!(record["amount"], 10);
    }

    #[tokio::test]
    async fn test_repeat_claims_are_allowed() {
        let (store, reward) = service(10);
        reward.claim("u1").await.unwrap();
        reward.claim("u1").await.unwrap();
        reward.claim("u1").await.unwrap();

        let balance = store
            .snapshot(&paths::balance("u1").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(balance, serde_json::json!(30));
    }
}
