//! Referral redemption workflow.

use crate::ledger::LedgerWriter;
use crate::paths;
use crate::wallet::WalletService;
use arena_store::DocumentStore;
use serde_json::{json, Map};
use shared_types::{DiamondAmount, RecordKind, StoreError, User, WorkflowError};
use std::sync::Arc;
use tracing::{info, warn};

const METHOD_BONUS_JOINED: &str = "Referral Bonus (Joined)";
const METHOD_BONUS_INVITE: &str = "Referral Bonus (Invite)";

/// Validates a redemption request, locates the referrer through the store's
/// indexed code lookup, and performs the paired wallet credit + ledger
/// entries for both parties.
#[derive(Clone)]
pub struct ReferralService {
    store: Arc<dyn DocumentStore>,
    wallet: WalletService,
    ledger: LedgerWriter,
    bonus: DiamondAmount,
}

impl ReferralService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        wallet: WalletService,
        ledger: LedgerWriter,
        bonus: DiamondAmount,
    ) -> Self {
        Self {
            store,
            wallet,
            ledger,
            bonus,
        }
    }

    /// Redeem `code` on behalf of `user_id`. Returns the bonus credited to
    /// each party.
    ///
    /// The checks run in a fixed order: user exists, not already referred,
    /// not the user's own code, code resolves to a referrer. The four writes
    /// that follow are not atomic across keys; a mid-sequence failure leaves
    /// the completed prefix in place and is logged before propagating.
    pub async fn redeem(&self, user_id: &str, code: &str) -> Result<DiamondAmount, WorkflowError> {
        let user_path = paths::user(user_id)?;
        let raw = self
            .store
            .get(&user_path)
            .await?
            .ok_or_else(|| WorkflowError::NotFound("User not found.".into()))?;
        let user: User = serde_json::from_value(raw)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if user.referred_by.is_some() {
            return Err(WorkflowError::AlreadyRedeemed);
        }
        if user.refer_code == code {
            return Err(WorkflowError::Validation("Cannot use own code.".into()));
        }

        let matches = self
            .store
            .query_equal(&paths::users(), "referCode", code)
            .await?;
        let Some((referrer_id, _)) = matches.into_iter().next() else {
            return Err(WorkflowError::NotFound("Invalid code.".into()));
        };

        let partial = |step: &str, err: &WorkflowError| {
            warn!(user_id, code, step, error = %err, "referral redemption failed mid-sequence");
        };

        // First write: nothing committed yet, plain propagation.
        self.wallet.credit(user_id, self.bonus).await?;

        let mut fields = Map::new();
        fields.insert("referredBy".into(), json!(referrer_id));
        if let Err(err) = self.store.patch(&user_path, fields).await {
            let err = WorkflowError::from(err);
            partial("mark referredBy", &err);
            return Err(err);
        }

        if let Err(err) = self.wallet.credit(&referrer_id, self.bonus).await {
            partial("credit referrer", &err);
            return Err(err);
        }

        if let Err(err) = self
            .ledger
            .record(user_id, self.bonus, METHOD_BONUS_JOINED, RecordKind::Reward, "approved", &referrer_id)
            .await
        {
            partial("record joined bonus", &err);
            return Err(err);
        }

        if let Err(err) = self
            .ledger
            .record(&referrer_id, self.bonus, METHOD_BONUS_INVITE, RecordKind::Reward, "approved", user_id)
            .await
        {
            partial("record invite bonus", &err);
            return Err(err);
        }

        info!(user_id, referrer_id, bonus = self.bonus, "referral redeemed");
        Ok(self.bonus)
    }
}
