//! Tournament listing and the join workflow.

use crate::ledger::LedgerWriter;
use crate::paths;
use crate::wallet::WalletService;
use arena_store::DocumentStore;
use serde_json::{Map, Value};
use shared_types::{
    coerce_entry_fee, DiamondAmount, RecordKind, TournamentSummary, WorkflowError,
};
use std::sync::Arc;
use tracing::{info, warn};

const METHOD_ENTRY_FEE: &str = "Tournament Entry Fee";

/// Reads the tournament tree and registers paid entries.
#[derive(Clone)]
pub struct TournamentService {
    store: Arc<dyn DocumentStore>,
    wallet: WalletService,
    ledger: LedgerWriter,
}

impl TournamentService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        wallet: WalletService,
        ledger: LedgerWriter,
    ) -> Self {
        Self {
            store,
            wallet,
            ledger,
        }
    }

    /// All tournaments, newest first. Push keys sort chronologically, so
    /// reversing key order puts the latest additions at the top.
    pub async fn list(&self) -> Result<Vec<TournamentSummary>, WorkflowError> {
        let snapshot = self.store.get(&paths::tournaments()).await?;
        let Some(Value::Object(children)) = snapshot else {
            return Ok(Vec::new());
        };
        let mut tournaments: Vec<TournamentSummary> = children
            .iter()
            .map(|(id, record)| TournamentSummary::from_record(id, record))
            .collect();
        tournaments.reverse();
        Ok(tournaments)
    }

    /// Join `tournament_id` as `user_id`, deducting the entry fee.
    ///
    /// Sequence: existence check, idempotency check, conditional fee
    /// deduction (insufficiency is detected inside the store transaction,
    /// not by a racy pre-read), participant registration with a store
    /// timestamp, Debit history record. A failure after the deduction
    /// leaves the fee charged; that window is logged, not hidden.
    pub async fn join(
        &self,
        user_id: &str,
        tournament_id: &str,
    ) -> Result<DiamondAmount, WorkflowError> {
        let tournament_path = paths::tournament(tournament_id)?;
        // Resolve both paths before any write so a bad id cannot fail the
        // workflow halfway through.
        let participant_path = paths::participant(tournament_id, user_id)?;

        let record = self
            .store
            .get(&tournament_path)
            .await?
            .ok_or_else(|| WorkflowError::NotFound("Tournament not found".into()))?;

        let already_joined = record
            .get("participants")
            .and_then(|p| p.get(user_id))
            .is_some();
        if already_joined {
            return Err(WorkflowError::AlreadyJoined);
        }

        let entry_fee = coerce_entry_fee(record.get("entryFee"));
        self.wallet.debit(user_id, entry_fee).await?;

        let partial = |step: &str, err: &WorkflowError| {
            warn!(
                user_id,
                tournament_id,
                entry_fee,
                step,
                error = %err,
                "join failed after fee deduction"
            );
        };

        let mut fields = Map::new();
        fields.insert("joinedAt".into(), self.store.server_timestamp());
        if let Err(err) = self.store.patch(&participant_path, fields).await {
            let err = WorkflowError::from(err);
            partial("register participant", &err);
            return Err(err);
        }

        if let Err(err) = self
            .ledger
            .record(user_id, entry_fee, METHOD_ENTRY_FEE, RecordKind::Debit, "approved", tournament_id)
            .await
        {
            partial("record entry fee", &err);
            return Err(err);
        }

        info!(user_id, tournament_id, entry_fee, "tournament joined");
        Ok(entry_fee)
    }
}
