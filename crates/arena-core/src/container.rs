//! Service container: builds the workflow services over one store handle.

use crate::config::RewardConfig;
use crate::ledger::LedgerWriter;
use crate::referral::ReferralService;
use crate::reward::RewardService;
use crate::tournament::TournamentService;
use crate::wallet::WalletService;
use arena_store::DocumentStore;
use std::sync::Arc;

/// All core services wired over a single injected store.
#[derive(Clone)]
pub struct CoreServices {
    pub wallet: WalletService,
    pub ledger: LedgerWriter,
    pub tournaments: TournamentService,
    pub referral: ReferralService,
    pub reward: RewardService,
}

impl CoreServices {
    pub fn new(store: Arc<dyn DocumentStore>, rewards: RewardConfig) -> Self {
        let wallet = WalletService::new(store.clone());
        let ledger = LedgerWriter::new(store.clone());
        Self {
            tournaments: TournamentService::new(store.clone(), wallet.clone(), ledger.clone()),
            referral: ReferralService::new(
                store.clone(),
                wallet.clone(),
                ledger.clone(),
                rewards.referral_bonus,
            ),
            reward: RewardService::new(wallet.clone(), ledger.clone(), rewards.game_reward),
            wallet,
            ledger,
        }
    }
}
