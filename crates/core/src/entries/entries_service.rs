use log::warn;
use std::sync::Arc;

use super::entries_model::{LedgerEntry, ReconciliationReport};
use super::entries_traits::{LedgerEntryRepositoryTrait, LedgerEntryServiceTrait};
use crate::errors::Result;
use crate::wallets::WalletRepositoryTrait;

/// Service for reading the transaction log.
pub struct LedgerEntryService {
    entry_repository: Arc<dyn LedgerEntryRepositoryTrait>,
    wallet_repository: Arc<dyn WalletRepositoryTrait>,
}

impl LedgerEntryService {
    /// Creates a new LedgerEntryService instance.
    pub fn new(
        entry_repository: Arc<dyn LedgerEntryRepositoryTrait>,
        wallet_repository: Arc<dyn WalletRepositoryTrait>,
    ) -> Self {
        Self {
            entry_repository,
            wallet_repository,
        }
    }
}

impl LedgerEntryServiceTrait for LedgerEntryService {
    fn get_wallet_history(&self, user_id: &str) -> Result<Vec<LedgerEntry>> {
        let wallet = self.wallet_repository.get_by_user_id(user_id)?;
        self.entry_repository.list_for_wallet(&wallet.id)
    }

    /// Recomputes the conservation check for a user's wallet: the stored
    /// balance must equal the sum of COMPLETED entry amounts.
    fn reconcile_wallet(&self, user_id: &str) -> Result<ReconciliationReport> {
        let wallet = self.wallet_repository.get_by_user_id(user_id)?;
        let completed_total = self.entry_repository.sum_completed_for_wallet(&wallet.id)?;

        let report = ReconciliationReport {
            wallet_id: wallet.id,
            balance: wallet.balance,
            completed_total,
        };
        if !report.is_balanced() {
            warn!(
                "Wallet {} out of balance: stored {} vs ledger {}",
                report.wallet_id, report.balance, report.completed_total
            );
        }
        Ok(report)
    }
}
