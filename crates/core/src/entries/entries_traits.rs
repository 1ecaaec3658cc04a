//! Ledger entry repository and service traits.

use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use super::entries_model::{LedgerEntry, NewLedgerEntry, ReconciliationReport};
use crate::errors::Result;

/// Trait defining the contract for ledger entry persistence.
///
/// Entries are append-only: there is deliberately no update or delete.
pub trait LedgerEntryRepositoryTrait: Send + Sync {
    /// Lists a wallet's entries, newest first.
    fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<LedgerEntry>>;

    /// Looks up an entry by its external reference.
    fn find_by_reference(&self, reference: &str) -> Result<Option<LedgerEntry>>;

    /// Sums the COMPLETED entry amounts of a wallet.
    fn sum_completed_for_wallet(&self, wallet_id: &str) -> Result<Decimal>;

    /// Appends an entry within a transaction.
    fn create_in_tx(
        &self,
        conn: &mut SqliteConnection,
        new_entry: NewLedgerEntry,
    ) -> Result<LedgerEntry>;

    /// Looks up an entry by reference within a transaction.
    fn find_by_reference_in_tx(
        &self,
        conn: &mut SqliteConnection,
        reference: &str,
    ) -> Result<Option<LedgerEntry>>;
}

/// Trait defining the contract for ledger entry service operations.
pub trait LedgerEntryServiceTrait: Send + Sync {
    /// Lists a user's wallet history, newest first.
    fn get_wallet_history(&self, user_id: &str) -> Result<Vec<LedgerEntry>>;

    /// Recomputes the conservation check for a user's wallet.
    fn reconcile_wallet(&self, user_id: &str) -> Result<ReconciliationReport>;
}
