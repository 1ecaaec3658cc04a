//! Wallet repository and service traits.
//!
//! These traits define the contract for wallet operations without any
//! database-specific types beyond the transaction connection, allowing for
//! different storage implementations.

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use super::wallets_model::{NewWallet, Wallet};
use crate::errors::Result;

/// Trait defining the contract for Wallet repository operations.
///
/// The `*_in_tx` methods take part in a caller-owned transaction and must be
/// the only way balances are written during a ledger operation.
#[async_trait]
pub trait WalletRepositoryTrait: Send + Sync {
    /// Retrieves the wallet owned by a user, failing when none exists.
    fn get_by_user_id(&self, user_id: &str) -> Result<Wallet>;

    /// Retrieves the wallet owned by a user, if any.
    fn find_by_user_id(&self, user_id: &str) -> Result<Option<Wallet>>;

    /// Creates a new wallet with zero balances.
    async fn create(&self, new_wallet: NewWallet) -> Result<Wallet>;

    /// Reads a user's wallet within a transaction.
    fn find_by_user_id_in_tx(
        &self,
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> Result<Option<Wallet>>;

    /// Creates a wallet within a transaction.
    fn create_in_tx(&self, conn: &mut SqliteConnection, new_wallet: NewWallet) -> Result<Wallet>;

    /// Writes both balances of a wallet within a transaction and returns the
    /// updated row.
    fn update_balances_in_tx(
        &self,
        conn: &mut SqliteConnection,
        wallet_id: &str,
        balance: Decimal,
        referral_balance: Decimal,
    ) -> Result<Wallet>;
}

/// Trait defining the contract for Wallet service operations.
#[async_trait]
pub trait WalletServiceTrait: Send + Sync {
    /// Retrieves a user's wallet, failing when none exists.
    fn get_wallet(&self, user_id: &str) -> Result<Wallet>;

    /// Retrieves a user's wallet, creating an empty one on first access.
    async fn get_or_create_wallet(&self, user_id: &str) -> Result<Wallet>;
}
