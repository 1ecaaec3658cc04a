use log::debug;
use std::sync::Arc;

use super::wallets_model::{NewWallet, Wallet};
use super::wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
use crate::errors::{DatabaseError, Error, Result};

/// Service for managing wallets.
pub struct WalletService {
    repository: Arc<dyn WalletRepositoryTrait>,
}

impl WalletService {
    /// Creates a new WalletService instance.
    pub fn new(repository: Arc<dyn WalletRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl WalletServiceTrait for WalletService {
    /// Retrieves a user's wallet, failing when none exists.
    fn get_wallet(&self, user_id: &str) -> Result<Wallet> {
        (*self.repository).get_by_user_id(user_id)
    }

    /// Retrieves a user's wallet, creating an empty one on first access.
    ///
    /// A concurrent first access can lose the insert race on the unique
    /// `user_id` index; the loser re-reads the winner's row.
    async fn get_or_create_wallet(&self, user_id: &str) -> Result<Wallet> {
        if let Some(wallet) = self.repository.find_by_user_id(user_id)? {
            return Ok(wallet);
        }

        debug!("Creating wallet for user {}", user_id);
        let new_wallet = NewWallet {
            user_id: user_id.to_string(),
        };
        new_wallet.validate()?;

        match self.repository.create(new_wallet).await {
            Ok(wallet) => Ok(wallet),
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                self.repository.get_by_user_id(user_id)
            }
            Err(e) => Err(e),
        }
    }
}
