//! Wallet domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a user's wallet.
///
/// Each user owns at most one wallet, created lazily on first access.
/// Both balances are mutated exclusively inside ledger transactions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub user_id: String,
    /// Spendable balance. Never negative.
    pub balance: Decimal,
    /// Bonus balance earned from referrals, transferable into `balance`.
    pub referral_balance: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Wallet {
    /// Whether the spendable balance covers the given amount.
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    /// Whether there is any referral balance left to transfer.
    pub fn has_referral_balance(&self) -> bool {
        self.referral_balance > Decimal::ZERO
    }
}

/// Input model for creating a new wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWallet {
    pub user_id: String,
}

impl NewWallet {
    /// Validates the new wallet data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        Ok(())
    }
}
