//! Ledger entry domain models.

use chrono::NaiveDateTime;
use num_traits::Zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Category of a balance mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// Incoming funds from outside the platform. Increases balance.
    Deposit,
    /// Outgoing funds to an external account. Decreases balance.
    Withdrawal,
    /// Units purchased in a product. Decreases balance.
    Investment,
    /// Referral bonus awarded or transferred into the balance.
    ReferralBonus,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Deposit => "DEPOSIT",
            EntryType::Withdrawal => "WITHDRAWAL",
            EntryType::Investment => "INVESTMENT",
            EntryType::ReferralBonus => "REFERRAL_BONUS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DEPOSIT" => Some(EntryType::Deposit),
            "WITHDRAWAL" => Some(EntryType::Withdrawal),
            "INVESTMENT" => Some(EntryType::Investment),
            "REFERRAL_BONUS" => Some(EntryType::ReferralBonus),
            _ => None,
        }
    }
}

/// Lifecycle status of a ledger entry.
///
/// Only COMPLETED entries count toward a wallet's balance; PENDING records
/// funds announced but not yet spendable (e.g. an un-transferred referral
/// award), FAILED records an attempt that settled unsuccessfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    Pending,
    #[default]
    Completed,
    Failed,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "PENDING",
            EntryStatus::Completed => "COMPLETED",
            EntryStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(EntryStatus::Pending),
            "COMPLETED" => Some(EntryStatus::Completed),
            "FAILED" => Some(EntryStatus::Failed),
            _ => None,
        }
    }
}

/// Domain model representing one immutable row of the transaction log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub wallet_id: String,
    /// Signed amount: positive credits the wallet, negative debits it.
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub status: EntryStatus,
    /// External idempotency key (gateway reference, referral award key).
    pub reference: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

impl LedgerEntry {
    /// Whether this entry counts toward the wallet balance.
    pub fn is_completed(&self) -> bool {
        self.status == EntryStatus::Completed
    }
}

/// Input model for appending a ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    pub wallet_id: String,
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub status: EntryStatus,
    pub reference: Option<String>,
    pub description: Option<String>,
}

impl NewLedgerEntry {
    /// A COMPLETED entry, the common case for settled mutations.
    pub fn completed(wallet_id: &str, amount: Decimal, entry_type: EntryType) -> Self {
        Self {
            wallet_id: wallet_id.to_string(),
            amount,
            entry_type,
            status: EntryStatus::Completed,
            reference: None,
            description: None,
        }
    }

    /// A PENDING entry, announced but not yet spendable.
    pub fn pending(wallet_id: &str, amount: Decimal, entry_type: EntryType) -> Self {
        Self {
            status: EntryStatus::Pending,
            ..Self::completed(wallet_id, amount, entry_type)
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the new entry data.
    pub fn validate(&self) -> Result<()> {
        if self.wallet_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "walletId".to_string(),
            )));
        }
        if self.amount.is_zero() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Ledger entry amount cannot be zero".to_string(),
            )));
        }
        Ok(())
    }
}

/// Result of checking a wallet against its COMPLETED entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub wallet_id: String,
    pub balance: Decimal,
    pub completed_total: Decimal,
}

impl ReconciliationReport {
    /// Whether the balance matches the sum of COMPLETED entry amounts.
    pub fn is_balanced(&self) -> bool {
        self.balance == self.completed_total
    }
}
