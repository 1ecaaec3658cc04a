//! Database model for wallets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use agrivest_core::errors::Error;
use agrivest_core::wallets::{NewWallet, Wallet};

use crate::utils::parse_money;

/// Database model for wallets
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::wallets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WalletDB {
    pub id: String,
    pub user_id: String,
    pub balance: String,
    pub referral_balance: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl TryFrom<WalletDB> for Wallet {
    type Error = Error;

    fn try_from(db: WalletDB) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            balance: parse_money(&db.balance, "wallets.balance")?,
            referral_balance: parse_money(&db.referral_balance, "wallets.referral_balance")?,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewWallet> for WalletDB {
    fn from(domain: NewWallet) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: domain.user_id,
            balance: Decimal::ZERO.to_string(),
            referral_balance: Decimal::ZERO.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
