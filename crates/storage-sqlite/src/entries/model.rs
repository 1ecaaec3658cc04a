//! Database model for ledger entries.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use agrivest_core::entries::{EntryStatus, EntryType, LedgerEntry, NewLedgerEntry};
use agrivest_core::errors::Error;

use crate::utils::{parse_enum, parse_money};

/// Database model for ledger entries
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::ledger_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerEntryDB {
    pub id: String,
    pub wallet_id: String,
    pub amount: String,
    pub entry_type: String,
    pub status: String,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

// Conversion implementations
impl TryFrom<LedgerEntryDB> for LedgerEntry {
    type Error = Error;

    fn try_from(db: LedgerEntryDB) -> Result<Self, Error> {
        Ok(Self {
            amount: parse_money(&db.amount, "ledger_entries.amount")?,
            entry_type: parse_enum(
                EntryType::parse(&db.entry_type),
                "ledger_entries.entry_type",
                &db.entry_type,
            )?,
            status: parse_enum(
                EntryStatus::parse(&db.status),
                "ledger_entries.status",
                &db.status,
            )?,
            id: db.id,
            wallet_id: db.wallet_id,
            reference: db.reference,
            description: db.description,
            created_at: db.created_at,
        })
    }
}

impl From<NewLedgerEntry> for LedgerEntryDB {
    fn from(domain: NewLedgerEntry) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            wallet_id: domain.wallet_id,
            amount: domain.amount.to_string(),
            entry_type: domain.entry_type.as_str().to_string(),
            status: domain.status.as_str().to_string(),
            reference: domain.reference,
            description: domain.description,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
