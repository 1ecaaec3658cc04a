use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use agrivest_core::entries::{
    EntryStatus, LedgerEntry, LedgerEntryRepositoryTrait, NewLedgerEntry,
};
use agrivest_core::errors::Result;

use super::model::LedgerEntryDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::ledger_entries;
use crate::utils::parse_money;

/// Repository for the append-only transaction log.
///
/// Entries are written only inside ledger transactions, so there are no
/// writer-actor methods here.
pub struct LedgerEntryRepository {
    pool: Arc<DbPool>,
}

impl LedgerEntryRepository {
    /// Creates a new LedgerEntryRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn find_by_reference_with_conn(
        conn: &mut SqliteConnection,
        reference_param: &str,
    ) -> Result<Option<LedgerEntry>> {
        ledger_entries::table
            .select(LedgerEntryDB::as_select())
            .filter(ledger_entries::reference.eq(reference_param))
            .first::<LedgerEntryDB>(conn)
            .optional()
            .into_core()?
            .map(LedgerEntry::try_from)
            .transpose()
    }
}

impl LedgerEntryRepositoryTrait for LedgerEntryRepository {
    fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<LedgerEntry>> {
        let mut conn = get_connection(&self.pool)?;

        let entries_db = ledger_entries::table
            .select(LedgerEntryDB::as_select())
            .filter(ledger_entries::wallet_id.eq(wallet_id))
            .order(ledger_entries::created_at.desc())
            .load::<LedgerEntryDB>(&mut conn)
            .into_core()?;

        entries_db.into_iter().map(LedgerEntry::try_from).collect()
    }

    fn find_by_reference(&self, reference: &str) -> Result<Option<LedgerEntry>> {
        let mut conn = get_connection(&self.pool)?;
        Self::find_by_reference_with_conn(&mut conn, reference)
    }

    fn sum_completed_for_wallet(&self, wallet_id: &str) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;

        // Amounts are stored as text; sum in Decimal space rather than SQL.
        let amounts = ledger_entries::table
            .select(ledger_entries::amount)
            .filter(ledger_entries::wallet_id.eq(wallet_id))
            .filter(ledger_entries::status.eq(EntryStatus::Completed.as_str()))
            .load::<String>(&mut conn)
            .into_core()?;

        let mut total = Decimal::ZERO;
        for amount in &amounts {
            total += parse_money(amount, "ledger_entries.amount")?;
        }
        Ok(total)
    }

    fn create_in_tx(
        &self,
        conn: &mut SqliteConnection,
        new_entry: NewLedgerEntry,
    ) -> Result<LedgerEntry> {
        new_entry.validate()?;

        let entry_db: LedgerEntryDB = new_entry.into();
        diesel::insert_into(ledger_entries::table)
            .values(&entry_db)
            .execute(conn)
            .into_core()?;

        entry_db.try_into()
    }

    fn find_by_reference_in_tx(
        &self,
        conn: &mut SqliteConnection,
        reference: &str,
    ) -> Result<Option<LedgerEntry>> {
        Self::find_by_reference_with_conn(conn, reference)
    }
}
