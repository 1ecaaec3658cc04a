use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use agrivest_core::errors::Result;
use agrivest_core::ledger::LedgerError;
use agrivest_core::wallets::{NewWallet, Wallet, WalletRepositoryTrait};

use super::model::WalletDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::wallets;

/// Repository for managing wallet data in the database
pub struct WalletRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WalletRepository {
    /// Creates a new WalletRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn find_with_conn(conn: &mut SqliteConnection, user_id_param: &str) -> Result<Option<Wallet>> {
        wallets::table
            .select(WalletDB::as_select())
            .filter(wallets::user_id.eq(user_id_param))
            .first::<WalletDB>(conn)
            .optional()
            .into_core()?
            .map(Wallet::try_from)
            .transpose()
    }

    fn insert_with_conn(conn: &mut SqliteConnection, new_wallet: NewWallet) -> Result<Wallet> {
        new_wallet.validate()?;

        let wallet_db: WalletDB = new_wallet.into();
        diesel::insert_into(wallets::table)
            .values(&wallet_db)
            .execute(conn)
            .into_core()?;

        wallet_db.try_into()
    }
}

#[async_trait]
impl WalletRepositoryTrait for WalletRepository {
    fn get_by_user_id(&self, user_id: &str) -> Result<Wallet> {
        self.find_by_user_id(user_id)?
            .ok_or_else(|| LedgerError::WalletNotFound(user_id.to_string()).into())
    }

    fn find_by_user_id(&self, user_id: &str) -> Result<Option<Wallet>> {
        let mut conn = get_connection(&self.pool)?;
        Self::find_with_conn(&mut conn, user_id)
    }

    async fn create(&self, new_wallet: NewWallet) -> Result<Wallet> {
        self.writer
            .exec(move |conn| Self::insert_with_conn(conn, new_wallet))
            .await
    }

    fn find_by_user_id_in_tx(
        &self,
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> Result<Option<Wallet>> {
        Self::find_with_conn(conn, user_id)
    }

    fn create_in_tx(&self, conn: &mut SqliteConnection, new_wallet: NewWallet) -> Result<Wallet> {
        Self::insert_with_conn(conn, new_wallet)
    }

    fn update_balances_in_tx(
        &self,
        conn: &mut SqliteConnection,
        wallet_id: &str,
        balance: Decimal,
        referral_balance: Decimal,
    ) -> Result<Wallet> {
        diesel::update(wallets::table.find(wallet_id))
            .set((
                wallets::balance.eq(balance.to_string()),
                wallets::referral_balance.eq(referral_balance.to_string()),
                wallets::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(conn)
            .into_core()?;

        wallets::table
            .select(WalletDB::as_select())
            .find(wallet_id)
            .first::<WalletDB>(conn)
            .into_core()?
            .try_into()
    }
}
