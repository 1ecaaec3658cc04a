use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use agrivest_core::errors::Result;
use agrivest_core::investments::{
    Investment, InvestmentRepositoryTrait, InvestmentStatus, NewInvestment,
};

use super::model::InvestmentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::investments;

/// Repository for managing investment data in the database
pub struct InvestmentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InvestmentRepository {
    /// Creates a new InvestmentRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl InvestmentRepositoryTrait for InvestmentRepository {
    fn get_by_id(&self, investment_id: &str) -> Result<Investment> {
        let mut conn = get_connection(&self.pool)?;

        investments::table
            .select(InvestmentDB::as_select())
            .find(investment_id)
            .first::<InvestmentDB>(&mut conn)
            .into_core()?
            .try_into()
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;

        let investments_db = investments::table
            .select(InvestmentDB::as_select())
            .filter(investments::user_id.eq(user_id))
            .order(investments::created_at.desc())
            .load::<InvestmentDB>(&mut conn)
            .into_core()?;

        investments_db
            .into_iter()
            .map(Investment::try_from)
            .collect()
    }

    fn find_by_certificate_token(&self, token: &str) -> Result<Option<Investment>> {
        let mut conn = get_connection(&self.pool)?;

        investments::table
            .select(InvestmentDB::as_select())
            .filter(investments::certificate_token.eq(token))
            .first::<InvestmentDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Investment::try_from)
            .transpose()
    }

    async fn set_status(
        &self,
        investment_id: &str,
        status: InvestmentStatus,
    ) -> Result<Investment> {
        let investment_id = investment_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::update(investments::table.find(&investment_id))
                    .set(investments::status.eq(status.as_str()))
                    .execute(conn)
                    .into_core()?;

                investments::table
                    .select(InvestmentDB::as_select())
                    .find(&investment_id)
                    .first::<InvestmentDB>(conn)
                    .into_core()?
                    .try_into()
            })
            .await
    }

    fn create_in_tx(
        &self,
        conn: &mut SqliteConnection,
        new_investment: NewInvestment,
    ) -> Result<Investment> {
        new_investment.validate()?;

        let investment_db: InvestmentDB = new_investment.into();
        diesel::insert_into(investments::table)
            .values(&investment_db)
            .execute(conn)
            .into_core()?;

        investment_db.try_into()
    }
}
