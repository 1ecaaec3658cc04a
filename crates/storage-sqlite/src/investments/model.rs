//! Database model for investments.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use agrivest_core::errors::Error;
use agrivest_core::investments::{Investment, InvestmentStatus, NewInvestment};

use crate::utils::{parse_enum, parse_money};

/// Database model for investments
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
#[diesel(table_name = crate::schema::investments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentDB {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub units: i64,
    pub amount: String,
    pub status: String,
    pub certificate_token: Option<String>,
    pub created_at: NaiveDateTime,
}

// Conversion implementations
impl TryFrom<InvestmentDB> for Investment {
    type Error = Error;

    fn try_from(db: InvestmentDB) -> Result<Self, Error> {
        Ok(Self {
            amount: parse_money(&db.amount, "investments.amount")?,
            status: parse_enum(
                InvestmentStatus::parse(&db.status),
                "investments.status",
                &db.status,
            )?,
            id: db.id,
            user_id: db.user_id,
            product_id: db.product_id,
            units: db.units,
            certificate_token: db.certificate_token,
            created_at: db.created_at,
        })
    }
}

impl From<NewInvestment> for InvestmentDB {
    fn from(domain: NewInvestment) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: domain.user_id,
            product_id: domain.product_id,
            units: domain.units,
            amount: domain.amount.to_string(),
            status: InvestmentStatus::Active.as_str().to_string(),
            certificate_token: domain.certificate_token,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
