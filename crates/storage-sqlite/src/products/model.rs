//! Database model for products.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use agrivest_core::errors::Error;
use agrivest_core::products::{NewProduct, Product, ProductStatus};

use crate::utils::{parse_enum, parse_money};

/// Database model for products
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
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductDB {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub target_amount: String,
    pub current_amount: String,
    pub unit_amount: String,
    pub cycle_months: i32,
    pub return_per_cycle: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl TryFrom<ProductDB> for Product {
    type Error = Error;

    fn try_from(db: ProductDB) -> Result<Self, Error> {
        Ok(Self {
            target_amount: parse_money(&db.target_amount, "products.target_amount")?,
            current_amount: parse_money(&db.current_amount, "products.current_amount")?,
            unit_amount: parse_money(&db.unit_amount, "products.unit_amount")?,
            return_per_cycle: parse_money(&db.return_per_cycle, "products.return_per_cycle")?,
            status: parse_enum(ProductStatus::parse(&db.status), "products.status", &db.status)?,
            id: db.id,
            title: db.title,
            description: db.description,
            cycle_months: db.cycle_months,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewProduct> for ProductDB {
    fn from(domain: NewProduct) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: domain.title,
            description: domain.description,
            target_amount: domain.target_amount.to_string(),
            current_amount: Decimal::ZERO.to_string(),
            unit_amount: domain.unit_amount.to_string(),
            cycle_months: domain.cycle_months,
            return_per_cycle: domain.return_per_cycle.to_string(),
            status: ProductStatus::Active.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
