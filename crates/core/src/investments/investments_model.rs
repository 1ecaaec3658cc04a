//! Investment domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Lifecycle of an investment.
///
/// ACTIVE until the product's cycle matures; COMPLETED is set
/// administratively when returns are realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentStatus {
    #[default]
    Active,
    Completed,
}

impl InvestmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentStatus::Active => "ACTIVE",
            InvestmentStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(InvestmentStatus::Active),
            "COMPLETED" => Some(InvestmentStatus::Completed),
            _ => None,
        }
    }
}

/// Domain model representing units purchased in a product.
///
/// Created exactly once per successful ledger transaction and immutable
/// afterwards except for the maturity status transition.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub units: i64,
    /// `units * product.unit_amount` at purchase time.
    pub amount: Decimal,
    pub status: InvestmentStatus,
    /// Opaque token later embedded in the investor's certificate.
    pub certificate_token: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for recording an investment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub user_id: String,
    pub product_id: String,
    pub units: i64,
    pub amount: Decimal,
    pub certificate_token: Option<String>,
}

impl NewInvestment {
    /// Validates the new investment data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.product_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "productId".to_string(),
            )));
        }
        if self.units < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Units must be a positive whole number".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Investment amount must be positive".to_string(),
            )));
        }
        Ok(())
    }
}
