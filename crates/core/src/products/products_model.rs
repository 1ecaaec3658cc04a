//! Product domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Funding lifecycle of a product.
///
/// ACTIVE products accept investments. FUNDED is set automatically when the
/// funding target is reached. COMPLETED is a terminal administrative state
/// set when the product's cycle ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    #[default]
    Active,
    Funded,
    Completed,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Funded => "FUNDED",
            ProductStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(ProductStatus::Active),
            "FUNDED" => Some(ProductStatus::Funded),
            "COMPLETED" => Some(ProductStatus::Completed),
            _ => None,
        }
    }
}

/// Domain model representing an investable product.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Funding goal. Once `current_amount` reaches it, the product is FUNDED.
    pub target_amount: Decimal,
    /// Funds raised so far. Only increases, and only via investments.
    pub current_amount: Decimal,
    /// Price of one purchasable unit.
    pub unit_amount: Decimal,
    /// Length of one funding cycle, in months.
    pub cycle_months: i32,
    /// Return per cycle, as a percentage.
    pub return_per_cycle: Decimal,
    pub status: ProductStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Whether the product currently accepts investments.
    pub fn is_open(&self) -> bool {
        self.status == ProductStatus::Active
    }

    /// Whether the funding goal has been reached.
    ///
    /// The crossing investment may overshoot the target; the overshoot is
    /// accepted and the product still flips to FUNDED.
    pub fn target_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

/// Input model for creating a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub unit_amount: Decimal,
    pub cycle_months: i32,
    pub return_per_cycle: Decimal,
}

impl NewProduct {
    /// Validates the new product data.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Product title cannot be empty".to_string(),
            )));
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Target amount must be positive".to_string(),
            )));
        }
        if self.unit_amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Unit amount must be positive".to_string(),
            )));
        }
        if self.unit_amount > self.target_amount {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Unit amount cannot exceed the target amount".to_string(),
            )));
        }
        if self.cycle_months < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Cycle must be at least one month".to_string(),
            )));
        }
        if self.return_per_cycle < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Return per cycle cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating a product's descriptive fields.
///
/// Funding amounts and status are never written through updates; the ledger
/// and the completion transition own those.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub cycle_months: i32,
    pub return_per_cycle: Decimal,
}

impl ProductUpdate {
    /// Validates the product update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Product title cannot be empty".to_string(),
            )));
        }
        if self.cycle_months < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Cycle must be at least one month".to_string(),
            )));
        }
        Ok(())
    }
}
