//! Payment gateway domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to open a hosted payment page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializePayment {
    pub email: String,
    pub amount: Decimal,
    /// Caller-chosen reference, later used for verification and as the
    /// ledger idempotency key.
    pub reference: String,
    pub callback_url: Option<String>,
    pub metadata: Option<Value>,
}

/// A hosted payment session the user is redirected to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    pub reference: String,
    pub authorization_url: String,
}

/// Settlement state reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Success,
    Failed,
    Pending,
}

/// Result of verifying a payment by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerification {
    pub reference: String,
    /// Amount the gateway actually settled, which is what gets credited.
    pub amount: Decimal,
    pub status: PaymentStatus,
}

impl PaymentVerification {
    pub fn is_successful(&self) -> bool {
        self.status == PaymentStatus::Success
    }
}
