//! Payment gateway and deposit service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::payments_model::{InitializePayment, PaymentSession, PaymentVerification};
use crate::errors::Result;
use crate::wallets::Wallet;

/// Trait defining the contract with the external payment gateway.
///
/// The gateway holds the money until verification; nothing is credited to a
/// wallet on this trait's say-so alone.
#[async_trait]
pub trait PaymentGatewayTrait: Send + Sync {
    /// Opens a hosted payment page for the given request.
    async fn initialize_payment(&self, request: InitializePayment) -> Result<PaymentSession>;

    /// Verifies a payment by its reference.
    async fn verify_payment(&self, reference: &str) -> Result<PaymentVerification>;
}

/// Trait defining the contract for the wallet funding flow.
#[async_trait]
pub trait DepositServiceTrait: Send + Sync {
    /// Starts a gateway deposit and returns the session to redirect to.
    async fn start_deposit(
        &self,
        user_id: &str,
        email: &str,
        amount: Decimal,
    ) -> Result<PaymentSession>;

    /// Confirms a returned deposit: verifies the reference with the gateway
    /// and credits the settled amount. Safe to call more than once per
    /// reference.
    async fn confirm_deposit(&self, user_id: &str, reference: &str) -> Result<Wallet>;
}
