use log::{debug, info};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use super::payments_model::{InitializePayment, PaymentSession};
use super::payments_traits::{DepositServiceTrait, PaymentGatewayTrait};
use crate::constants::DEPOSIT_REFERENCE_PREFIX;
use crate::errors::Result;
use crate::ledger::{LedgerError, LedgerServiceTrait};
use crate::wallets::Wallet;

/// Service driving the gateway-backed wallet funding flow.
///
/// Money is only credited after the gateway confirms settlement; the ledger's
/// reference idempotency makes repeated confirmations harmless.
pub struct DepositService {
    gateway: Arc<dyn PaymentGatewayTrait>,
    ledger: Arc<dyn LedgerServiceTrait>,
}

impl DepositService {
    /// Creates a new DepositService instance.
    pub fn new(gateway: Arc<dyn PaymentGatewayTrait>, ledger: Arc<dyn LedgerServiceTrait>) -> Self {
        Self { gateway, ledger }
    }
}

#[async_trait::async_trait]
impl DepositServiceTrait for DepositService {
    async fn start_deposit(
        &self,
        user_id: &str,
        email: &str,
        amount: Decimal,
    ) -> Result<PaymentSession> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount).into());
        }

        let reference = format!("{}{}", DEPOSIT_REFERENCE_PREFIX, Uuid::new_v4());
        debug!(
            "Starting deposit {} of {} for user {}",
            reference, amount, user_id
        );

        self.gateway
            .initialize_payment(InitializePayment {
                email: email.to_string(),
                amount,
                reference,
                callback_url: None,
                metadata: Some(json!({ "userId": user_id })),
            })
            .await
    }

    async fn confirm_deposit(&self, user_id: &str, reference: &str) -> Result<Wallet> {
        let verification = self.gateway.verify_payment(reference).await?;
        if !verification.is_successful() {
            return Err(LedgerError::PaymentUnverified(reference.to_string()).into());
        }

        info!(
            "Deposit {} confirmed for user {}, crediting {}",
            verification.reference, user_id, verification.amount
        );
        self.ledger
            .fund_wallet(
                user_id,
                verification.amount,
                Some(verification.reference),
            )
            .await
    }
}
