//! Ledger service trait.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::investments::Investment;
use crate::wallets::Wallet;

/// Trait defining the contract for the atomic fund-movement operations.
///
/// Each method either applies all of its effects or none of them; on error
/// the caller observes the pre-call state unchanged. The `user_id` arguments
/// are authenticated identities supplied by the calling layer.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Purchases `units` of a product from the user's wallet balance.
    ///
    /// Debits the wallet, logs an INVESTMENT entry, advances the product's
    /// funding progress (flipping it to FUNDED when the target is reached),
    /// and records the investment.
    async fn invest(&self, user_id: &str, product_id: &str, units: i64) -> Result<Investment>;

    /// Credits a confirmed deposit to the user's wallet, creating it on
    /// first use. When `reference` is given, replaying the same reference is
    /// a no-op, so gateway confirmations can be retried safely.
    async fn fund_wallet(
        &self,
        user_id: &str,
        amount: Decimal,
        reference: Option<String>,
    ) -> Result<Wallet>;

    /// Debits the user's wallet for an external payout.
    async fn withdraw(&self, user_id: &str, amount: Decimal) -> Result<Wallet>;

    /// Moves the entire referral balance into the spendable balance.
    async fn transfer_referral_bonus(&self, user_id: &str) -> Result<Wallet>;

    /// Credits the signup bonus to a referrer's referral balance. Keyed by
    /// the referred user, so a retried registration cannot double-award.
    async fn award_referral_bonus(
        &self,
        referrer_user_id: &str,
        referred_user_id: &str,
    ) -> Result<Wallet>;
}
