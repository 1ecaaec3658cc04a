use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::ledger_errors::LedgerError;
use super::ledger_traits::LedgerServiceTrait;
use crate::constants::{default_referral_bonus, REFERRAL_AWARD_REFERENCE_PREFIX};
use crate::db::DbTransactionExecutor;
use crate::entries::{EntryType, LedgerEntryRepositoryTrait, NewLedgerEntry};
use crate::errors::Result;
use crate::investments::{
    generate_certificate_token, Investment, InvestmentRepositoryTrait, NewInvestment,
};
use crate::products::{ProductRepositoryTrait, ProductStatus};
use crate::wallets::{NewWallet, Wallet, WalletRepositoryTrait};

/// The atomic fund-movement core (generic over the transaction executor).
///
/// All preconditions are re-read inside the transaction, never taken from a
/// cached read, so concurrent operations on the same wallet or product
/// cannot both pass a check and then both apply.
pub struct LedgerService<E: DbTransactionExecutor + Send + Sync + Clone> {
    wallet_repository: Arc<dyn WalletRepositoryTrait>,
    entry_repository: Arc<dyn LedgerEntryRepositoryTrait>,
    product_repository: Arc<dyn ProductRepositoryTrait>,
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    transaction_executor: E,
    referral_bonus: Decimal,
}

impl<E: DbTransactionExecutor + Send + Sync + Clone> LedgerService<E> {
    /// Creates a new LedgerService instance with the default referral bonus.
    pub fn new(
        wallet_repository: Arc<dyn WalletRepositoryTrait>,
        entry_repository: Arc<dyn LedgerEntryRepositoryTrait>,
        product_repository: Arc<dyn ProductRepositoryTrait>,
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        transaction_executor: E,
    ) -> Self {
        Self {
            wallet_repository,
            entry_repository,
            product_repository,
            investment_repository,
            transaction_executor,
            referral_bonus: default_referral_bonus(),
        }
    }

    /// Overrides the per-signup referral bonus.
    pub fn with_referral_bonus(mut self, bonus: Decimal) -> Self {
        self.referral_bonus = bonus;
        self
    }
}

#[async_trait::async_trait]
impl<E: DbTransactionExecutor + Send + Sync + Clone> LedgerServiceTrait for LedgerService<E> {
    async fn invest(&self, user_id: &str, product_id: &str, units: i64) -> Result<Investment> {
        if units < 1 {
            return Err(LedgerError::InvalidUnits(units).into());
        }

        debug!(
            "User {} investing {} unit(s) in product {}",
            user_id, units, product_id
        );

        // Clones for the transaction closure
        let wallet_repo = self.wallet_repository.clone();
        let entry_repo = self.entry_repository.clone();
        let product_repo = self.product_repository.clone();
        let investment_repo = self.investment_repository.clone();
        let user_id = user_id.to_string();
        let product_id = product_id.to_string();
        let executor = self.transaction_executor.clone();

        executor.execute(move |conn| {
            let product = product_repo
                .find_by_id_in_tx(conn, &product_id)?
                .filter(|p| p.is_open())
                .ok_or_else(|| LedgerError::ProductUnavailable(product_id.clone()))?;

            let amount = product.unit_amount * Decimal::from(units);

            let wallet = wallet_repo
                .find_by_user_id_in_tx(conn, &user_id)?
                .ok_or_else(|| LedgerError::WalletNotFound(user_id.clone()))?;
            if !wallet.can_cover(amount) {
                return Err(LedgerError::InsufficientFunds {
                    balance: wallet.balance,
                    required: amount,
                }
                .into());
            }

            wallet_repo.update_balances_in_tx(
                conn,
                &wallet.id,
                wallet.balance - amount,
                wallet.referral_balance,
            )?;

            let entry = NewLedgerEntry::completed(&wallet.id, -amount, EntryType::Investment)
                .with_description(format!("Invested {} unit(s) in {}", units, product.title));
            entry_repo.create_in_tx(conn, entry)?;

            let funded = product_repo.add_funding_in_tx(conn, &product.id, amount)?;
            if funded.target_reached() && funded.status == ProductStatus::Active {
                product_repo.set_status_in_tx(conn, &product.id, ProductStatus::Funded)?;
            }

            let issued_at = Utc::now();
            let token = generate_certificate_token(&user_id, &product.id, units, &issued_at);
            let new_investment = NewInvestment {
                user_id: user_id.clone(),
                product_id: product.id.clone(),
                units,
                amount,
                certificate_token: Some(token),
            };
            new_investment.validate()?;
            investment_repo.create_in_tx(conn, new_investment)
        })
    }

    async fn fund_wallet(
        &self,
        user_id: &str,
        amount: Decimal,
        reference: Option<String>,
    ) -> Result<Wallet> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount).into());
        }

        let wallet_repo = self.wallet_repository.clone();
        let entry_repo = self.entry_repository.clone();
        let user_id = user_id.to_string();
        let executor = self.transaction_executor.clone();

        executor.execute(move |conn| {
            let wallet = match wallet_repo.find_by_user_id_in_tx(conn, &user_id)? {
                Some(wallet) => wallet,
                None => wallet_repo.create_in_tx(
                    conn,
                    NewWallet {
                        user_id: user_id.clone(),
                    },
                )?,
            };

            if let Some(reference) = reference.as_deref() {
                if let Some(existing) = entry_repo.find_by_reference_in_tx(conn, reference)? {
                    debug!(
                        "Deposit {} already applied as entry {}, skipping",
                        reference, existing.id
                    );
                    return Ok(wallet);
                }
            }

            let mut entry = NewLedgerEntry::completed(&wallet.id, amount, EntryType::Deposit)
                .with_description("Wallet funding");
            if let Some(reference) = reference.clone() {
                entry = entry.with_reference(reference);
            }
            entry_repo.create_in_tx(conn, entry)?;

            wallet_repo.update_balances_in_tx(
                conn,
                &wallet.id,
                wallet.balance + amount,
                wallet.referral_balance,
            )
        })
    }

    async fn withdraw(&self, user_id: &str, amount: Decimal) -> Result<Wallet> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount).into());
        }

        let wallet_repo = self.wallet_repository.clone();
        let entry_repo = self.entry_repository.clone();
        let user_id = user_id.to_string();
        let executor = self.transaction_executor.clone();

        executor.execute(move |conn| {
            let wallet = wallet_repo
                .find_by_user_id_in_tx(conn, &user_id)?
                .ok_or_else(|| LedgerError::WalletNotFound(user_id.clone()))?;
            if !wallet.can_cover(amount) {
                return Err(LedgerError::InsufficientFunds {
                    balance: wallet.balance,
                    required: amount,
                }
                .into());
            }

            let entry = NewLedgerEntry::completed(&wallet.id, -amount, EntryType::Withdrawal)
                .with_description("Wallet withdrawal");
            entry_repo.create_in_tx(conn, entry)?;

            wallet_repo.update_balances_in_tx(
                conn,
                &wallet.id,
                wallet.balance - amount,
                wallet.referral_balance,
            )
        })
    }

    async fn transfer_referral_bonus(&self, user_id: &str) -> Result<Wallet> {
        let wallet_repo = self.wallet_repository.clone();
        let entry_repo = self.entry_repository.clone();
        let user_id = user_id.to_string();
        let executor = self.transaction_executor.clone();

        executor.execute(move |conn| {
            let wallet = wallet_repo
                .find_by_user_id_in_tx(conn, &user_id)?
                .ok_or_else(|| LedgerError::WalletNotFound(user_id.clone()))?;
            if !wallet.has_referral_balance() {
                return Err(LedgerError::NoReferralBalance.into());
            }

            let bonus = wallet.referral_balance;
            let entry = NewLedgerEntry::completed(&wallet.id, bonus, EntryType::ReferralBonus)
                .with_description("Referral bonus transferred to balance");
            entry_repo.create_in_tx(conn, entry)?;

            wallet_repo.update_balances_in_tx(
                conn,
                &wallet.id,
                wallet.balance + bonus,
                Decimal::ZERO,
            )
        })
    }

    async fn award_referral_bonus(
        &self,
        referrer_user_id: &str,
        referred_user_id: &str,
    ) -> Result<Wallet> {
        let wallet_repo = self.wallet_repository.clone();
        let entry_repo = self.entry_repository.clone();
        let referrer_user_id = referrer_user_id.to_string();
        let referred_user_id = referred_user_id.to_string();
        let bonus = self.referral_bonus;
        let executor = self.transaction_executor.clone();

        executor.execute(move |conn| {
            let wallet = match wallet_repo.find_by_user_id_in_tx(conn, &referrer_user_id)? {
                Some(wallet) => wallet,
                None => wallet_repo.create_in_tx(
                    conn,
                    NewWallet {
                        user_id: referrer_user_id.clone(),
                    },
                )?,
            };

            let reference = format!(
                "{}{}",
                REFERRAL_AWARD_REFERENCE_PREFIX, referred_user_id
            );
            if let Some(existing) = entry_repo.find_by_reference_in_tx(conn, &reference)? {
                debug!(
                    "Referral bonus for {} already awarded as entry {}, skipping",
                    referred_user_id, existing.id
                );
                return Ok(wallet);
            }

            // PENDING until transferred: the bonus is not spendable yet and
            // must not count toward the main balance.
            let entry = NewLedgerEntry::pending(&wallet.id, bonus, EntryType::ReferralBonus)
                .with_reference(reference)
                .with_description(format!("Referral bonus for signup of {}", referred_user_id));
            entry_repo.create_in_tx(conn, entry)?;

            wallet_repo.update_balances_in_tx(
                conn,
                &wallet.id,
                wallet.balance,
                wallet.referral_balance + bonus,
            )
        })
    }
}
