//! Investment repository and service traits.

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;

use super::investments_model::{Investment, InvestmentStatus, NewInvestment};
use crate::errors::Result;

/// Trait defining the contract for Investment repository operations.
#[async_trait]
pub trait InvestmentRepositoryTrait: Send + Sync {
    /// Retrieves an investment by its ID.
    fn get_by_id(&self, investment_id: &str) -> Result<Investment>;

    /// Lists a user's investments, newest first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Investment>>;

    /// Resolves a certificate token to its investment, if any.
    fn find_by_certificate_token(&self, token: &str) -> Result<Option<Investment>>;

    /// Sets an investment's status.
    async fn set_status(
        &self,
        investment_id: &str,
        status: InvestmentStatus,
    ) -> Result<Investment>;

    /// Records an investment within a transaction.
    fn create_in_tx(
        &self,
        conn: &mut SqliteConnection,
        new_investment: NewInvestment,
    ) -> Result<Investment>;
}

/// Trait defining the contract for Investment service operations.
#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    /// Retrieves an investment by ID.
    fn get_investment(&self, investment_id: &str) -> Result<Investment>;

    /// Lists a user's investments.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Investment>>;

    /// Resolves a certificate token back to its investment.
    fn verify_certificate(&self, token: &str) -> Result<Investment>;

    /// Administrative maturity transition.
    async fn complete_investment(&self, investment_id: &str) -> Result<Investment>;
}
