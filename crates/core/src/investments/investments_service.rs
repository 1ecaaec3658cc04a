use log::info;
use std::sync::Arc;

use super::investments_model::{Investment, InvestmentStatus};
use super::investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
use crate::errors::Result;
use crate::ledger::LedgerError;

/// Service for reading and maturing investments.
pub struct InvestmentService {
    repository: Arc<dyn InvestmentRepositoryTrait>,
}

impl InvestmentService {
    /// Creates a new InvestmentService instance.
    pub fn new(repository: Arc<dyn InvestmentRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl InvestmentServiceTrait for InvestmentService {
    fn get_investment(&self, investment_id: &str) -> Result<Investment> {
        (*self.repository).get_by_id(investment_id)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Investment>> {
        (*self.repository).list_for_user(user_id)
    }

    /// Resolves a scanned certificate token back to its investment.
    fn verify_certificate(&self, token: &str) -> Result<Investment> {
        self.repository
            .find_by_certificate_token(token)?
            .ok_or_else(|| LedgerError::CertificateNotFound(token.to_string()).into())
    }

    async fn complete_investment(&self, investment_id: &str) -> Result<Investment> {
        let investment = self
            .repository
            .set_status(investment_id, InvestmentStatus::Completed)
            .await?;
        info!(
            "Completed investment {} for user {}",
            investment.id, investment.user_id
        );
        Ok(investment)
    }
}
