//! Investments module - units purchased per user per product.

mod certificate;
mod investments_model;
mod investments_service;
mod investments_traits;


pub use certificate::generate_certificate_token;
pub use investments_model::{Investment, InvestmentStatus, NewInvestment};
pub use investments_service::InvestmentService;
pub use investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
