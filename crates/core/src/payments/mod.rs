//! Payments module - hosted payment gateway collaborator and deposit flow.

mod deposits_service;
mod gateway_client;
mod payments_model;
mod payments_traits;


pub use deposits_service::DepositService;
pub use gateway_client::HostedPaymentGateway;
pub use payments_model::{
    InitializePayment, PaymentSession, PaymentStatus, PaymentVerification,
};
pub use payments_traits::{DepositServiceTrait, PaymentGatewayTrait};
