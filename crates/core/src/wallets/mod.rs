//! Wallets module - domain models, services, and traits.

mod wallets_model;
mod wallets_service;
mod wallets_traits;

#[cfg(test)]
mod wallets_model_tests;

pub use wallets_model::{NewWallet, Wallet};
pub use wallets_service::WalletService;
pub use wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
