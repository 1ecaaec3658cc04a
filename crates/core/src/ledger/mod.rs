//! Ledger module - the atomic fund-movement core.
//!
//! Every mutation of wallet balances, the entry log, product funding
//! progress, and the investment register goes through [`LedgerService`],
//! which applies each operation as a single all-or-nothing unit.

mod ledger_errors;
mod ledger_service;
mod ledger_traits;

#[cfg(test)]
mod ledger_service_tests;

pub use ledger_errors::LedgerError;
pub use ledger_service::LedgerService;
pub use ledger_traits::LedgerServiceTrait;
