//! Ledger entries module - the append-only record of balance mutations.

mod entries_model;
mod entries_service;
mod entries_traits;


pub use entries_model::{
    EntryStatus, EntryType, LedgerEntry, NewLedgerEntry, ReconciliationReport,
};
pub use entries_service::LedgerEntryService;
pub use entries_traits::{LedgerEntryRepositoryTrait, LedgerEntryServiceTrait};
