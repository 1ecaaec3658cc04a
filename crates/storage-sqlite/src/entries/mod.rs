mod model;
mod repository;

pub use model::LedgerEntryDB;
pub use repository::LedgerEntryRepository;
