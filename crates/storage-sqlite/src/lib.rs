//! SQLite storage implementation for the Agrivest ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `agrivest-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The transaction executor backing the ledger's atomic units
//! - Repository implementations for all domain entities
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

// Repository implementations
pub mod entries;
pub mod investments;
pub mod products;
pub mod wallets;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, DbTransactionExecutor, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from agrivest-core for convenience
pub use agrivest_core::errors::{DatabaseError, Error, Result};
