//! Transaction executor seam between the ledger core and the storage layer.
//!
//! Pool construction, migrations, and repositories live in the storage
//! crate; this module only defines the executor contract and its pool-backed
//! implementation so services can stay generic over it.

use std::sync::Arc;

use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;

use crate::errors::{DatabaseError, Error, Result};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Trait for executing database transactions.
///
/// The closure receives the transaction's connection. Returning `Err` rolls
/// back every statement issued on that connection, and the closure's error is
/// handed back to the caller unchanged, so typed failures such as
/// `InsufficientFunds` survive the rollback.
pub trait DbTransactionExecutor {
    /// Execute operations within a single transaction and return the result.
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T>;
}

/// Distinguishes a closure abort from the transaction machinery failing to
/// begin or commit, so the closure's typed error reaches the caller intact.
enum TxError {
    Abort(Error),
    Tx(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(e: diesel::result::Error) -> Self {
        TxError::Tx(e)
    }
}

/// Runs a closure inside a `BEGIN IMMEDIATE` transaction.
///
/// Immediate mode takes the write lock up front, so the check-then-act
/// sequences inside ledger operations never interleave with another writer.
pub fn immediate_tx<F, T>(conn: &mut SqliteConnection, f: F) -> Result<T>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T>,
{
    conn.immediate_transaction::<T, TxError, _>(|tx_conn| f(tx_conn).map_err(TxError::Abort))
        .map_err(|e| match e {
            TxError::Abort(err) => err,
            TxError::Tx(e) => Error::Database(DatabaseError::TransactionFailed(e.to_string())),
        })
}

/// Implementation of DbTransactionExecutor for DbPool
impl DbTransactionExecutor for DbPool {
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T>,
    {
        let mut conn = self
            .get()
            .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))?;
        immediate_tx(&mut conn, f)
    }
}

/// Implementation of DbTransactionExecutor for Arc<DbPool>
impl DbTransactionExecutor for Arc<DbPool> {
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T>,
    {
        (**self).execute(f)
    }
}
