use std::any::Any;

use diesel::sqlite::SqliteConnection;
use log::error;
use tokio::sync::{mpsc, oneshot};

use agrivest_core::errors::{Error, Result};

use super::{immediate_tx, DbPool};

// Type alias for the job to be executed by the writer actor. Each job takes
// the actor's dedicated connection; the Box<dyn Any + Send> return erases the
// job's result type for transport over the channel.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside an immediate transaction; its typed error is
    /// returned unchanged when it aborts.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| Error::Unexpected("Database writer is not running".to_string()))?;

        let boxed = ret_rx
            .await
            .map_err(|_| Error::Unexpected("Database writer dropped the reply".to_string()))??;
        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Unexpected("Database writer returned an unexpected type".to_string())
        })
    }
}

/// Spawns a background Tokio task that acts as a single writer to the
/// database. The actor owns one connection from the pool and applies write
/// jobs serially, each inside an immediate transaction.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Database writer could not acquire a connection: {}", e);
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result = immediate_tx(&mut conn, job);
            // Ignore error if the receiver has dropped (e.g., the request
            // was cancelled).
            let _ = reply_tx.send(result);
        }
        // rx.recv() returning None means every WriteHandle was dropped and
        // the actor can terminate.
    });

    WriteHandle { tx }
}
