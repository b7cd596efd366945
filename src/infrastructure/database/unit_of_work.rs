//! Unit of Work
//!
//! Transactional boundary for multi-statement writes. All statements issued
//! through the connection handed to the closure either commit together or
//! are rolled back together.

use std::time::Instant;

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};

use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Run `work` inside a single database transaction.
///
/// Commits when `work` returns `Ok`. On `Err` the transaction is rolled back
/// explicitly and the original error is returned; if the rollback itself
/// fails, the rollback failure is returned instead since the state of the
/// transaction is then unknown.
///
/// The closure receives the transaction's connection and must return a boxed
/// future borrowing it. Data the future needs must be moved in (owned), not
/// borrowed from the caller. The error type only has to absorb `sqlx::Error`,
/// so repositories can report their own refusal reasons from inside.
///
/// # Example
/// ```ignore
/// let room = room.clone();
/// in_transaction::<_, AppError, _>(&pool, "create_room", move |conn| Box::pin(async move {
///     insert_room(conn, &room).await?;
///     insert_admin(conn, room.id, room.creator_id).await?;
///     Ok(room)
/// })).await?;
/// ```
pub async fn in_transaction<T, E, F>(pool: &PgPool, operation: &'static str, work: F) -> Result<T, E>
where
    T: Send,
    E: From<sqlx::Error> + std::fmt::Display + Send,
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, E>> + Send,
{
    let started = Instant::now();
    let mut tx = match pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            metrics::record_db_query(operation, "transaction", started.elapsed().as_secs_f64());
            return Err(E::from(e));
        }
    };

    let outcome = work(&mut *tx).await;

    let result = match outcome {
        Ok(value) => match tx.commit().await {
            Ok(()) => Ok(value),
            Err(commit_err) => {
                tracing::error!(operation, error = %commit_err, "Transaction commit failed");
                Err(E::from(commit_err))
            }
        },
        Err(err) => {
            tracing::debug!(operation, error = %err, "Rolling back transaction");
            match tx.rollback().await {
                Ok(()) => Err(err),
                Err(rollback_err) => {
                    tracing::error!(
                        operation,
                        error = %err,
                        rollback_error = %rollback_err,
                        "Transaction rollback failed"
                    );
                    Err(E::from(rollback_err))
                }
            }
        }
    };

    metrics::record_db_query(operation, "transaction", started.elapsed().as_secs_f64());
    result
}
