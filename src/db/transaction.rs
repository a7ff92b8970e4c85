/*!
 * Transaction helper
 *
 * Runs a unit of work inside a database transaction and hands back the
 * caller's own error type, so typed business errors survive the rollback.
 */

use metrics::counter;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionError, TransactionTrait};
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

/// Type alias for boxed future used in transactions
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Execute a function within a database transaction
///
/// Commits when `f` returns `Ok`, rolls back otherwise. The error returned by
/// `f` is passed through unchanged; failures to begin or commit are converted
/// with `E::from(DbErr)`.
///
/// ```rust,ignore
/// let sale = with_transaction(&db, move |txn| {
///     Box::pin(async move {
///         stocks.decrement(txn, car_id, 1).await?;
///         sales.create(txn, new_sale).await
///     })
/// })
/// .await?;
/// ```
pub async fn with_transaction<F, T, E>(db: &DatabaseConnection, f: F) -> Result<T, E>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T, E>> + Send,
    T: Send,
    E: std::error::Error + From<DbErr> + Send,
{
    match db.transaction(f).await {
        Ok(value) => {
            counter!("carshop_db.transaction.committed", 1);
            Ok(value)
        }
        Err(TransactionError::Connection(db_err)) => {
            counter!("carshop_db.transaction.failed", 1);
            Err(E::from(db_err))
        }
        Err(TransactionError::Transaction(err)) => {
            counter!("carshop_db.transaction.rolled_back", 1);
            debug!(error = %err, "transaction rolled back");
            Err(err)
        }
    }
}
