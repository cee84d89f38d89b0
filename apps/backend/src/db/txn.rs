use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

/// Boxed future borrowing the transaction for its whole lifetime.
pub type TxnFuture<'a, R, E> = Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'a>>;

/// Run `f` inside a transaction: commit on `Ok`, roll back on `Err`.
///
/// ```ignore
/// with_txn(db, |txn| Box::pin(async move { rooms::require_room(txn, id).await })).await
/// ```
pub async fn with_txn<R, E, F>(db: &DatabaseConnection, f: F) -> Result<R, E>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R, E>,
    E: From<DbErr>,
{
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; the original error wins
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
