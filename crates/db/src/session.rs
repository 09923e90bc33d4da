//! Request-scoped database session.

use sqlx::{PgConnection, Postgres, Transaction};

use crate::DbPool;

/// A unit of work bound to a single request.
///
/// The transaction is opened lazily on the first call to [`DbSession::conn`],
/// so requests rejected before reaching the database never check out a
/// connection. Work becomes visible only after [`DbSession::commit`]; a session
/// dropped without committing (handler error, panic, client disconnect) rolls
/// back when the underlying transaction is dropped.
pub struct DbSession {
    pool: DbPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl DbSession {
    pub fn new(pool: DbPool) -> Self {
        Self { pool, tx: None }
    }

    /// Connection for the session's transaction, beginning it on first use.
    pub async fn conn(&mut self) -> Result<&mut PgConnection, sqlx::Error> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        Ok(&mut **self.tx.insert(tx))
    }

    /// Whether a transaction has been opened and not yet finished.
    pub fn is_active(&self) -> bool {
        self.tx.is_some()
    }

    /// Commit the open transaction, if any. The session may be reused afterwards.
    pub async fn commit(&mut self) -> Result<(), sqlx::Error> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    /// Roll back the open transaction, if any.
    pub async fn rollback(&mut self) -> Result<(), sqlx::Error> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
        }
        Ok(())
    }
}
