//! `PostgreSQL` repository implementation for ledger reads.

use super::{models::CreditRow, schema::credits};
use crate::identity::UserId;
use crate::ledger::{
    domain::CreditEntry,
    ports::{LedgerRepository, LedgerRepositoryError, LedgerRepositoryResult},
};
use crate::persistence::{PgPool, get_conn_with, run_blocking_with};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed ledger reader.
#[derive(Debug, Clone)]
pub struct PostgresLedgerRepository {
    pool: PgPool,
}

impl PostgresLedgerRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> LedgerRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> LedgerRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, LedgerRepositoryError::persistence)?;
                f(&mut connection)
            },
            LedgerRepositoryError::persistence,
        )
        .await
    }
}

fn rows_to_entries(rows: Vec<CreditRow>) -> LedgerRepositoryResult<Vec<CreditEntry>> {
    rows.into_iter()
        .map(|row| CreditEntry::try_from(row).map_err(LedgerRepositoryError::persistence))
        .collect()
}

#[async_trait]
impl LedgerRepository for PostgresLedgerRepository {
    async fn entries_for_user(&self, user: UserId) -> LedgerRepositoryResult<Vec<CreditEntry>> {
        self.run_blocking(move |connection| {
            let rows = credits::table
                .filter(credits::user_id.eq(user.into_inner()))
                .order((credits::created_at.desc(), credits::id.desc()))
                .select(CreditRow::as_select())
                .load::<CreditRow>(connection)
                .map_err(LedgerRepositoryError::persistence)?;
            rows_to_entries(rows)
        })
        .await
    }

    async fn entries_for_task(&self, task_id: TaskId) -> LedgerRepositoryResult<Vec<CreditEntry>> {
        self.run_blocking(move |connection| {
            let rows = credits::table
                .filter(credits::related_task_id.eq(task_id.into_inner()))
                .order(credits::created_at.asc())
                .select(CreditRow::as_select())
                .load::<CreditRow>(connection)
                .map_err(LedgerRepositoryError::persistence)?;
            rows_to_entries(rows)
        })
        .await
    }
}
