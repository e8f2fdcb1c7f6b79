//! Read-only repository port for credit entries.
//!
//! Appends happen inside the task repository's settlement writes so that a
//! ledger entry never exists without the transition that produced it.

use crate::identity::UserId;
use crate::ledger::domain::CreditEntry;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for ledger repository operations.
pub type LedgerRepositoryResult<T> = Result<T, LedgerRepositoryError>;

/// Ledger read contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Returns every entry for `user`, newest first.
    async fn entries_for_user(&self, user: UserId) -> LedgerRepositoryResult<Vec<CreditEntry>>;

    /// Returns the entries caused by `task_id`, oldest first.
    async fn entries_for_task(&self, task_id: TaskId) -> LedgerRepositoryResult<Vec<CreditEntry>>;
}

/// Errors returned by ledger repository implementations.
#[derive(Debug, Clone, Error)]
pub enum LedgerRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LedgerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
