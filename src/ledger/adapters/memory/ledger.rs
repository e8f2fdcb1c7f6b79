//! In-memory ledger shared with the in-memory task repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::identity::UserId;
use crate::ledger::{
    domain::CreditEntry,
    ports::{LedgerRepository, LedgerRepositoryError, LedgerRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory ledger.
///
/// Clones share the same entry list, so a task repository built with
/// [`crate::task::adapters::memory::InMemoryTaskRepository::with_ledger`]
/// appends entries this repository then reads.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerRepository {
    entries: Arc<RwLock<Vec<CreditEntry>>>,
}

impl InMemoryLedgerRepository {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) const fn entries(&self) -> &Arc<RwLock<Vec<CreditEntry>>> {
        &self.entries
    }
}

fn lock_error(err: impl ToString) -> LedgerRepositoryError {
    LedgerRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    async fn entries_for_user(&self, user: UserId) -> LedgerRepositoryResult<Vec<CreditEntry>> {
        let entries = self.entries.read().map_err(lock_error)?;
        let mut owned: Vec<CreditEntry> = entries
            .iter()
            .filter(|entry| entry.user_id() == user)
            .cloned()
            .collect();
        owned.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        Ok(owned)
    }

    async fn entries_for_task(&self, task_id: TaskId) -> LedgerRepositoryResult<Vec<CreditEntry>> {
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries
            .iter()
            .filter(|entry| entry.related_task_id() == Some(task_id))
            .cloned()
            .collect())
    }
}
