//! In-memory repository for task lifecycle tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::UserId;
use crate::ledger::{adapters::memory::InMemoryLedgerRepository, domain::CreditEntry};
use crate::skill::domain::SkillId;
use crate::task::{
    domain::{ConfirmationStatus, Task, TaskCompletion, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Settlement writes hold the task lock and then the ledger lock for the
/// whole write, so readers never observe a half-applied transition.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
    ledger: InMemoryLedgerRepository,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    completions: HashMap<TaskId, TaskCompletion>,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository with its own ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository appending to `ledger`.
    #[must_use]
    pub fn with_ledger(ledger: InMemoryLedgerRepository) -> Self {
        Self {
            state: Arc::default(),
            ledger,
        }
    }

    /// Returns the ledger this repository appends to.
    #[must_use]
    pub const fn ledger(&self) -> &InMemoryLedgerRepository {
        &self.ledger
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn newest_first(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
    tasks
}

fn ensure_status(state: &InMemoryTaskState, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()> {
    let stored = state
        .tasks
        .get(&task.id())
        .ok_or(TaskRepositoryError::NotFound(task.id()))?;
    if stored.status() != expected {
        return Err(TaskRepositoryError::Conflict {
            task_id: task.id(),
            expected,
        });
    }
    Ok(())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_requester(&self, requester: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let requested = state
            .tasks
            .values()
            .filter(|task| task.requester_id() == requester)
            .cloned()
            .collect();
        Ok(newest_first(requested))
    }

    async fn find_open_for_skills(&self, skills: &[SkillId]) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let incoming = state
            .tasks
            .values()
            .filter(|task| task.status() == TaskStatus::Open && task.provider_id().is_none())
            .filter(|task| task.skill_id().is_some_and(|skill| skills.contains(&skill)))
            .cloned()
            .collect();
        Ok(newest_first(incoming))
    }

    async fn compare_and_update(
        &self,
        task: &Task,
        expected: TaskStatus,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        ensure_status(&state, task, expected)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn record_completion(
        &self,
        task: &Task,
        completion: &TaskCompletion,
        earned: &CreditEntry,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        ensure_status(&state, task, TaskStatus::Accepted)?;
        if state.completions.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateCompletion(task.id()));
        }
        let mut entries = self.ledger.entries().write().map_err(lock_error)?;
        state.tasks.insert(task.id(), task.clone());
        state.completions.insert(task.id(), completion.clone());
        entries.push(earned.clone());
        Ok(())
    }

    async fn find_completion(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Option<TaskCompletion>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.completions.get(&task_id).cloned())
    }

    async fn record_confirmation(
        &self,
        completion: &TaskCompletion,
        spent: &CreditEntry,
    ) -> TaskRepositoryResult<()> {
        let task_id = completion.task_id();
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .completions
            .get_mut(&task_id)
            .ok_or(TaskRepositoryError::NotFound(task_id))?;
        if stored.confirmation_status() != ConfirmationStatus::Pending {
            return Err(TaskRepositoryError::ConfirmationConflict(task_id));
        }
        let mut entries = self.ledger.entries().write().map_err(lock_error)?;
        *stored = completion.clone();
        entries.push(spent.clone());
        Ok(())
    }

    async fn approved_credits_for_provider(&self, provider: UserId) -> TaskRepositoryResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .completions
            .values()
            .filter(|completion| completion.provider_id() == provider)
            .filter(|completion| completion.confirmation_status() == ConfirmationStatus::Approved)
            .map(|completion| u64::from(completion.credits_transferred().value()))
            .sum())
    }
}
