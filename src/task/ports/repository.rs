//! Repository port for task persistence and settlement writes.

use crate::error::ErrorKind;
use crate::identity::UserId;
use crate::ledger::domain::CreditEntry;
use crate::skill::domain::SkillId;
use crate::task::domain::{Task, TaskCompletion, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The settlement methods write several relations at once and must either
/// apply every write or none of them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks `requester` asked for, newest first.
    async fn find_by_requester(&self, requester: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns open, unclaimed tasks linked to any of `skills`, newest first.
    async fn find_open_for_skills(&self, skills: &[SkillId]) -> TaskRepositoryResult<Vec<Task>>;

    /// Replaces the stored task only if its status is still `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Conflict`] when the stored status
    /// differs and [`TaskRepositoryError::NotFound`] when the task is gone.
    async fn compare_and_update(&self, task: &Task, expected: TaskStatus)
    -> TaskRepositoryResult<()>;

    /// Atomically stores the completed task, its pending completion record,
    /// and the provider's earned entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Conflict`] when the task is no longer
    /// accepted and [`TaskRepositoryError::DuplicateCompletion`] when a
    /// completion already exists. Nothing is written on error.
    async fn record_completion(
        &self,
        task: &Task,
        completion: &TaskCompletion,
        earned: &CreditEntry,
    ) -> TaskRepositoryResult<()>;

    /// Finds the completion record of a task.
    async fn find_completion(&self, task_id: TaskId)
    -> TaskRepositoryResult<Option<TaskCompletion>>;

    /// Atomically approves a pending completion and appends the requester's
    /// spent entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::ConfirmationConflict`] when the stored
    /// completion is no longer pending. Nothing is written on error.
    async fn record_confirmation(
        &self,
        completion: &TaskCompletion,
        spent: &CreditEntry,
    ) -> TaskRepositoryResult<()>;

    /// Sums the credits of approved completions where `provider` did the
    /// work.
    async fn approved_credits_for_provider(&self, provider: UserId) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored status no longer matches the expected prior status.
    #[error("task {task_id} is no longer {expected}")]
    Conflict {
        /// Task that lost the race.
        task_id: TaskId,
        /// Status the writer expected.
        expected: TaskStatus,
    },

    /// A completion record already exists for the task.
    #[error("task {0} already has a completion record")]
    DuplicateCompletion(TaskId),

    /// The completion was approved concurrently.
    #[error("completion for task {0} is no longer pending")]
    ConfirmationConflict(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateTask(_)
            | Self::Conflict { .. }
            | Self::DuplicateCompletion(_)
            | Self::ConfirmationConflict(_) => ErrorKind::Conflict,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
