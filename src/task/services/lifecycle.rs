//! Service layer for creating, accepting, completing, and confirming tasks.

use crate::error::ErrorKind;
use crate::identity::{IdentityError, IdentityProvider};
use crate::ledger::domain::CreditEntry;
use crate::skill::{
    domain::{SkillCategory, SkillDomainError, SkillId},
    ports::{SkillRepository, SkillRepositoryError},
};
use crate::task::{
    domain::{
        ConfirmationStatus, Task, TaskCompletion, TaskDetails, TaskDomainError, TaskId, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Credits offered when a skill request does not name a value.
const DEFAULT_SKILL_REQUEST_CREDITS: i64 = 1;

/// Request payload for opening a help request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    credits_value: Option<i64>,
    description: Option<String>,
    category: Option<String>,
    skill_id: Option<SkillId>,
}

impl CreateTaskRequest {
    /// Creates a request with the title and credit value.
    #[must_use]
    pub fn new(title: impl Into<String>, credits_value: impl Into<Option<i64>>) -> Self {
        Self {
            title: title.into(),
            credits_value: credits_value.into(),
            description: None,
            category: None,
            skill_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category by name.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Links the request to an offered skill.
    #[must_use]
    pub const fn with_skill(mut self, skill_id: SkillId) -> Self {
        self.skill_id = Some(skill_id);
        self
    }
}

/// Request payload for asking a skill's owner for help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSkillHelpRequest {
    skill_id: SkillId,
    title: Option<String>,
    credits_value: i64,
}

impl RequestSkillHelpRequest {
    /// Creates a request for `skill_id` worth one credit.
    #[must_use]
    pub const fn new(skill_id: SkillId) -> Self {
        Self {
            skill_id,
            title: None,
            credits_value: DEFAULT_SKILL_REQUEST_CREDITS,
        }
    }

    /// Overrides the default `Get help with: <skill>` title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the credit value.
    #[must_use]
    pub const fn with_credits(mut self, credits_value: i64) -> Self {
        self.credits_value = credits_value;
        self
    }
}

/// Outcome of a successful completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTask {
    /// The task, now completed.
    pub task: Task,
    /// The pending completion record.
    pub completion: TaskCompletion,
    /// The provider's earned entry.
    pub earned: CreditEntry,
}

/// Outcome of a successful confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedCompletion {
    /// The approved completion record.
    pub completion: TaskCompletion,
    /// The requester's spent entry.
    pub spent: CreditEntry,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// No authenticated principal.
    #[error(transparent)]
    Authentication(#[from] IdentityError),
    /// Domain validation or a lifecycle guard failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The category name is not recognised.
    #[error(transparent)]
    InvalidCategory(#[from] SkillDomainError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The linked skill does not exist.
    #[error("skill not found: {0}")]
    SkillNotFound(SkillId),
    /// Another party changed the task between read and write.
    #[error("task {0} was modified concurrently")]
    Conflict(TaskId),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Skill repository operation failed.
    #[error(transparent)]
    SkillRepository(#[from] SkillRepositoryError),
}

impl TaskLifecycleError {
    /// Classifies the error for user-facing reporting.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Domain(err) => err.kind(),
            Self::InvalidCategory(_) => ErrorKind::Validation,
            Self::TaskNotFound(_) | Self::SkillNotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Repository(err) => err.kind(),
            Self::SkillRepository(SkillRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::SkillRepository(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, S, C>
where
    R: TaskRepository,
    S: SkillRepository,
    C: Clock + Send + Sync,
{
    pub(super) repository: Arc<R>,
    pub(super) skills: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> TaskLifecycleService<R, S, C>
where
    R: TaskRepository,
    S: SkillRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, skills: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            skills,
            clock,
        }
    }

    /// Opens a help request on behalf of the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Authentication`] without a principal,
    /// [`TaskLifecycleError::Domain`] for a blank title or missing or
    /// non-positive credits, [`TaskLifecycleError::InvalidCategory`] for an
    /// unknown category, and [`TaskLifecycleError::SkillNotFound`] when the
    /// linked skill does not exist.
    pub async fn create_task(
        &self,
        identity: &impl IdentityProvider,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let requester = identity.require_principal()?;
        let credits = request
            .credits_value
            .ok_or(TaskDomainError::MissingCreditValue)?;
        let mut details = TaskDetails::new(request.title, credits)?;
        if let Some(description) = request.description {
            details = details.with_description(description);
        }
        if let Some(category) = request.category {
            details = details.with_category(SkillCategory::try_from(category.as_str())?);
        }
        if let Some(skill_id) = request.skill_id {
            let skill = self
                .skills
                .find_by_id(skill_id)
                .await?
                .ok_or(TaskLifecycleError::SkillNotFound(skill_id))?;
            details = details.for_skill(&skill);
        }

        let task = Task::new(requester, details, &*self.clock);
        self.repository.store(&task).await?;
        info!(
            task_id = %task.id(),
            user_id = %requester,
            credits = task.credits_value().value(),
            "task opened"
        );
        Ok(task)
    }

    /// Opens a help request addressed to the owner of a skill.
    ///
    /// The description records what was asked for and the category follows
    /// the skill.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::SkillNotFound`] for unknown skills and
    /// [`TaskDomainError::OwnSkillRequest`] when the caller owns the skill,
    /// otherwise as [`Self::create_task`].
    pub async fn request_skill_help(
        &self,
        identity: &impl IdentityProvider,
        request: RequestSkillHelpRequest,
    ) -> TaskLifecycleResult<Task> {
        let requester = identity.require_principal()?;
        let skill = self
            .skills
            .find_by_id(request.skill_id)
            .await?
            .ok_or(TaskLifecycleError::SkillNotFound(request.skill_id))?;
        if skill.owner_id() == requester {
            return Err(TaskDomainError::OwnSkillRequest {
                skill_id: skill.id(),
                user_id: requester,
            }
            .into());
        }

        let title = request
            .title
            .unwrap_or_else(|| format!("Get help with: {}", skill.name()));
        let details = TaskDetails::new(title, request.credits_value)?.for_skill(&skill);
        let description = format!("Requested help for: {}", details.title());
        let task = Task::new(requester, details.with_description(description), &*self.clock);
        self.repository.store(&task).await?;
        info!(
            task_id = %task.id(),
            skill_id = %skill.id(),
            user_id = %requester,
            "skill help requested"
        );
        Ok(task)
    }

    /// Claims an open task for the caller.
    ///
    /// The write is conditional on the task still being open, so exactly one
    /// of several concurrent callers succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SelfDealing`] when the caller asked for
    /// the help, [`TaskLifecycleError::Conflict`] when another member has
    /// already claimed it, and [`TaskDomainError::InvalidStateTransition`]
    /// when the task is closed without a provider.
    pub async fn accept_task(
        &self,
        identity: &impl IdentityProvider,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        let provider = identity.require_principal()?;
        let mut task = self.load_task(task_id).await?;
        match task.accept(provider, &*self.clock) {
            Ok(()) => {}
            Err(TaskDomainError::InvalidStateTransition { .. }) if task.provider_id().is_some() => {
                warn!(task_id = %task_id, user_id = %provider, "task already claimed");
                return Err(TaskLifecycleError::Conflict(task_id));
            }
            Err(err) => return Err(err.into()),
        }

        match self
            .repository
            .compare_and_update(&task, TaskStatus::Open)
            .await
        {
            Ok(()) => {
                info!(task_id = %task_id, user_id = %provider, "task accepted");
                Ok(task)
            }
            Err(TaskRepositoryError::Conflict { .. }) => {
                warn!(task_id = %task_id, user_id = %provider, "task already claimed");
                Err(TaskLifecycleError::Conflict(task_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Marks an accepted task complete and credits the provider.
    ///
    /// The status change, the pending completion record, and the earned
    /// entry are written together or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotProvider`] when the caller is not the
    /// provider, [`TaskDomainError::InvalidStateTransition`] when the task
    /// is not accepted, and [`TaskLifecycleError::Repository`] when the write
    /// fails.
    pub async fn complete_task(
        &self,
        identity: &impl IdentityProvider,
        task_id: TaskId,
    ) -> TaskLifecycleResult<CompletedTask> {
        let caller = identity.require_principal()?;
        let mut task = self.load_task(task_id).await?;
        let completion = task.complete(caller, &*self.clock)?;
        let earned = CreditEntry::earned(&task, &completion);

        self.repository
            .record_completion(&task, &completion, &earned)
            .await
            .map_err(|err| settlement_error(task_id, err))?;
        info!(
            task_id = %task_id,
            user_id = %caller,
            credits = earned.amount(),
            "task completed"
        );
        Ok(CompletedTask {
            task,
            completion,
            earned,
        })
    }

    /// Approves a pending completion and debits the requester.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotRequester`] when the caller did not ask
    /// for the help and [`TaskDomainError::NoPendingCompletion`] when there
    /// is nothing to approve.
    pub async fn confirm_completion(
        &self,
        identity: &impl IdentityProvider,
        task_id: TaskId,
    ) -> TaskLifecycleResult<ConfirmedCompletion> {
        let caller = identity.require_principal()?;
        let task = self.load_task(task_id).await?;
        if task.requester_id() != caller {
            return Err(TaskDomainError::NotRequester {
                task_id,
                user_id: caller,
            }
            .into());
        }

        let mut completion = self
            .repository
            .find_completion(task_id)
            .await?
            .filter(|record| record.confirmation_status() == ConfirmationStatus::Pending)
            .ok_or(TaskDomainError::NoPendingCompletion(task_id))?;
        completion.approve(caller, &*self.clock)?;
        let spent = CreditEntry::spent(&task, &completion);

        self.repository
            .record_confirmation(&completion, &spent)
            .await
            .map_err(|err| settlement_error(task_id, err))?;
        info!(
            task_id = %task_id,
            user_id = %caller,
            credits = spent.amount(),
            "completion confirmed"
        );
        Ok(ConfirmedCompletion { completion, spent })
    }

    pub(super) async fn load_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }
}

fn settlement_error(task_id: TaskId, err: TaskRepositoryError) -> TaskLifecycleError {
    match err {
        TaskRepositoryError::Conflict { .. }
        | TaskRepositoryError::DuplicateCompletion(_)
        | TaskRepositoryError::ConfirmationConflict(_) => {
            warn!(task_id = %task_id, error = %err, "settlement lost a race");
            TaskLifecycleError::Conflict(task_id)
        }
        TaskRepositoryError::NotFound(_) => TaskLifecycleError::TaskNotFound(task_id),
        other => TaskLifecycleError::Repository(other),
    }
}
