//! Task aggregate root and the lifecycle state machine.

use super::{CreditValue, ParseTaskStatusError, TaskCompletion, TaskDomainError, TaskId};
use crate::identity::UserId;
use crate::skill::domain::{Skill, SkillCategory, SkillId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Waiting for a provider.
    Open,
    /// Claimed by a provider.
    Accepted,
    /// Work delivered; credits earned by the provider.
    Completed,
    /// Withdrawn outside this crate. Terminal.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether the lifecycle permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Accepted) | (Self::Accepted, Self::Completed)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "accepted" => Ok(Self::Accepted),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated user-supplied fields of a new help request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    title: String,
    description: String,
    credits_value: CreditValue,
    category: Option<SkillCategory>,
    skill_id: Option<SkillId>,
}

impl TaskDetails {
    /// Validates the title and credit value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title and
    /// [`TaskDomainError::InvalidCreditValue`] for a non-positive value.
    pub fn new(title: impl Into<String>, credits_value: i64) -> Result<Self, TaskDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            description: String::new(),
            credits_value: CreditValue::new(credits_value)?,
            category: None,
            skill_id: None,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_owned();
        self
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category: SkillCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Links the request to an offered skill, inheriting its category.
    #[must_use]
    pub fn for_skill(mut self, skill: &Skill) -> Self {
        self.skill_id = Some(skill.id());
        self.category = Some(skill.category());
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    requester_id: UserId,
    provider_id: Option<UserId>,
    skill_id: Option<SkillId>,
    title: String,
    description: String,
    category: Option<SkillCategory>,
    credits_value: CreditValue,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Member who asked for help.
    pub requester_id: UserId,
    /// Member who accepted, if any.
    pub provider_id: Option<UserId>,
    /// Linked skill, if any.
    pub skill_id: Option<SkillId>,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted category, if any.
    pub category: Option<SkillCategory>,
    /// Persisted credit value.
    pub credits_value: CreditValue,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Opens a new help request.
    #[must_use]
    pub fn new(requester_id: UserId, details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            requester_id,
            provider_id: None,
            skill_id: details.skill_id,
            title: details.title,
            description: details.description,
            category: details.category,
            credits_value: details.credits_value,
            status: TaskStatus::Open,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            requester_id: data.requester_id,
            provider_id: data.provider_id,
            skill_id: data.skill_id,
            title: data.title,
            description: data.description,
            category: data.category,
            credits_value: data.credits_value,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the member who asked for help.
    #[must_use]
    pub const fn requester_id(&self) -> UserId {
        self.requester_id
    }

    /// Returns the accepted provider, if any.
    #[must_use]
    pub const fn provider_id(&self) -> Option<UserId> {
        self.provider_id
    }

    /// Returns the linked skill, if any.
    #[must_use]
    pub const fn skill_id(&self) -> Option<SkillId> {
        self.skill_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the category, if any.
    #[must_use]
    pub const fn category(&self) -> Option<SkillCategory> {
        self.category
    }

    /// Returns the number of credits the task is worth.
    #[must_use]
    pub const fn credits_value(&self) -> CreditValue {
        self.credits_value
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Claims the task for `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SelfDealing`] when `provider` is the
    /// requester and [`TaskDomainError::InvalidStateTransition`] when the
    /// task is not open.
    pub fn accept(&mut self, provider: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if provider == self.requester_id {
            return Err(TaskDomainError::SelfDealing {
                task_id: self.id,
                user_id: provider,
            });
        }
        self.ensure_transition(TaskStatus::Accepted)?;
        self.provider_id = Some(provider);
        self.status = TaskStatus::Accepted;
        self.touch(clock);
        Ok(())
    }

    /// Marks the task completed by `caller` and returns the pending
    /// completion record.
    ///
    /// The provider check runs first once a provider is bound; an open task
    /// fails the state check instead.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotProvider`] when `caller` is not the
    /// provider and [`TaskDomainError::InvalidStateTransition`] when the
    /// task is not accepted.
    pub fn complete(
        &mut self,
        caller: UserId,
        clock: &impl Clock,
    ) -> Result<TaskCompletion, TaskDomainError> {
        if self.provider_id.is_some_and(|provider| provider != caller) {
            return Err(TaskDomainError::NotProvider {
                task_id: self.id,
                user_id: caller,
            });
        }
        self.ensure_transition(TaskStatus::Completed)?;
        let provider = self.provider_id.ok_or(TaskDomainError::InvalidStateTransition {
            task_id: self.id,
            from: self.status,
            to: TaskStatus::Completed,
        })?;
        let timestamp = clock.utc();
        self.status = TaskStatus::Completed;
        self.completed_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(TaskCompletion::pending(self, provider, timestamp))
    }

    fn ensure_transition(&self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(target) {
            return Ok(());
        }
        Err(TaskDomainError::InvalidStateTransition {
            task_id: self.id,
            from: self.status,
            to: target,
        })
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
