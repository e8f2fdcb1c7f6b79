//! Completion records awaiting requester confirmation.

use super::{CompletionId, CreditValue, ParseConfirmationStatusError, Task, TaskDomainError, TaskId};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confirmation status of a completion record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStatus {
    /// Waiting for the requester.
    Pending,
    /// Confirmed by the requester.
    Approved,
}

impl ConfirmationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

impl TryFrom<&str> for ConfirmationStatus {
    type Error = ParseConfirmationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            _ => Err(ParseConfirmationStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record that a provider finished a task. One per completed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompletion {
    id: CompletionId,
    task_id: TaskId,
    provider_id: UserId,
    requester_id: UserId,
    credits_transferred: CreditValue,
    confirmation_status: ConfirmationStatus,
    created_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCompletionData {
    /// Persisted completion identifier.
    pub id: CompletionId,
    /// Completed task.
    pub task_id: TaskId,
    /// Member who did the work.
    pub provider_id: UserId,
    /// Member who asked for help.
    pub requester_id: UserId,
    /// Credits moved by the settlement.
    pub credits_transferred: CreditValue,
    /// Persisted confirmation status.
    pub confirmation_status: ConfirmationStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted confirmation timestamp, if any.
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl TaskCompletion {
    pub(super) fn pending(task: &Task, provider_id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CompletionId::new(),
            task_id: task.id(),
            provider_id,
            requester_id: task.requester_id(),
            credits_transferred: task.credits_value(),
            confirmation_status: ConfirmationStatus::Pending,
            created_at,
            confirmed_at: None,
        }
    }

    /// Reconstructs a completion from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedCompletionData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            provider_id: data.provider_id,
            requester_id: data.requester_id,
            credits_transferred: data.credits_transferred,
            confirmation_status: data.confirmation_status,
            created_at: data.created_at,
            confirmed_at: data.confirmed_at,
        }
    }

    /// Returns the completion identifier.
    #[must_use]
    pub const fn id(&self) -> CompletionId {
        self.id
    }

    /// Returns the completed task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the provider.
    #[must_use]
    pub const fn provider_id(&self) -> UserId {
        self.provider_id
    }

    /// Returns the requester.
    #[must_use]
    pub const fn requester_id(&self) -> UserId {
        self.requester_id
    }

    /// Returns the credits moved by the settlement.
    #[must_use]
    pub const fn credits_transferred(&self) -> CreditValue {
        self.credits_transferred
    }

    /// Returns the confirmation status.
    #[must_use]
    pub const fn confirmation_status(&self) -> ConfirmationStatus {
        self.confirmation_status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the confirmation timestamp, if any.
    #[must_use]
    pub const fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }

    /// Approves the completion on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotRequester`] when `caller` did not ask
    /// for the help and [`TaskDomainError::CompletionAlreadyConfirmed`] when
    /// the record is no longer pending.
    pub fn approve(&mut self, caller: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if caller != self.requester_id {
            return Err(TaskDomainError::NotRequester {
                task_id: self.task_id,
                user_id: caller,
            });
        }
        if self.confirmation_status != ConfirmationStatus::Pending {
            return Err(TaskDomainError::CompletionAlreadyConfirmed(self.task_id));
        }
        self.confirmation_status = ConfirmationStatus::Approved;
        self.confirmed_at = Some(clock.utc());
        Ok(())
    }
}
