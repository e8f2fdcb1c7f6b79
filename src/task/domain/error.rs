//! Error types for task domain validation and lifecycle guards.

use super::{TaskId, TaskStatus};
use crate::error::ErrorKind;
use crate::identity::UserId;
use crate::skill::domain::SkillId;
use thiserror::Error;

/// Errors returned while constructing or transitioning tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// No credit value was supplied.
    #[error("credit value is required")]
    MissingCreditValue,

    /// The credit value is not a positive integer.
    #[error("invalid credit value {0}, expected a positive integer")]
    InvalidCreditValue(i64),

    /// A member tried to help themselves.
    #[error("user {user_id} cannot provide help on their own task {task_id}")]
    SelfDealing {
        /// Task the member requested.
        task_id: TaskId,
        /// The requesting member.
        user_id: UserId,
    },

    /// A member tried to request help with their own skill.
    #[error("user {user_id} cannot request help with their own skill {skill_id}")]
    OwnSkillRequest {
        /// The requested skill.
        skill_id: SkillId,
        /// The requesting member.
        user_id: UserId,
    },

    /// The caller is not the provider of the task.
    #[error("user {user_id} is not the provider of task {task_id}")]
    NotProvider {
        /// Task being completed.
        task_id: TaskId,
        /// The caller.
        user_id: UserId,
    },

    /// The caller is not the requester of the task.
    #[error("user {user_id} is not the requester of task {task_id}")]
    NotRequester {
        /// Task being confirmed.
        task_id: TaskId,
        /// The caller.
        user_id: UserId,
    },

    /// The requested lifecycle transition is not permitted.
    #[error("invalid transition for task {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// No pending completion exists for the task.
    #[error("task {0} has no pending completion")]
    NoPendingCompletion(TaskId),

    /// The completion has already been approved.
    #[error("completion for task {0} is already approved")]
    CompletionAlreadyConfirmed(TaskId),
}

impl TaskDomainError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTitle
            | Self::MissingCreditValue
            | Self::InvalidCreditValue(_)
            | Self::SelfDealing { .. }
            | Self::OwnSkillRequest { .. } => ErrorKind::Validation,
            Self::NotProvider { .. } | Self::NotRequester { .. } => ErrorKind::Authorization,
            Self::InvalidStateTransition { .. }
            | Self::NoPendingCompletion(_)
            | Self::CompletionAlreadyConfirmed(_) => ErrorKind::State,
        }
    }
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing confirmation statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown confirmation status: {0}")]
pub struct ParseConfirmationStatusError(pub String);
