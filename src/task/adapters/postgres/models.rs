//! Diesel row models for task persistence.

use super::schema::{task_completions, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Member who asked for help.
    pub requester_id: uuid::Uuid,
    /// Member who accepted the task.
    pub provider_id: Option<uuid::Uuid>,
    /// Linked skill.
    pub skill_id: Option<uuid::Uuid>,
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Lowercase category name.
    pub category: Option<String>,
    /// Credits the task is worth.
    pub credits_value: i32,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Member who asked for help.
    pub requester_id: uuid::Uuid,
    /// Member who accepted the task.
    pub provider_id: Option<uuid::Uuid>,
    /// Linked skill.
    pub skill_id: Option<uuid::Uuid>,
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Lowercase category name.
    pub category: Option<String>,
    /// Credits the task is worth.
    pub credits_value: i32,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Lifecycle columns rewritten by a transition.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskTransitionChangeset {
    /// Member who accepted the task.
    pub provider_id: Option<uuid::Uuid>,
    /// New lifecycle status.
    pub status: String,
    /// Transition timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Query result row for completion records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_completions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CompletionRow {
    /// Completion identifier.
    pub id: uuid::Uuid,
    /// Completed task.
    pub task_id: uuid::Uuid,
    /// Member who did the work.
    pub provider_id: uuid::Uuid,
    /// Member who asked for help.
    pub requester_id: uuid::Uuid,
    /// Credits moved by the settlement.
    pub credits_transferred: i32,
    /// Confirmation status.
    pub confirmation_status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Confirmation timestamp.
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// Insert model for completion records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_completions)]
pub struct NewCompletionRow {
    /// Completion identifier.
    pub id: uuid::Uuid,
    /// Completed task.
    pub task_id: uuid::Uuid,
    /// Member who did the work.
    pub provider_id: uuid::Uuid,
    /// Member who asked for help.
    pub requester_id: uuid::Uuid,
    /// Credits moved by the settlement.
    pub credits_transferred: i32,
    /// Confirmation status.
    pub confirmation_status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Confirmation timestamp.
    pub confirmed_at: Option<DateTime<Utc>>,
}
