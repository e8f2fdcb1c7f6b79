//! Immutable credit entries.

use super::ParseTransactionTypeError;
use crate::identity::UserId;
use crate::task::domain::{Task, TaskCompletion, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a new random entry identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an entry identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a credit movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Credits received for providing help.
    Earned,
    /// Credits paid for receiving help.
    Spent,
}

impl TransactionType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earned => "earned",
            Self::Spent => "spent",
        }
    }
}

impl TryFrom<&str> for TransactionType {
    type Error = ParseTransactionTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "earned" => Ok(Self::Earned),
            "spent" => Ok(Self::Spent),
            _ => Err(ParseTransactionTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable, signed credit movement.
///
/// New entries can only be minted by the settlement transitions inside this
/// crate; callers outside it read entries or rebuild them from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditEntry {
    id: EntryId,
    user_id: UserId,
    amount: i64,
    transaction_type: TransactionType,
    related_task_id: Option<TaskId>,
    description: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCreditEntryData {
    /// Persisted entry identifier.
    pub id: EntryId,
    /// Member whose balance the entry affects.
    pub user_id: UserId,
    /// Signed amount.
    pub amount: i64,
    /// Persisted transaction type.
    pub transaction_type: TransactionType,
    /// Task that caused the movement, if any.
    pub related_task_id: Option<TaskId>,
    /// Human-readable description.
    pub description: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl CreditEntry {
    /// Credits the provider when a task is completed.
    pub(crate) fn earned(task: &Task, completion: &TaskCompletion) -> Self {
        Self {
            id: EntryId::new(),
            user_id: completion.provider_id(),
            amount: completion.credits_transferred().as_i64(),
            transaction_type: TransactionType::Earned,
            related_task_id: Some(task.id()),
            description: format!("Earned from task: {}", task.title()),
            created_at: completion.created_at(),
        }
    }

    /// Debits the requester when a completion is confirmed.
    pub(crate) fn spent(task: &Task, completion: &TaskCompletion) -> Self {
        Self {
            id: EntryId::new(),
            user_id: completion.requester_id(),
            amount: -completion.credits_transferred().as_i64(),
            transaction_type: TransactionType::Spent,
            related_task_id: Some(task.id()),
            description: format!("Spent on task: {}", task.title()),
            created_at: completion
                .confirmed_at()
                .unwrap_or_else(|| completion.created_at()),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCreditEntryData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            amount: data.amount,
            transaction_type: data.transaction_type,
            related_task_id: data.related_task_id,
            description: data.description,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> EntryId {
        self.id
    }

    /// Returns the member whose balance the entry affects.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the signed amount.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the transaction type.
    #[must_use]
    pub const fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// Returns the related task, if any.
    #[must_use]
    pub const fn related_task_id(&self) -> Option<TaskId> {
        self.related_task_id
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
