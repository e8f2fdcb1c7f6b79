//! Diesel row models for credit entries.

use super::schema::credits;
use crate::identity::UserId;
use crate::ledger::domain::{
    CreditEntry, EntryId, ParseTransactionTypeError, PersistedCreditEntryData, TransactionType,
};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for credit entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = credits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CreditRow {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub amount: i64,
    pub transaction_type: String,
    pub related_task_id: Option<uuid::Uuid>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Insert model for credit entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = credits)]
pub(crate) struct NewCreditRow {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub amount: i64,
    pub transaction_type: String,
    pub related_task_id: Option<uuid::Uuid>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<&CreditEntry> for NewCreditRow {
    fn from(entry: &CreditEntry) -> Self {
        Self {
            id: entry.id().into_inner(),
            user_id: entry.user_id().into_inner(),
            amount: entry.amount(),
            transaction_type: entry.transaction_type().as_str().to_owned(),
            related_task_id: entry.related_task_id().map(TaskId::into_inner),
            description: entry.description().to_owned(),
            created_at: entry.created_at(),
        }
    }
}

impl TryFrom<CreditRow> for CreditEntry {
    type Error = ParseTransactionTypeError;

    fn try_from(row: CreditRow) -> Result<Self, Self::Error> {
        let transaction_type = TransactionType::try_from(row.transaction_type.as_str())?;
        Ok(Self::from_persisted(PersistedCreditEntryData {
            id: EntryId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            amount: row.amount,
            transaction_type,
            related_task_id: row.related_task_id.map(TaskId::from_uuid),
            description: row.description,
            created_at: row.created_at,
        }))
    }
}
