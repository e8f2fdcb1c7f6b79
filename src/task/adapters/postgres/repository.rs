//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{CompletionRow, NewCompletionRow, NewTaskRow, TaskRow, TaskTransitionChangeset},
    schema::{task_completions, tasks},
};
use crate::identity::UserId;
use crate::ledger::{
    adapters::postgres::{models::NewCreditRow, schema::credits},
    domain::CreditEntry,
};
use crate::persistence::{PgPool, get_conn_with, run_blocking_with};
use crate::skill::domain::{SkillCategory, SkillId};
use crate::task::{
    domain::{
        CompletionId, ConfirmationStatus, CreditValue, PersistedCompletionData, PersistedTaskData,
        Task, TaskCompletion, TaskId, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
///
/// Settlement writes run inside a single database transaction together with
/// the ledger insert.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                f(&mut connection)
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_requester(&self, requester: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::requester_id.eq(requester.into_inner()))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_open_for_skills(&self, skills: &[SkillId]) -> TaskRepositoryResult<Vec<Task>> {
        if skills.is_empty() {
            return Ok(Vec::new());
        }
        let skill_ids: Vec<uuid::Uuid> = skills.iter().copied().map(SkillId::into_inner).collect();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(TaskStatus::Open.as_str()))
                .filter(tasks::provider_id.is_null())
                .filter(tasks::skill_id.eq_any(skill_ids))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn compare_and_update(
        &self,
        task: &Task,
        expected: TaskStatus,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);
        self.run_blocking(move |connection| {
            update_if_status(connection, task_id, expected, &changeset)
        })
        .await
    }

    async fn record_completion(
        &self,
        task: &Task,
        completion: &TaskCompletion,
        earned: &CreditEntry,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);
        let completion_row = to_completion_row(completion)?;
        let credit_row = NewCreditRow::from(earned);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                update_if_status(tx, task_id, TaskStatus::Accepted, &changeset)?;
                diesel::insert_into(task_completions::table)
                    .values(&completion_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateCompletion(task_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                diesel::insert_into(credits::table)
                    .values(&credit_row)
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_completion(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Option<TaskCompletion>> {
        self.run_blocking(move |connection| {
            let row = task_completions::table
                .filter(task_completions::task_id.eq(task_id.into_inner()))
                .select(CompletionRow::as_select())
                .first::<CompletionRow>(connection)
                .optional()?;
            row.map(row_to_completion).transpose()
        })
        .await
    }

    async fn record_confirmation(
        &self,
        completion: &TaskCompletion,
        spent: &CreditEntry,
    ) -> TaskRepositoryResult<()> {
        let task_id = completion.task_id();
        let status = completion.confirmation_status().as_str();
        let confirmed_at = completion.confirmed_at();
        let credit_row = NewCreditRow::from(spent);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let updated = diesel::update(
                    task_completions::table
                        .filter(task_completions::task_id.eq(task_id.into_inner()))
                        .filter(
                            task_completions::confirmation_status
                                .eq(ConfirmationStatus::Pending.as_str()),
                        ),
                )
                .set((
                    task_completions::confirmation_status.eq(status),
                    task_completions::confirmed_at.eq(confirmed_at),
                ))
                .execute(tx)?;
                if updated == 0 {
                    return Err(TaskRepositoryError::ConfirmationConflict(task_id));
                }
                diesel::insert_into(credits::table)
                    .values(&credit_row)
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn approved_credits_for_provider(&self, provider: UserId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let amounts = task_completions::table
                .filter(task_completions::provider_id.eq(provider.into_inner()))
                .filter(
                    task_completions::confirmation_status.eq(ConfirmationStatus::Approved.as_str()),
                )
                .select(task_completions::credits_transferred)
                .load::<i32>(connection)?;
            amounts.into_iter().try_fold(0_u64, |total, amount| {
                let credits = u64::try_from(amount).map_err(TaskRepositoryError::persistence)?;
                Ok(total.saturating_add(credits))
            })
        })
        .await
    }
}

/// Applies `changeset` only while the stored status equals `expected`.
fn update_if_status(
    connection: &mut PgConnection,
    task_id: TaskId,
    expected: TaskStatus,
    changeset: &TaskTransitionChangeset,
) -> TaskRepositoryResult<()> {
    let updated = diesel::update(
        tasks::table
            .filter(tasks::id.eq(task_id.into_inner()))
            .filter(tasks::status.eq(expected.as_str())),
    )
    .set(changeset)
    .execute(connection)?;
    if updated > 0 {
        return Ok(());
    }

    let exists = diesel::select(diesel::dsl::exists(
        tasks::table.filter(tasks::id.eq(task_id.into_inner())),
    ))
    .get_result::<bool>(connection)?;
    if exists {
        Err(TaskRepositoryError::Conflict { task_id, expected })
    } else {
        Err(TaskRepositoryError::NotFound(task_id))
    }
}

fn persisted_credits(value: CreditValue) -> TaskRepositoryResult<i32> {
    i32::try_from(value.value()).map_err(TaskRepositoryError::persistence)
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        requester_id: task.requester_id().into_inner(),
        provider_id: task.provider_id().map(UserId::into_inner),
        skill_id: task.skill_id().map(SkillId::into_inner),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        category: task.category().map(|category| category.as_str().to_owned()),
        credits_value: persisted_credits(task.credits_value())?,
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    })
}

fn to_changeset(task: &Task) -> TaskTransitionChangeset {
    TaskTransitionChangeset {
        provider_id: task.provider_id().map(UserId::into_inner),
        status: task.status().as_str().to_owned(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    }
}

fn to_completion_row(completion: &TaskCompletion) -> TaskRepositoryResult<NewCompletionRow> {
    Ok(NewCompletionRow {
        id: completion.id().into_inner(),
        task_id: completion.task_id().into_inner(),
        provider_id: completion.provider_id().into_inner(),
        requester_id: completion.requester_id().into_inner(),
        credits_transferred: persisted_credits(completion.credits_transferred())?,
        confirmation_status: completion.confirmation_status().as_str().to_owned(),
        created_at: completion.created_at(),
        confirmed_at: completion.confirmed_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status = TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let category = row
        .category
        .as_deref()
        .map(SkillCategory::try_from)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let credits_value =
        CreditValue::new(i64::from(row.credits_value)).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        requester_id: UserId::from_uuid(row.requester_id),
        provider_id: row.provider_id.map(UserId::from_uuid),
        skill_id: row.skill_id.map(SkillId::from_uuid),
        title: row.title,
        description: row.description,
        category,
        credits_value,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
        completed_at: row.completed_at,
    }))
}

fn row_to_completion(row: CompletionRow) -> TaskRepositoryResult<TaskCompletion> {
    let confirmation_status = ConfirmationStatus::try_from(row.confirmation_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let credits_transferred = CreditValue::new(i64::from(row.credits_transferred))
        .map_err(TaskRepositoryError::persistence)?;

    Ok(TaskCompletion::from_persisted(PersistedCompletionData {
        id: CompletionId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        provider_id: UserId::from_uuid(row.provider_id),
        requester_id: UserId::from_uuid(row.requester_id),
        credits_transferred,
        confirmation_status,
        created_at: row.created_at,
        confirmed_at: row.confirmed_at,
    }))
}
