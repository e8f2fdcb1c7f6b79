//! `PostgreSQL` integration tests for conditional acceptance and settlement.

use std::sync::Arc;

use crate::postgres::helpers::{
    BoxError, PgContext, PostgresCluster, postgres_cluster, prepare_context, sign_up,
};
use diesel::prelude::*;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use timebank::{
    error::ErrorKind,
    identity::UserId,
    ledger::{domain::TransactionType, ports::LedgerRepository, services::LedgerService},
    task::{
        domain::{ConfirmationStatus, Task, TaskDetails, TaskStatus},
        ports::{TaskRepository, TaskRepositoryError},
        services::CreateTaskRequest,
    },
};

#[fixture]
async fn context(postgres_cluster: Option<PostgresCluster>) -> Result<Option<PgContext>, BoxError> {
    prepare_context(postgres_cluster).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settlement_writes_completion_and_both_ledger_entries(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let requester = sign_up(&ctx).await?;
    let provider = sign_up(&ctx).await?;
    let task = ctx
        .service
        .create_task(
            &requester.identity,
            CreateTaskRequest::new("Repaint the hallway", 3).with_category("repairs"),
        )
        .await?;

    ctx.service.accept_task(&provider.identity, task.id()).await?;
    ctx.service.complete_task(&provider.identity, task.id()).await?;
    ctx.service
        .confirm_completion(&requester.identity, task.id())
        .await?;

    let stored = ctx
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or("task missing after settlement")?;
    assert_eq!(stored.status(), TaskStatus::Completed);
    assert_eq!(stored.provider_id(), Some(provider.id));
    assert!(stored.completed_at().is_some());

    let completion = ctx
        .tasks
        .find_completion(task.id())
        .await?
        .ok_or("completion missing after settlement")?;
    assert_eq!(completion.confirmation_status(), ConfirmationStatus::Approved);
    assert_eq!(completion.credits_transferred().value(), 3);

    let entries = ctx.ledger.entries_for_task(task.id()).await?;
    let mut kinds: Vec<_> = entries
        .iter()
        .map(|entry| (entry.transaction_type(), entry.amount()))
        .collect();
    kinds.sort_by_key(|(_, amount)| *amount);
    assert_eq!(
        kinds,
        vec![(TransactionType::Spent, -3), (TransactionType::Earned, 3)]
    );

    let ledger = LedgerService::new(Arc::clone(&ctx.ledger));
    assert_eq!(ledger.balance(provider.id).await?.credits(), 3);
    assert_eq!(ledger.balance(requester.id).await?.credits(), -3);
    assert_eq!(ctx.service.hours_contributed(provider.id).await?, 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_one_concurrent_acceptance_is_stored(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let requester = sign_up(&ctx).await?;
    let task = ctx
        .service
        .create_task(&requester.identity, CreateTaskRequest::new("Lift a wardrobe", 2))
        .await?;
    let task_id = task.id();

    let mut handles = Vec::new();
    for _ in 0..6 {
        let contender = sign_up(&ctx).await?;
        let service = Arc::clone(&ctx.service);
        handles.push(tokio::spawn(async move {
            service.accept_task(&contender.identity, task_id).await
        }));
    }

    let mut winners = 0_usize;
    for handle in handles {
        match handle.await? {
            Ok(_) => winners += 1,
            Err(err) => assert!(
                err.kind() == ErrorKind::Conflict,
                "unexpected acceptance error: {err}"
            ),
        }
    }
    assert_eq!(winners, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conditional_update_rejects_stale_status(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let clock = DefaultClock;
    let requester = UserId::new();
    let mut first = Task::new(requester, TaskDetails::new("Sweep the yard", 1)?, &clock);
    ctx.tasks.store(&first).await?;
    let mut second = first.clone();

    first.accept(UserId::new(), &clock)?;
    ctx.tasks.compare_and_update(&first, TaskStatus::Open).await?;
    second.accept(UserId::new(), &clock)?;
    let stale = ctx.tasks.compare_and_update(&second, TaskStatus::Open).await;

    assert!(matches!(
        stale,
        Err(TaskRepositoryError::Conflict {
            expected: TaskStatus::Open,
            ..
        })
    ));
    let stored = ctx
        .tasks
        .find_by_id(first.id())
        .await?
        .ok_or("task missing")?;
    assert_eq!(stored.provider_id(), first.provider_id());

    let mut unknown = Task::new(requester, TaskDetails::new("Never stored", 1)?, &clock);
    unknown.accept(UserId::new(), &clock)?;
    let missing = ctx.tasks.compare_and_update(&unknown, TaskStatus::Open).await;
    assert!(matches!(missing, Err(TaskRepositoryError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_completions_write_a_single_credit(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let requester = sign_up(&ctx).await?;
    let provider = sign_up(&ctx).await?;
    let task = ctx
        .service
        .create_task(&requester.identity, CreateTaskRequest::new("Prune roses", 2))
        .await?;
    ctx.service.accept_task(&provider.identity, task.id()).await?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&ctx.service);
            let task_id = task.id();
            tokio::spawn(async move { service.complete_task(&provider.identity, task_id).await })
        })
        .collect();
    let mut completed = 0_usize;
    for handle in handles {
        if handle.await?.is_ok() {
            completed += 1;
        }
    }

    assert_eq!(completed, 1);
    assert_eq!(ctx.ledger.entries_for_task(task.id()).await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn credits_table_rejects_updates_and_deletes(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let requester = sign_up(&ctx).await?;
    let provider = sign_up(&ctx).await?;
    let task = ctx
        .service
        .create_task(&requester.identity, CreateTaskRequest::new("Bake bread", 1))
        .await?;
    ctx.service.accept_task(&provider.identity, task.id()).await?;
    ctx.service.complete_task(&provider.identity, task.id()).await?;

    let mut conn = ctx.raw_connection()?;
    let update = diesel::sql_query("UPDATE credits SET amount = 99").execute(&mut conn);
    let delete = diesel::sql_query("DELETE FROM credits").execute(&mut conn);

    assert!(update.is_err(), "credits update should be rejected");
    assert!(delete.is_err(), "credits delete should be rejected");
    assert_eq!(ctx.ledger.entries_for_user(provider.id).await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn requester_reads_return_newest_first(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let requester = sign_up(&ctx).await?;
    let older = ctx
        .service
        .create_task(&requester.identity, CreateTaskRequest::new("Older request", 1))
        .await?;
    let newer = ctx
        .service
        .create_task(&requester.identity, CreateTaskRequest::new("Newer request", 1))
        .await?;

    let board = ctx.service.task_board(&requester.identity).await?;

    let ids: Vec<_> = board.open.iter().map(Task::id).collect();
    assert_eq!(ids, vec![newer.id(), older.id()]);
    Ok(())
}
