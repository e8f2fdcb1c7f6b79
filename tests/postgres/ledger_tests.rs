//! `PostgreSQL` integration tests for ledger reads.

use std::sync::Arc;

use crate::postgres::helpers::{
    BoxError, PgContext, PostgresCluster, postgres_cluster, prepare_context, sign_up,
};
use rstest::{fixture, rstest};
use timebank::{
    identity::UserId,
    ledger::{domain::TransactionType, ports::LedgerRepository, services::LedgerService},
    task::services::CreateTaskRequest,
};

#[fixture]
async fn context(postgres_cluster: Option<PostgresCluster>) -> Result<Option<PgContext>, BoxError> {
    prepare_context(postgres_cluster).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statement_lists_entries_newest_first(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let requester = sign_up(&ctx).await?;
    let provider = sign_up(&ctx).await?;
    for (title, credits) in [("Read to a child", 1), ("Cook dinner", 2)] {
        let task = ctx
            .service
            .create_task(&requester.identity, CreateTaskRequest::new(title, credits))
            .await?;
        ctx.service.accept_task(&provider.identity, task.id()).await?;
        ctx.service.complete_task(&provider.identity, task.id()).await?;
    }

    let ledger = LedgerService::new(Arc::clone(&ctx.ledger));
    let statement = ledger.statement(&provider.identity).await?;

    let descriptions: Vec<_> = statement.iter().map(|entry| entry.description()).collect();
    assert_eq!(
        descriptions,
        vec!["Earned from task: Cook dinner", "Earned from task: Read to a child"]
    );
    assert!(
        statement
            .iter()
            .all(|entry| entry.transaction_type() == TransactionType::Earned)
    );
    assert_eq!(ledger.my_balance(&provider.identity).await?.credits(), 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_without_entries_have_zero_balance(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let stranger = UserId::new();

    assert!(ctx.ledger.entries_for_user(stranger).await?.is_empty());
    let ledger = LedgerService::new(Arc::clone(&ctx.ledger));
    assert_eq!(ledger.balance(stranger).await?.credits(), 0);
    Ok(())
}
