//! End-to-end settlement through the in-memory adapters.

use super::helpers::{Community, Member, community, open_task, provider, requester};
use eyre::ensure;
use rstest::rstest;
use timebank::{
    error::ErrorKind,
    ledger::domain::TransactionType,
    task::domain::{ConfirmationStatus, TaskStatus},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_exchange_moves_credits_between_members(
    community: Community,
    requester: Member,
    provider: Member,
) -> eyre::Result<()> {
    let task_id = open_task(&community, &requester, "Tutor algebra", 3).await?;

    let accepted = community
        .tasks
        .accept_task(&provider.identity, task_id)
        .await?;
    ensure!(accepted.status() == TaskStatus::Accepted);
    ensure!(accepted.provider_id() == Some(provider.id));

    let completed = community
        .tasks
        .complete_task(&provider.identity, task_id)
        .await?;
    ensure!(completed.task.status() == TaskStatus::Completed);
    ensure!(completed.task.completed_at().is_some());
    ensure!(completed.completion.confirmation_status() == ConfirmationStatus::Pending);
    ensure!(community.ledger.balance(provider.id).await?.credits() == 3);
    ensure!(community.ledger.balance(requester.id).await?.credits() == 0);

    let confirmed = community
        .tasks
        .confirm_completion(&requester.identity, task_id)
        .await?;
    ensure!(confirmed.completion.confirmation_status() == ConfirmationStatus::Approved);
    ensure!(confirmed.completion.confirmed_at().is_some());
    ensure!(community.ledger.my_balance(&requester.identity).await?.credits() == -3);
    ensure!(community.ledger.my_balance(&provider.identity).await?.credits() == 3);
    ensure!(community.tasks.hours_contributed(provider.id).await? == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statements_describe_each_side_of_the_exchange(
    community: Community,
    requester: Member,
    provider: Member,
) -> eyre::Result<()> {
    let task_id = open_task(&community, &requester, "Walk the dog", 2).await?;
    community.tasks.accept_task(&provider.identity, task_id).await?;
    community.tasks.complete_task(&provider.identity, task_id).await?;
    community
        .tasks
        .confirm_completion(&requester.identity, task_id)
        .await?;

    let earned = community.ledger.statement(&provider.identity).await?;
    let spent = community.ledger.statement(&requester.identity).await?;
    let [earned_entry] = earned.as_slice() else {
        eyre::bail!("expected one provider entry, got {earned:?}");
    };
    let [spent_entry] = spent.as_slice() else {
        eyre::bail!("expected one requester entry, got {spent:?}");
    };
    ensure!(earned_entry.transaction_type() == TransactionType::Earned);
    ensure!(earned_entry.description() == "Earned from task: Walk the dog");
    ensure!(earned_entry.related_task_id() == Some(task_id));
    ensure!(spent_entry.transaction_type() == TransactionType::Spent);
    ensure!(spent_entry.amount() == -2);
    ensure!(spent_entry.description() == "Spent on task: Walk the dog");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsider_cannot_complete_and_no_credit_is_written(
    community: Community,
    requester: Member,
    provider: Member,
) -> eyre::Result<()> {
    let outsider = Member::sign_in();
    let task_id = open_task(&community, &requester, "Fix a bike", 1).await?;
    community.tasks.accept_task(&provider.identity, task_id).await?;

    let result = community
        .tasks
        .complete_task(&outsider.identity, task_id)
        .await;

    ensure!(
        result.as_ref().is_err_and(|err| err.kind() == ErrorKind::Authorization),
        "expected an authorization error, got {result:?}"
    );
    ensure!(community.ledger.statement(&outsider.identity).await?.is_empty());
    ensure!(community.ledger.statement(&provider.identity).await?.is_empty());
    let task = community.tasks.find_task(task_id).await?;
    ensure!(task.is_some_and(|stored| stored.status() == TaskStatus::Accepted));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_confirmation_is_a_state_error(
    community: Community,
    requester: Member,
    provider: Member,
) -> eyre::Result<()> {
    let task_id = open_task(&community, &requester, "Sort recycling", 1).await?;
    community.tasks.accept_task(&provider.identity, task_id).await?;
    community.tasks.complete_task(&provider.identity, task_id).await?;
    community
        .tasks
        .confirm_completion(&requester.identity, task_id)
        .await?;

    let repeated = community
        .tasks
        .confirm_completion(&requester.identity, task_id)
        .await;

    ensure!(
        repeated.as_ref().is_err_and(|err| err.kind() == ErrorKind::State),
        "expected a state error, got {repeated:?}"
    );
    ensure!(community.ledger.balance(requester.id).await?.credits() == -1);
    Ok(())
}
