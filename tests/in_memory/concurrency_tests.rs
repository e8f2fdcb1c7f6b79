//! Competing acceptances of one open task.

use std::sync::Arc;

use super::helpers::{Community, Member, community, open_task, requester};
use eyre::ensure;
use rstest::rstest;
use timebank::{error::ErrorKind, task::domain::TaskStatus};

const CONTENDERS: usize = 8;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn exactly_one_concurrent_acceptance_wins(
    community: Community,
    requester: Member,
) -> eyre::Result<()> {
    let task_id = open_task(&community, &requester, "Move a sofa", 2).await?;

    let handles: Vec<_> = (0..CONTENDERS)
        .map(|_| {
            let tasks = Arc::clone(&community.tasks);
            let contender = Member::sign_in();
            tokio::spawn(async move {
                tasks
                    .accept_task(&contender.identity, task_id)
                    .await
                    .map(|task| (contender.id, task))
            })
        })
        .collect();

    let mut winners = Vec::new();
    let mut losers = Vec::new();
    for handle in handles {
        match handle.await? {
            Ok(outcome) => winners.push(outcome),
            Err(err) => losers.push(err),
        }
    }

    ensure!(winners.len() == 1, "expected one winner, got {}", winners.len());
    ensure!(losers.len() == CONTENDERS - 1);
    ensure!(
        losers.iter().all(|err| err.kind() == ErrorKind::Conflict),
        "unexpected loser errors: {losers:?}"
    );

    let (winner_id, _) = winners
        .first()
        .ok_or_else(|| eyre::eyre!("missing winner"))?;
    let stored = community
        .tasks
        .find_task(task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task vanished"))?;
    ensure!(stored.status() == TaskStatus::Accepted);
    ensure!(stored.provider_id() == Some(*winner_id));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_completions_credit_the_provider_once(
    community: Community,
    requester: Member,
) -> eyre::Result<()> {
    let provider = Member::sign_in();
    let task_id = open_task(&community, &requester, "Paint a fence", 4).await?;
    community.tasks.accept_task(&provider.identity, task_id).await?;

    let handles: Vec<_> = (0..CONTENDERS)
        .map(|_| {
            let tasks = Arc::clone(&community.tasks);
            tokio::spawn(async move { tasks.complete_task(&provider.identity, task_id).await })
        })
        .collect();

    let mut successes = 0_usize;
    for handle in handles {
        if handle.await?.is_ok() {
            successes += 1;
        }
    }

    ensure!(successes == 1, "expected one completion, got {successes}");
    ensure!(community.ledger.balance(provider.id).await?.credits() == 4);
    Ok(())
}
