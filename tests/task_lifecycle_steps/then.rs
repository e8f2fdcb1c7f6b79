//! Then steps for task lifecycle BDD scenarios.

use super::world::{TimeBankWorld, run_async};
use rstest_bdd_macros::then;
use timebank::task::domain::{ConfirmationStatus, TaskStatus};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TimeBankWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.task_id()?;
    let task = run_async(world.tasks.find_task(task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} missing from repository"))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the completion is "{status}""#)]
fn completion_is(world: &TimeBankWorld, status: String) -> Result<(), eyre::Report> {
    let expected = ConfirmationStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected confirmation status: {err}"))?;
    let task_id = world.task_id()?;
    let completion = run_async(world.tasks.find_completion(task_id))?
        .ok_or_else(|| eyre::eyre!("no completion recorded for {task_id}"))?;

    if completion.confirmation_status() != expected {
        return Err(eyre::eyre!(
            "expected completion {}, found {}",
            expected.as_str(),
            completion.confirmation_status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"member "{name}" has a balance of {credits:i64} credits"#)]
fn member_has_balance(
    world: &TimeBankWorld,
    name: String,
    credits: i64,
) -> Result<(), eyre::Report> {
    let user = world.user_id_of(&name)?;
    let balance = run_async(world.ledger.balance(user))?;
    if balance.credits() != credits {
        return Err(eyre::eyre!(
            "expected {name} to hold {credits} credits, found {}",
            balance.credits()
        ));
    }
    Ok(())
}

#[then(r#"the action fails with a "{kind}" error"#)]
fn action_fails_with(world: &TimeBankWorld, kind: String) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing action outcome"))?;

    match outcome {
        Err(err) if err.kind().as_str() == kind => Ok(()),
        Err(err) => Err(eyre::eyre!("expected a {kind} error, got {} ({err})", err.kind())),
        Ok(()) => Err(eyre::eyre!("expected a {kind} error, but the action succeeded")),
    }
}

#[then(r#"member "{name}" sees {count:usize} incoming requests"#)]
fn member_sees_incoming(
    world: &TimeBankWorld,
    name: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let identity = world.identity_of(&name)?;
    let incoming = run_async(world.tasks.incoming_requests(&identity))?;
    if incoming.len() != count {
        return Err(eyre::eyre!(
            "expected {count} incoming requests for {name}, found {}",
            incoming.len()
        ));
    }
    Ok(())
}
