//! When steps for task lifecycle BDD scenarios.

use super::world::{TimeBankWorld, run_async};
use rstest_bdd_macros::when;
use timebank::{
    identity::SessionIdentity,
    task::{
        domain::Task,
        services::{CreateTaskRequest, RequestSkillHelpRequest, TaskLifecycleError},
    },
};

#[when(r#"member "{name}" accepts the task"#)]
fn member_accepts_task(world: &mut TimeBankWorld, name: String) -> Result<(), eyre::Report> {
    let identity = world.identity_of(&name)?;
    let task_id = world.task_id()?;
    let outcome = run_async(world.tasks.accept_task(&identity, task_id)).map(drop);
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"member "{name}" completes the task"#)]
fn member_completes_task(world: &mut TimeBankWorld, name: String) -> Result<(), eyre::Report> {
    let identity = world.identity_of(&name)?;
    let task_id = world.task_id()?;
    let outcome = run_async(world.tasks.complete_task(&identity, task_id)).map(drop);
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"member "{name}" confirms the completion"#)]
fn member_confirms_completion(
    world: &mut TimeBankWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let identity = world.identity_of(&name)?;
    let task_id = world.task_id()?;
    let outcome = run_async(world.tasks.confirm_completion(&identity, task_id)).map(drop);
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"member "{name}" opens a task "{title}" worth {credits:i64} credits"#)]
fn member_opens_task(
    world: &mut TimeBankWorld,
    name: String,
    title: String,
    credits: i64,
) -> Result<(), eyre::Report> {
    let identity = world.identity_of(&name)?;
    open_task(world, &identity, title, credits);
    Ok(())
}

#[when(r#"an anonymous visitor opens a task "{title}" worth {credits:i64} credits"#)]
fn anonymous_visitor_opens_task(world: &mut TimeBankWorld, title: String, credits: i64) {
    open_task(world, &SessionIdentity::anonymous(), title, credits);
}

#[when(r#"member "{name}" requests help with "{skill}""#)]
fn member_requests_help(
    world: &mut TimeBankWorld,
    name: String,
    skill: String,
) -> Result<(), eyre::Report> {
    let identity = world.identity_of(&name)?;
    let skill_id = *world
        .offered_skills
        .get(&skill)
        .ok_or_else(|| eyre::eyre!("unknown skill {skill} in scenario world"))?;
    let result = run_async(
        world
            .tasks
            .request_skill_help(&identity, RequestSkillHelpRequest::new(skill_id)),
    );
    record_opened(world, result);
    Ok(())
}

fn open_task(world: &mut TimeBankWorld, identity: &SessionIdentity, title: String, credits: i64) {
    let result = run_async(
        world
            .tasks
            .create_task(identity, CreateTaskRequest::new(title, credits)),
    );
    record_opened(world, result);
}

fn record_opened(world: &mut TimeBankWorld, result: Result<Task, TaskLifecycleError>) {
    if let Ok(ref opened) = result {
        world.current_task = Some(opened.id());
    }
    world.last_outcome = Some(result.map(drop));
}
