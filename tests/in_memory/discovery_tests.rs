//! Skill discovery, incoming requests, and task boards.

use super::helpers::{
    Community, Member, community, offer_skill, open_task, provider, requester,
};
use eyre::ensure;
use rstest::rstest;
use timebank::{
    config::TimeBankConfig,
    identity::SessionIdentity,
    skill::{domain::SkillCategory, services::SkillSearchRequest},
    task::services::RequestSkillHelpRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_filters_by_term_category_and_owner(
    community: Community,
    requester: Member,
    provider: Member,
) -> eyre::Result<()> {
    offer_skill(&community, &provider, "Piano lessons", "teaching").await?;
    offer_skill(&community, &provider, "Leaky taps", "repairs").await?;
    offer_skill(&community, &requester, "Guitar lessons", "teaching").await?;

    let lessons = community
        .skills
        .search(
            &SessionIdentity::anonymous(),
            SkillSearchRequest::new().with_term("LESSONS"),
        )
        .await?;
    ensure!(lessons.len() == 2);

    let repairs = community
        .skills
        .search(
            &SessionIdentity::anonymous(),
            SkillSearchRequest::new().with_category("Repairs"),
        )
        .await?;
    ensure!(
        repairs
            .iter()
            .all(|skill| skill.category() == SkillCategory::Repairs)
    );
    ensure!(repairs.len() == 1);

    let others = community
        .skills
        .search(
            &requester.identity,
            SkillSearchRequest::new().with_term("lessons").excluding_own(),
        )
        .await?;
    ensure!(others.iter().all(|skill| skill.owner_id() == provider.id));
    ensure!(others.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_search_limit_caps_results(provider: Member) -> eyre::Result<()> {
    let config = TimeBankConfig::from_lookup(|key| {
        (key == "TIMEBANK_SEARCH_LIMIT").then(|| "2".to_owned())
    })?;
    let community = Community::with_config(&config);
    for name in ["Baking", "Knitting", "Gardening"] {
        offer_skill(&community, &provider, name, "other").await?;
    }

    let results = community
        .skills
        .search(&SessionIdentity::anonymous(), SkillSearchRequest::new())
        .await?;

    ensure!(results.len() == 2, "expected 2 results, got {}", results.len());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn skill_requests_reach_the_owner_until_claimed(
    community: Community,
    requester: Member,
    provider: Member,
) -> eyre::Result<()> {
    let skill = offer_skill(&community, &provider, "Tax returns", "other").await?;
    let request = community
        .tasks
        .request_skill_help(&requester.identity, RequestSkillHelpRequest::new(skill.id()))
        .await?;
    ensure!(request.title() == "Get help with: Tax returns");
    ensure!(request.skill_id() == Some(skill.id()));

    let incoming = community.tasks.incoming_requests(&provider.identity).await?;
    ensure!(incoming.iter().map(|task| task.id()).eq([request.id()]));

    community
        .tasks
        .accept_task(&provider.identity, request.id())
        .await?;
    ensure!(community.tasks.incoming_requests(&provider.identity).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_groups_the_requesters_tasks(
    community: Community,
    requester: Member,
    provider: Member,
) -> eyre::Result<()> {
    let waiting = open_task(&community, &requester, "Water plants", 1).await?;
    let claimed = open_task(&community, &requester, "Assemble shelves", 2).await?;
    let finished = open_task(&community, &requester, "Proofread essay", 1).await?;
    open_task(&community, &provider, "Someone else's task", 1).await?;
    community.tasks.accept_task(&provider.identity, claimed).await?;
    community.tasks.accept_task(&provider.identity, finished).await?;
    community.tasks.complete_task(&provider.identity, finished).await?;

    let board = community.tasks.task_board(&requester.identity).await?;

    ensure!(board.len() == 3);
    ensure!(board.open.iter().map(|task| task.id()).eq([waiting]));
    ensure!(board.active.iter().map(|task| task.id()).eq([claimed]));
    ensure!(board.completed.iter().map(|task| task.id()).eq([finished]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owners_remove_their_skills_from_search(
    community: Community,
    provider: Member,
) -> eyre::Result<()> {
    let skill = offer_skill(&community, &provider, "Dog walking", "caregiving").await?;

    community
        .skills
        .delete_skill(&provider.identity, skill.id())
        .await?;

    ensure!(community.skills.my_skills(&provider.identity).await?.is_empty());
    ensure!(community.skills.find_skill(skill.id()).await?.is_none());
    Ok(())
}
