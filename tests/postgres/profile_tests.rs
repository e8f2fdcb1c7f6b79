//! `PostgreSQL` integration tests for profiles and badges.

use std::sync::Arc;

use crate::postgres::helpers::{
    BoxError, PgContext, PostgresCluster, postgres_cluster, prepare_context, sign_up,
};
use diesel::prelude::*;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use timebank::profile::{
    domain::{BadgeType, Profile},
    ports::{ProfileRepository, ProfileRepositoryError},
    services::{ProfileService, UpdateProfileRequest},
};

#[fixture]
async fn context(postgres_cluster: Option<PostgresCluster>) -> Result<Option<PgContext>, BoxError> {
    prepare_context(postgres_cluster).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_updates_are_persisted(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let member = sign_up(&ctx).await?;
    let profiles = ProfileService::new(Arc::clone(&ctx.profiles), Arc::new(DefaultClock));

    let before = profiles.my_profile(&member.identity).await?;
    assert_eq!(before.display_name(), "Community Member");

    profiles
        .update_my_profile(
            &member.identity,
            UpdateProfileRequest::new("Grace Hopper").with_bio("Debugs anything"),
        )
        .await?;

    let after = profiles
        .get_profile(member.id)
        .await?
        .ok_or("profile missing after update")?;
    assert_eq!(after.display_name(), "Grace Hopper");
    assert_eq!(after.bio(), Some("Debugs anything"));
    assert!(after.updated_at() >= before.updated_at());

    let duplicate = ctx
        .profiles
        .store(&Profile::new(member.id, &DefaultClock))
        .await;
    assert!(matches!(duplicate, Err(ProfileRepositoryError::DuplicateProfile(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn badges_are_read_back_newest_first(
    #[future] context: Result<Option<PgContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = context.await? else {
        return Ok(());
    };
    let member = sign_up(&ctx).await?;
    let mut conn = ctx.raw_connection()?;
    diesel::sql_query(concat!(
        "INSERT INTO badges (id, user_id, badge_type, badge_name, earned_at) VALUES ",
        "(gen_random_uuid(), $1, 'helper', 'Helping Hand', NOW() - INTERVAL '1 day'), ",
        "(gen_random_uuid(), $1, 'trusted', 'Trusted Neighbour', NOW())",
    ))
    .bind::<diesel::sql_types::Uuid, _>(member.id.into_inner())
    .execute(&mut conn)?;

    let badges = ctx.profiles.badges_for(member.id).await?;

    let kinds: Vec<_> = badges.iter().map(|badge| badge.badge_type().clone()).collect();
    assert_eq!(kinds, vec![BadgeType::Trusted, BadgeType::Helper]);
    Ok(())
}
