//! Profile editing and badge listing.

use super::helpers::{Community, Member, community, requester};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;
use timebank::{
    error::ErrorKind,
    profile::{
        domain::{Badge, BadgeId, BadgeType, PersistedBadgeData, Profile},
        ports::ProfileRepository,
        services::UpdateProfileRequest,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_edit_only_their_own_profile(
    community: Community,
    requester: Member,
) -> eyre::Result<()> {
    let neighbour = Member::sign_in();
    community
        .profile_store
        .store(&Profile::new(requester.id, &DefaultClock))
        .await?;
    community
        .profile_store
        .store(&Profile::new(neighbour.id, &DefaultClock))
        .await?;

    let updated = community
        .profiles
        .update_my_profile(
            &requester.identity,
            UpdateProfileRequest::new("Ada Lovelace").with_bio("Retired engineer"),
        )
        .await?;
    ensure!(updated.display_name() == "Ada Lovelace");

    let untouched = community
        .profiles
        .get_profile(neighbour.id)
        .await?
        .ok_or_else(|| eyre::eyre!("neighbour profile missing"))?;
    ensure!(untouched.display_name() == "Community Member");

    let blank = community
        .profiles
        .update_my_profile(&neighbour.identity, UpdateProfileRequest::new("  "))
        .await;
    ensure!(blank.is_err_and(|err| err.kind() == ErrorKind::Validation));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn badges_are_listed_for_their_holder(
    community: Community,
    requester: Member,
) -> eyre::Result<()> {
    community.profile_store.award_badge(Badge::from_persisted(PersistedBadgeData {
        id: BadgeId::new(),
        user_id: requester.id,
        badge_type: BadgeType::Helper,
        badge_name: "Helping Hand".to_owned(),
        earned_at: chrono::Utc::now(),
    }))?;

    let badges = community.profiles.badges(requester.id).await?;
    let others = community.profiles.badges(Member::sign_in().id).await?;

    ensure!(badges.iter().map(Badge::badge_name).eq(["Helping Hand"]));
    ensure!(others.is_empty());
    Ok(())
}
