//! Service layer for reading and editing profiles.

use crate::error::ErrorKind;
use crate::identity::{IdentityError, IdentityProvider, UserId};
use crate::profile::{
    domain::{Badge, Profile, ProfileDomainError},
    ports::{ProfileRepository, ProfileRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for editing the caller's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    full_name: String,
    bio: String,
}

impl UpdateProfileRequest {
    /// Creates a request setting the display name and clearing the bio.
    #[must_use]
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            bio: String::new(),
        }
    }

    /// Sets the bio.
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }
}

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// No authenticated principal.
    #[error(transparent)]
    Authentication(#[from] IdentityError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProfileDomainError),
    /// The member has no profile.
    #[error("profile not found: {0}")]
    NotFound(UserId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
}

impl ProfileServiceError {
    /// Classifies the error for user-facing reporting.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Domain(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(ProfileRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(ProfileRepositoryError::DuplicateProfile(_)) => ErrorKind::Conflict,
            Self::Repository(ProfileRepositoryError::Persistence(_)) => ErrorKind::Persistence,
        }
    }
}

/// Result type for profile service operations.
pub type ProfileServiceResult<T> = Result<T, ProfileServiceError>;

/// Profile orchestration service.
#[derive(Clone)]
pub struct ProfileService<R, C>
where
    R: ProfileRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProfileService<R, C>
where
    R: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new profile service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns any member's profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when the lookup fails.
    pub async fn get_profile(&self, user: UserId) -> ProfileServiceResult<Option<Profile>> {
        Ok(self.repository.find_by_id(user).await?)
    }

    /// Returns the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Authentication`] without a principal
    /// and [`ProfileServiceError::NotFound`] when no profile exists.
    pub async fn my_profile(&self, identity: &impl IdentityProvider) -> ProfileServiceResult<Profile> {
        let user = identity.require_principal()?;
        self.repository
            .find_by_id(user)
            .await?
            .ok_or(ProfileServiceError::NotFound(user))
    }

    /// Edits the caller's display name and bio.
    ///
    /// Only the caller's own profile is reachable, so no other member can
    /// edit it.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Domain`] for a blank display name and
    /// [`ProfileServiceError::NotFound`] when no profile exists.
    pub async fn update_my_profile(
        &self,
        identity: &impl IdentityProvider,
        request: UpdateProfileRequest,
    ) -> ProfileServiceResult<Profile> {
        let mut profile = self.my_profile(identity).await?;
        profile.update(&request.full_name, &request.bio, &*self.clock)?;
        self.repository.update(&profile).await?;
        info!(user_id = %profile.id(), "profile updated");
        Ok(profile)
    }

    /// Lists a member's badges, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when the read fails.
    pub async fn badges(&self, user: UserId) -> ProfileServiceResult<Vec<Badge>> {
        Ok(self.repository.badges_for(user).await?)
    }
}
