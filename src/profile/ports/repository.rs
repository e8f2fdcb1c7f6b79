//! Repository port for profiles and badges.

use crate::identity::UserId;
use crate::profile::domain::{Badge, Profile};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Profile persistence contract.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Stores the profile of a newly registered member.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::DuplicateProfile`] when the member
    /// already has one.
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()>;

    /// Finds a member's profile.
    async fn find_by_id(&self, id: UserId) -> ProfileRepositoryResult<Option<Profile>>;

    /// Persists an edited profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::NotFound`] when the profile does
    /// not exist.
    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()>;

    /// Returns a member's badges, most recently earned first.
    async fn badges_for(&self, user: UserId) -> ProfileRepositoryResult<Vec<Badge>>;
}

/// Errors returned by profile repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// The member already has a profile.
    #[error("duplicate profile: {0}")]
    DuplicateProfile(UserId),

    /// The profile was not found.
    #[error("profile not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
