//! In-memory repository for profile tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::UserId;
use crate::profile::{
    domain::{Badge, Profile},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};

/// Thread-safe in-memory profile repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    state: Arc<RwLock<InMemoryProfileState>>,
}

#[derive(Debug, Default)]
struct InMemoryProfileState {
    profiles: HashMap<UserId, Profile>,
    badges: Vec<Badge>,
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a badge awarded outside the profile service.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn award_badge(&self, badge: Badge) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.badges.push(badge);
        Ok(())
    }
}

fn lock_error(err: impl ToString) -> ProfileRepositoryError {
    ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.profiles.contains_key(&profile.id()) {
            return Err(ProfileRepositoryError::DuplicateProfile(profile.id()));
        }
        state.profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> ProfileRepositoryResult<Option<Profile>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.profiles.get(&id).cloned())
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .profiles
            .get_mut(&profile.id())
            .ok_or(ProfileRepositoryError::NotFound(profile.id()))?;
        *stored = profile.clone();
        Ok(())
    }

    async fn badges_for(&self, user: UserId) -> ProfileRepositoryResult<Vec<Badge>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut earned: Vec<Badge> = state
            .badges
            .iter()
            .filter(|badge| badge.user_id() == user)
            .cloned()
            .collect();
        earned.sort_by(|left, right| right.earned_at().cmp(&left.earned_at()));
        Ok(earned)
    }
}
