//! Profile aggregate.

use super::ProfileDomainError;
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Name shown for members who have not set one.
pub const DEFAULT_DISPLAY_NAME: &str = "Community Member";

/// Public profile of a member. Shares its identifier with the member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: UserId,
    full_name: Option<String>,
    bio: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Member the profile belongs to.
    pub id: UserId,
    /// Display name, if set.
    pub full_name: Option<String>,
    /// Free-text bio, if set.
    pub bio: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates the empty profile of a newly registered member.
    #[must_use]
    pub fn new(id: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            full_name: None,
            bio: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            id: data.id,
            full_name: data.full_name,
            bio: data.bio,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the stored display name, if any.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Returns the name to show, falling back to [`DEFAULT_DISPLAY_NAME`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name().unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// Returns the bio, if any.
    #[must_use]
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the display name and bio. A blank bio clears it.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyDisplayName`] when `full_name` is
    /// blank.
    pub fn update(
        &mut self,
        full_name: &str,
        bio: &str,
        clock: &impl Clock,
    ) -> Result<(), ProfileDomainError> {
        let name = full_name.trim();
        if name.is_empty() {
            return Err(ProfileDomainError::EmptyDisplayName);
        }
        let trimmed_bio = bio.trim();
        self.full_name = Some(name.to_owned());
        self.bio = (!trimmed_bio.is_empty()).then(|| trimmed_bio.to_owned());
        self.updated_at = clock.utc();
        Ok(())
    }
}
