//! Skill aggregate and its identifier.

use super::{SkillCategory, SkillDomainError};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an offered skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(Uuid);

impl SkillId {
    /// Creates a new random skill identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a skill identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SkillId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty, trimmed skill name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillName(String);

impl SkillName {
    /// Creates a validated skill name.
    ///
    /// # Errors
    ///
    /// Returns [`SkillDomainError::EmptyName`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, SkillDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SkillDomainError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A capability a member offers to the community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    id: SkillId,
    owner_id: UserId,
    name: SkillName,
    category: SkillCategory,
    description: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSkillData {
    /// Persisted skill identifier.
    pub id: SkillId,
    /// Member offering the skill.
    pub owner_id: UserId,
    /// Persisted name.
    pub name: SkillName,
    /// Persisted category.
    pub category: SkillCategory,
    /// Persisted free-text description.
    pub description: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Skill {
    /// Creates a newly offered skill.
    #[must_use]
    pub fn new(
        owner_id: UserId,
        name: SkillName,
        category: SkillCategory,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: SkillId::new(),
            owner_id,
            name,
            category,
            description: description.into().trim().to_owned(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a skill from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSkillData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            name: data.name,
            category: data.category,
            description: data.description,
            created_at: data.created_at,
        }
    }

    /// Returns the skill identifier.
    #[must_use]
    pub const fn id(&self) -> SkillId {
        self.id
    }

    /// Returns the member offering the skill.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the skill name.
    #[must_use]
    pub const fn name(&self) -> &SkillName {
        &self.name
    }

    /// Returns the skill category.
    #[must_use]
    pub const fn category(&self) -> SkillCategory {
        self.category
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether `term` occurs in the name or description, ignoring
    /// case.
    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.as_str().to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
