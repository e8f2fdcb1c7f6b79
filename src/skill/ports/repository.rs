//! Repository port for skill persistence and discovery.

use crate::identity::UserId;
use crate::skill::domain::{Skill, SkillCategory, SkillId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for skill repository operations.
pub type SkillRepositoryResult<T> = Result<T, SkillRepositoryError>;

/// Filtered read over the skill catalogue.
///
/// All filters are optional; an empty query lists every skill up to the
/// limit. Results are ordered newest first with no relevance ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillQuery {
    term: Option<String>,
    category: Option<SkillCategory>,
    excluded_owner: Option<UserId>,
    limit: Option<usize>,
}

impl SkillQuery {
    /// Creates an unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to skills whose name or description contains
    /// `term`, ignoring case. Blank terms are ignored.
    #[must_use]
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        let raw = term.into();
        let trimmed = raw.trim();
        self.term = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Restricts results to one category.
    #[must_use]
    pub const fn with_category(mut self, category: SkillCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Drops skills offered by `owner`.
    #[must_use]
    pub const fn excluding_owner(mut self, owner: UserId) -> Self {
        self.excluded_owner = Some(owner);
        self
    }

    /// Caps the number of results.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the search term, if any.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// Returns the category filter, if any.
    #[must_use]
    pub const fn category(&self) -> Option<SkillCategory> {
        self.category
    }

    /// Returns the excluded owner, if any.
    #[must_use]
    pub const fn excluded_owner(&self) -> Option<UserId> {
        self.excluded_owner
    }

    /// Returns the result cap, if any.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns whether `skill` passes every filter except the limit.
    #[must_use]
    pub fn matches(&self, skill: &Skill) -> bool {
        let term_matches = self.term().is_none_or(|term| skill.matches_term(term));
        let category_matches = self
            .category
            .is_none_or(|category| skill.category() == category);
        let owner_allowed = self
            .excluded_owner
            .is_none_or(|owner| skill.owner_id() != owner);
        term_matches && category_matches && owner_allowed
    }
}

/// Skill persistence contract.
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Stores a newly offered skill.
    ///
    /// # Errors
    ///
    /// Returns [`SkillRepositoryError::DuplicateSkill`] when the identifier
    /// already exists.
    async fn store(&self, skill: &Skill) -> SkillRepositoryResult<()>;

    /// Finds a skill by identifier.
    ///
    /// Returns `None` when the skill does not exist.
    async fn find_by_id(&self, id: SkillId) -> SkillRepositoryResult<Option<Skill>>;

    /// Returns the skills offered by `owner`, newest first.
    async fn find_by_owner(&self, owner: UserId) -> SkillRepositoryResult<Vec<Skill>>;

    /// Deletes a skill.
    ///
    /// # Errors
    ///
    /// Returns [`SkillRepositoryError::NotFound`] when the skill does not
    /// exist.
    async fn delete(&self, id: SkillId) -> SkillRepositoryResult<()>;

    /// Runs a filtered read over the catalogue, newest first.
    async fn search(&self, query: &SkillQuery) -> SkillRepositoryResult<Vec<Skill>>;
}

/// Errors returned by skill repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SkillRepositoryError {
    /// A skill with the same identifier already exists.
    #[error("duplicate skill identifier: {0}")]
    DuplicateSkill(SkillId),

    /// The skill was not found.
    #[error("skill not found: {0}")]
    NotFound(SkillId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SkillRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
