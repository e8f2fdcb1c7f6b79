//! Service layer for offering, listing, deleting, and searching skills.

use crate::error::ErrorKind;
use crate::identity::{IdentityError, IdentityProvider, UserId};
use crate::skill::{
    domain::{Skill, SkillCategory, SkillDomainError, SkillId, SkillName},
    ports::{SkillQuery, SkillRepository, SkillRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for offering a new skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferSkillRequest {
    name: String,
    category: String,
    description: String,
}

impl OfferSkillRequest {
    /// Creates a request with the skill name and category.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request payload for browsing the skill catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSearchRequest {
    term: Option<String>,
    category: Option<String>,
    exclude_own: bool,
}

impl SkillSearchRequest {
    /// Creates an unfiltered search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text term matched against name and description.
    #[must_use]
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    /// Sets the category filter.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Hides the caller's own skills.
    #[must_use]
    pub const fn excluding_own(mut self) -> Self {
        self.exclude_own = true;
        self
    }
}

/// Service-level errors for skill operations.
#[derive(Debug, Error)]
pub enum SkillServiceError {
    /// No authenticated principal.
    #[error(transparent)]
    Authentication(#[from] IdentityError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SkillDomainError),
    /// The skill does not exist.
    #[error("skill not found: {0}")]
    NotFound(SkillId),
    /// The caller does not own the skill.
    #[error("user {user_id} does not own skill {skill_id}")]
    NotOwner {
        /// Skill the caller tried to modify.
        skill_id: SkillId,
        /// The caller.
        user_id: UserId,
    },
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SkillRepositoryError),
}

impl SkillServiceError {
    /// Classifies the error for user-facing reporting.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Domain(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(SkillRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::NotOwner { .. } => ErrorKind::Authorization,
            Self::Repository(SkillRepositoryError::DuplicateSkill(_)) => ErrorKind::Conflict,
            Self::Repository(SkillRepositoryError::Persistence(_)) => ErrorKind::Persistence,
        }
    }
}

/// Result type for skill service operations.
pub type SkillServiceResult<T> = Result<T, SkillServiceError>;

/// Skill catalogue orchestration service.
#[derive(Clone)]
pub struct SkillService<R, C>
where
    R: SkillRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    search_limit: usize,
}

impl<R, C> SkillService<R, C>
where
    R: SkillRepository,
    C: Clock + Send + Sync,
{
    /// Default cap on search results.
    pub const DEFAULT_SEARCH_LIMIT: usize = 50;

    /// Creates a new skill service with the default search limit.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            search_limit: Self::DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Overrides the search result cap.
    #[must_use]
    pub const fn with_search_limit(mut self, search_limit: usize) -> Self {
        self.search_limit = search_limit;
        self
    }

    /// Offers a new skill on behalf of the caller.
    ///
    /// # Errors
    ///
    /// Returns [`SkillServiceError::Authentication`] without a principal,
    /// [`SkillServiceError::Domain`] for a blank name or unknown category,
    /// and [`SkillServiceError::Repository`] when persistence fails.
    pub async fn offer_skill(
        &self,
        identity: &impl IdentityProvider,
        request: OfferSkillRequest,
    ) -> SkillServiceResult<Skill> {
        let owner = identity.require_principal()?;
        let name = SkillName::new(request.name)?;
        let category = SkillCategory::try_from(request.category.as_str())?;
        let skill = Skill::new(owner, name, category, request.description, &*self.clock);
        self.repository.store(&skill).await?;
        info!(skill_id = %skill.id(), user_id = %owner, category = %category, "skill offered");
        Ok(skill)
    }

    /// Lists the caller's skills, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`SkillServiceError::Authentication`] without a principal and
    /// [`SkillServiceError::Repository`] when the lookup fails.
    pub async fn my_skills(&self, identity: &impl IdentityProvider) -> SkillServiceResult<Vec<Skill>> {
        let owner = identity.require_principal()?;
        Ok(self.repository.find_by_owner(owner).await?)
    }

    /// Finds a skill by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SkillServiceError::Repository`] when the lookup fails.
    pub async fn find_skill(&self, skill_id: SkillId) -> SkillServiceResult<Option<Skill>> {
        Ok(self.repository.find_by_id(skill_id).await?)
    }

    /// Deletes one of the caller's skills.
    ///
    /// # Errors
    ///
    /// Returns [`SkillServiceError::NotFound`] for unknown skills and
    /// [`SkillServiceError::NotOwner`] when the caller does not own it.
    pub async fn delete_skill(
        &self,
        identity: &impl IdentityProvider,
        skill_id: SkillId,
    ) -> SkillServiceResult<()> {
        let caller = identity.require_principal()?;
        let skill = self
            .repository
            .find_by_id(skill_id)
            .await?
            .ok_or(SkillServiceError::NotFound(skill_id))?;
        if skill.owner_id() != caller {
            return Err(SkillServiceError::NotOwner {
                skill_id,
                user_id: caller,
            });
        }
        self.repository.delete(skill_id).await?;
        info!(skill_id = %skill_id, user_id = %caller, "skill deleted");
        Ok(())
    }

    /// Searches the catalogue.
    ///
    /// Anonymous callers may search; `excluding_own` only applies when a
    /// principal is present.
    ///
    /// # Errors
    ///
    /// Returns [`SkillServiceError::Domain`] for an unknown category and
    /// [`SkillServiceError::Repository`] when the read fails.
    pub async fn search(
        &self,
        identity: &impl IdentityProvider,
        request: SkillSearchRequest,
    ) -> SkillServiceResult<Vec<Skill>> {
        let mut query = SkillQuery::new().with_limit(self.search_limit);
        if let Some(term) = request.term {
            query = query.with_term(term);
        }
        if let Some(category) = request.category {
            query = query.with_category(SkillCategory::try_from(category.as_str())?);
        }
        if request.exclude_own
            && let Some(caller) = identity.current_principal()
        {
            query = query.excluding_owner(caller);
        }
        let skills = self.repository.search(&query).await?;
        debug!(results = skills.len(), "skill search completed");
        Ok(skills)
    }
}
