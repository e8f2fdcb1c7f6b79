//! In-memory repository for skill tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::UserId;
use crate::skill::{
    domain::{Skill, SkillId},
    ports::{SkillQuery, SkillRepository, SkillRepositoryError, SkillRepositoryResult},
};

/// Thread-safe in-memory skill repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySkillRepository {
    skills: Arc<RwLock<HashMap<SkillId, Skill>>>,
}

impl InMemorySkillRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> SkillRepositoryError {
    SkillRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn newest_first(mut skills: Vec<Skill>) -> Vec<Skill> {
    skills.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
    skills
}

#[async_trait]
impl SkillRepository for InMemorySkillRepository {
    async fn store(&self, skill: &Skill) -> SkillRepositoryResult<()> {
        let mut skills = self.skills.write().map_err(lock_error)?;
        if skills.contains_key(&skill.id()) {
            return Err(SkillRepositoryError::DuplicateSkill(skill.id()));
        }
        skills.insert(skill.id(), skill.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SkillId) -> SkillRepositoryResult<Option<Skill>> {
        let skills = self.skills.read().map_err(lock_error)?;
        Ok(skills.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner: UserId) -> SkillRepositoryResult<Vec<Skill>> {
        let skills = self.skills.read().map_err(lock_error)?;
        let owned = skills
            .values()
            .filter(|skill| skill.owner_id() == owner)
            .cloned()
            .collect();
        Ok(newest_first(owned))
    }

    async fn delete(&self, id: SkillId) -> SkillRepositoryResult<()> {
        let mut skills = self.skills.write().map_err(lock_error)?;
        skills
            .remove(&id)
            .map(|_| ())
            .ok_or(SkillRepositoryError::NotFound(id))
    }

    async fn search(&self, query: &SkillQuery) -> SkillRepositoryResult<Vec<Skill>> {
        let skills = self.skills.read().map_err(lock_error)?;
        let matching = skills
            .values()
            .filter(|skill| query.matches(skill))
            .cloned()
            .collect();
        let ordered = newest_first(matching);
        Ok(match query.limit() {
            Some(limit) => ordered.into_iter().take(limit).collect(),
            None => ordered,
        })
    }
}
