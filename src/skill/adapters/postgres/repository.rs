//! `PostgreSQL` repository implementation for skill storage.

use super::{
    models::{NewSkillRow, SkillRow},
    schema::skills,
};
use crate::identity::UserId;
use crate::persistence::{PgPool, get_conn_with, run_blocking_with};
use crate::skill::{
    domain::{PersistedSkillData, Skill, SkillCategory, SkillId, SkillName},
    ports::{SkillQuery, SkillRepository, SkillRepositoryError, SkillRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed skill repository.
#[derive(Debug, Clone)]
pub struct PostgresSkillRepository {
    pool: PgPool,
}

impl PostgresSkillRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SkillRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SkillRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, SkillRepositoryError::persistence)?;
                f(&mut connection)
            },
            SkillRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl SkillRepository for PostgresSkillRepository {
    async fn store(&self, skill: &Skill) -> SkillRepositoryResult<()> {
        let skill_id = skill.id();
        let new_row = NewSkillRow {
            id: skill_id.into_inner(),
            user_id: skill.owner_id().into_inner(),
            skill_name: skill.name().as_str().to_owned(),
            category: skill.category().as_str().to_owned(),
            description: skill.description().to_owned(),
            created_at: skill.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(skills::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SkillRepositoryError::DuplicateSkill(skill_id)
                    }
                    _ => SkillRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: SkillId) -> SkillRepositoryResult<Option<Skill>> {
        self.run_blocking(move |connection| {
            let row = skills::table
                .filter(skills::id.eq(id.into_inner()))
                .select(SkillRow::as_select())
                .first::<SkillRow>(connection)
                .optional()
                .map_err(SkillRepositoryError::persistence)?;
            row.map(row_to_skill).transpose()
        })
        .await
    }

    async fn find_by_owner(&self, owner: UserId) -> SkillRepositoryResult<Vec<Skill>> {
        self.run_blocking(move |connection| {
            let rows = skills::table
                .filter(skills::user_id.eq(owner.into_inner()))
                .order(skills::created_at.desc())
                .select(SkillRow::as_select())
                .load::<SkillRow>(connection)
                .map_err(SkillRepositoryError::persistence)?;
            rows.into_iter().map(row_to_skill).collect()
        })
        .await
    }

    async fn delete(&self, id: SkillId) -> SkillRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(skills::table.filter(skills::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(SkillRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(SkillRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn search(&self, query: &SkillQuery) -> SkillRepositoryResult<Vec<Skill>> {
        let filters = query.clone();
        self.run_blocking(move |connection| {
            let mut statement = skills::table.select(SkillRow::as_select()).into_boxed();
            if let Some(term) = filters.term() {
                let pattern = format!("%{}%", escape_like(term));
                statement = statement.filter(
                    skills::skill_name
                        .ilike(pattern.clone())
                        .or(skills::description.ilike(pattern)),
                );
            }
            if let Some(category) = filters.category() {
                statement = statement.filter(skills::category.eq(category.as_str()));
            }
            if let Some(owner) = filters.excluded_owner() {
                statement = statement.filter(skills::user_id.ne(owner.into_inner()));
            }
            if let Some(limit) = filters.limit() {
                statement = statement.limit(i64::try_from(limit).unwrap_or(i64::MAX));
            }

            let rows = statement
                .order(skills::created_at.desc())
                .load::<SkillRow>(connection)
                .map_err(SkillRepositoryError::persistence)?;
            rows.into_iter().map(row_to_skill).collect()
        })
        .await
    }
}

fn row_to_skill(row: SkillRow) -> SkillRepositoryResult<Skill> {
    let name = SkillName::new(row.skill_name).map_err(SkillRepositoryError::persistence)?;
    let category =
        SkillCategory::try_from(row.category.as_str()).map_err(SkillRepositoryError::persistence)?;
    Ok(Skill::from_persisted(PersistedSkillData {
        id: SkillId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.user_id),
        name,
        category,
        description: row.description,
        created_at: row.created_at,
    }))
}

/// Escapes `LIKE` wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
