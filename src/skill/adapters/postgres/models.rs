//! Diesel row models for skill persistence.

use super::schema::skills;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for skill records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SkillRow {
    /// Skill identifier.
    pub id: uuid::Uuid,
    /// Owning member.
    pub user_id: uuid::Uuid,
    /// Skill name.
    pub skill_name: String,
    /// Lowercase category name.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for skill records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = skills)]
pub struct NewSkillRow {
    /// Skill identifier.
    pub id: uuid::Uuid,
    /// Owning member.
    pub user_id: uuid::Uuid,
    /// Skill name.
    pub skill_name: String,
    /// Lowercase category name.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
