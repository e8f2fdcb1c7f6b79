//! Diesel row models for profiles and badges.

use super::schema::{badges, profiles};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row and insert model for profiles.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    /// Member identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub full_name: Option<String>,
    /// Free-text bio.
    pub bio: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Editable profile columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(treat_none_as_null = true)]
pub struct ProfileChangeset {
    /// Display name.
    pub full_name: Option<String>,
    /// Free-text bio.
    pub bio: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for badges.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = badges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BadgeRow {
    /// Badge identifier.
    pub id: uuid::Uuid,
    /// Holder.
    pub user_id: uuid::Uuid,
    /// Kind of recognition.
    pub badge_type: String,
    /// Display name.
    pub badge_name: String,
    /// Award timestamp.
    pub earned_at: DateTime<Utc>,
}
