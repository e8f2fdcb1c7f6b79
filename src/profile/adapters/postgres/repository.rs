//! `PostgreSQL` repository implementation for profiles and badges.

use super::{
    models::{BadgeRow, ProfileChangeset, ProfileRow},
    schema::{badges, profiles},
};
use crate::identity::UserId;
use crate::persistence::{PgPool, get_conn_with, run_blocking_with};
use crate::profile::{
    domain::{Badge, BadgeId, BadgeType, PersistedBadgeData, PersistedProfileData, Profile},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed profile repository.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProfileRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProfileRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, ProfileRepositoryError::persistence)?;
                f(&mut connection)
            },
            ProfileRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let user_id = profile.id();
        let row = ProfileRow {
            id: user_id.into_inner(),
            full_name: profile.full_name().map(str::to_owned),
            bio: profile.bio().map(str::to_owned),
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(profiles::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProfileRepositoryError::DuplicateProfile(user_id)
                    }
                    _ => ProfileRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> ProfileRepositoryResult<Option<Profile>> {
        self.run_blocking(move |connection| {
            let row = profiles::table
                .filter(profiles::id.eq(id.into_inner()))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(row.map(row_to_profile))
        })
        .await
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let user_id = profile.id();
        let changeset = ProfileChangeset {
            full_name: profile.full_name().map(str::to_owned),
            bio: profile.bio().map(str::to_owned),
            updated_at: profile.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated = diesel::update(profiles::table.filter(profiles::id.eq(user_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ProfileRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn badges_for(&self, user: UserId) -> ProfileRepositoryResult<Vec<Badge>> {
        self.run_blocking(move |connection| {
            let rows = badges::table
                .filter(badges::user_id.eq(user.into_inner()))
                .order(badges::earned_at.desc())
                .select(BadgeRow::as_select())
                .load::<BadgeRow>(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_badge).collect())
        })
        .await
    }
}

fn row_to_profile(row: ProfileRow) -> Profile {
    Profile::from_persisted(PersistedProfileData {
        id: UserId::from_uuid(row.id),
        full_name: row.full_name,
        bio: row.bio,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_badge(row: BadgeRow) -> Badge {
    Badge::from_persisted(PersistedBadgeData {
        id: BadgeId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        badge_type: BadgeType::from(row.badge_type.as_str()),
        badge_name: row.badge_name,
        earned_at: row.earned_at,
    })
}
