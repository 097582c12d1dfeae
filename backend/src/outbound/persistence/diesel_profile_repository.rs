//! PostgreSQL-backed `ProfileRepository`.
//!
//! Profile creation relies on `ON CONFLICT (id) DO NOTHING`, so concurrent
//! first sign-ins for the same user create exactly one row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{AuthorProfile, ProfileUpdate, Role, UserId, UserProfile};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AuthorRow, NewUserProfileRow, UserProfileRow, UserProfileUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::user_profile;

/// Diesel implementation of [`ProfileRepository`].
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Repository drawing connections from `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ProfileRepositoryError {
    map_pool_error(error, ProfileRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

fn row_to_profile(row: UserProfileRow) -> UserProfile {
    let role = row.role.parse::<Role>().unwrap_or_else(|_| {
        warn!(
            value = row.role.as_str(),
            user_id = %row.id,
            "unrecognised role value, defaulting to QUESTIONER"
        );
        Role::Questioner
    });

    UserProfile {
        id: UserId::from_uuid(row.id),
        name: row.name,
        display_name: row.display_name,
        avatar_url: row.avatar_url,
        role,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserProfileRow> = user_profile::table
            .find(*id.as_uuid())
            .select(UserProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(row_to_profile))
    }

    async fn find_authors(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<AuthorProfile>, ProfileRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw_ids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<AuthorRow> = user_profile::table
            .filter(user_profile::id.eq_any(&raw_ids))
            .select(AuthorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|row| AuthorProfile {
                id: UserId::from_uuid(row.id),
                display_name: row.display_name,
                avatar_url: row.avatar_url,
            })
            .collect())
    }

    async fn insert_if_absent(
        &self,
        profile: &UserProfile,
    ) -> Result<bool, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewUserProfileRow {
            id: *profile.id.as_uuid(),
            name: profile.name.as_deref(),
            display_name: &profile.display_name,
            avatar_url: profile.avatar_url.as_deref(),
            role: profile.role.as_str(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        };

        let inserted = diesel::insert_into(user_profile::table)
            .values(&row)
            .on_conflict(user_profile::id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(inserted == 1)
    }

    async fn update(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changes = UserProfileUpdate {
            display_name: update.display_name().as_ref(),
            name: update.name(),
            updated_at,
        };

        let updated = diesel::update(user_profile::table.find(*id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(updated > 0)
    }
}
