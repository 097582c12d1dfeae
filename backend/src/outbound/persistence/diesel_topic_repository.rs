//! PostgreSQL-backed `TopicRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TopicRepository, TopicRepositoryError};
use crate::domain::{Topic, TopicId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::TopicRow;
use super::pool::{DbPool, PoolError};
use super::schema::topic;

/// Diesel implementation of [`TopicRepository`].
#[derive(Clone)]
pub struct DieselTopicRepository {
    pool: DbPool,
}

impl DieselTopicRepository {
    /// Repository drawing connections from `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> TopicRepositoryError {
    map_pool_error(error, TopicRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> TopicRepositoryError {
    map_diesel_error(
        error,
        TopicRepositoryError::query,
        TopicRepositoryError::connection,
    )
}

fn topic_id(raw: i64) -> Result<TopicId, TopicRepositoryError> {
    TopicId::new(raw).map_err(|err| TopicRepositoryError::query(err.to_string()))
}

#[async_trait]
impl TopicRepository for DieselTopicRepository {
    async fn list_all(&self) -> Result<Vec<Topic>, TopicRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<TopicRow> = topic::table
            .select(TopicRow::as_select())
            .order((topic::name.asc(), topic::id.asc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(Topic {
                    id: topic_id(row.id)?,
                    slug: row.slug,
                    name: row.name,
                    description: row.description,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                })
            })
            .collect()
    }

    async fn existing_ids(&self, ids: &[TopicId]) -> Result<Vec<TopicId>, TopicRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let found: Vec<i64> = topic::table
            .filter(topic::id.eq_any(&raw_ids))
            .select(topic::id)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        found.into_iter().map(topic_id).collect()
    }
}
