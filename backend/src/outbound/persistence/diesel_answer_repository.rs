//! PostgreSQL-backed `AnswerRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AnswerRepository, AnswerRepositoryError};
use crate::domain::{AnswerId, AnswerRecord, NewAnswer, QuestionId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AnswerRow, NewAnswerRow};
use super::pool::{DbPool, PoolError};
use super::schema::answer;

/// Diesel implementation of [`AnswerRepository`].
#[derive(Clone)]
pub struct DieselAnswerRepository {
    pool: DbPool,
}

impl DieselAnswerRepository {
    /// Repository drawing connections from `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AnswerRepositoryError {
    map_pool_error(error, AnswerRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> AnswerRepositoryError {
    map_diesel_error(
        error,
        AnswerRepositoryError::query,
        AnswerRepositoryError::connection,
    )
}

fn row_to_record(row: AnswerRow) -> Result<AnswerRecord, AnswerRepositoryError> {
    let id = AnswerId::new(row.id).map_err(|err| AnswerRepositoryError::query(err.to_string()))?;
    let question_id = QuestionId::new(row.question_id)
        .map_err(|err| AnswerRepositoryError::query(err.to_string()))?;
    Ok(AnswerRecord {
        id,
        question_id,
        author_id: UserId::from_uuid(row.author_id),
        title: row.title,
        content: row.content,
        upvote_count: row.upvote_count,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl AnswerRepository for DieselAnswerRepository {
    async fn list_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<AnswerRecord>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<AnswerRow> = answer::table
            .filter(answer::question_id.eq(question_id.get()))
            .select(AnswerRow::as_select())
            .order((answer::created_at.desc(), answer::id.desc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn insert(&self, new_answer: &NewAnswer) -> Result<AnswerId, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewAnswerRow {
            question_id: new_answer.question_id.get(),
            author_id: *new_answer.author_id.as_uuid(),
            title: new_answer.draft.title(),
            content: new_answer.draft.content(),
            upvote_count: 0,
            created_at: new_answer.created_at,
            updated_at: new_answer.created_at,
        };

        let raw_id: i64 = diesel::insert_into(answer::table)
            .values(&row)
            .returning(answer::id)
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        AnswerId::new(raw_id).map_err(|err| AnswerRepositoryError::query(err.to_string()))
    }
}
