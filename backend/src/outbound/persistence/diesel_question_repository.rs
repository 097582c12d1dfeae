//! PostgreSQL-backed `QuestionRepository`.
//!
//! Question creation writes the question row and its topic mappings inside
//! one transaction. View counts are bumped with a single
//! `UPDATE ... SET view_count = view_count + 1`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::PageRequest;

use crate::domain::ports::{QuestionRepository, QuestionRepositoryError};
use crate::domain::{
    NewQuestion, QuestionId, QuestionRecord, QuestionStatus, TopicId, TopicMappingRow,
    TopicSummary, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewQuestionRow, NewQuestionTopicRow, QuestionRow, TopicSummaryRow};
use super::pool::{DbPool, PoolError};
use super::schema::{question, question_topic_mapping, topic};

/// Diesel implementation of [`QuestionRepository`].
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Repository drawing connections from `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> QuestionRepositoryError {
    map_pool_error(error, QuestionRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> QuestionRepositoryError {
    map_diesel_error(
        error,
        QuestionRepositoryError::query,
        QuestionRepositoryError::connection,
    )
}

fn question_id(raw: i64) -> Result<QuestionId, QuestionRepositoryError> {
    QuestionId::new(raw).map_err(|err| QuestionRepositoryError::query(err.to_string()))
}

fn row_to_record(row: QuestionRow) -> Result<QuestionRecord, QuestionRepositoryError> {
    let status = row
        .status
        .parse::<QuestionStatus>()
        .map_err(|err| QuestionRepositoryError::query(err.to_string()))?;
    Ok(QuestionRecord {
        id: question_id(row.id)?,
        author_id: UserId::from_uuid(row.author_id),
        title: row.title,
        body: row.description,
        status,
        view_count: row.view_count,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn summary_row(row: TopicSummaryRow) -> Result<TopicSummary, QuestionRepositoryError> {
    let id = TopicId::new(row.id).map_err(|err| QuestionRepositoryError::query(err.to_string()))?;
    Ok(TopicSummary {
        id,
        slug: row.slug,
        name: row.name,
    })
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn list_page(
        &self,
        page: PageRequest,
    ) -> Result<Vec<QuestionRecord>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<QuestionRow> = question::table
            .select(QuestionRow::as_select())
            .order((question::created_at.desc(), question::id.desc()))
            .offset(saturating_i64(page.offset()))
            .limit(saturating_i64(page.limit()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn find_by_id(
        &self,
        id: QuestionId,
    ) -> Result<Option<QuestionRecord>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<QuestionRow> = question::table
            .find(id.get())
            .select(QuestionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn exists(&self, id: QuestionId) -> Result<bool, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::select(diesel::dsl::exists(question::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)
    }

    async fn topic_mappings(
        &self,
        question_ids: &[QuestionId],
    ) -> Result<Vec<TopicMappingRow>, QuestionRepositoryError> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw_ids: Vec<i64> = question_ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<(i64, Option<TopicSummaryRow>)> = question_topic_mapping::table
            .left_join(topic::table)
            .filter(question_topic_mapping::question_id.eq_any(&raw_ids))
            .order(question_topic_mapping::id.asc())
            .select((
                question_topic_mapping::question_id,
                Option::<TopicSummaryRow>::as_select(),
            ))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|(raw_question_id, topic_row)| {
                let topic = topic_row.map(summary_row).transpose()?;
                Ok(TopicMappingRow::from_join(question_id(raw_question_id)?, topic))
            })
            .collect()
    }

    async fn insert(&self, new_question: &NewQuestion) -> Result<QuestionId, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewQuestionRow {
            author_id: *new_question.author_id.as_uuid(),
            title: new_question.draft.title(),
            description: new_question.draft.body(),
            status: QuestionStatus::Open.as_str(),
            view_count: 0,
            created_at: new_question.created_at,
            updated_at: new_question.created_at,
        };
        let topic_ids: Vec<i64> = new_question.topic_ids.iter().map(|id| id.get()).collect();
        let created_at = new_question.created_at;

        let raw_id = conn
            .transaction(|conn| {
                async move {
                    let raw_id: i64 = diesel::insert_into(question::table)
                        .values(&row)
                        .returning(question::id)
                        .get_result(conn)
                        .await?;

                    if !topic_ids.is_empty() {
                        let mappings: Vec<NewQuestionTopicRow> = topic_ids
                            .iter()
                            .map(|&topic_id| NewQuestionTopicRow {
                                question_id: raw_id,
                                topic_id,
                                created_at,
                                updated_at: created_at,
                            })
                            .collect();
                        diesel::insert_into(question_topic_mapping::table)
                            .values(&mappings)
                            .execute(conn)
                            .await?;
                    }

                    Ok::<_, diesel::result::Error>(raw_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        question_id(raw_id)
    }

    async fn increment_view_count(&self, id: QuestionId) -> Result<(), QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::update(question::table.find(id.get()))
            .set(question::view_count.eq(question::view_count + 1_i64))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
