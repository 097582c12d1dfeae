//! Question feed, detail, submission, and view tracking.
//!
//! Reads assemble their payloads from three sequential repository calls:
//! the question rows, the authors of those rows, and their topic mappings.
//! Any failure aborts the whole read; missing authors or topics fall back
//! to defaults instead of dropping rows.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use serde_json::json;
use tracing::debug;

use crate::domain::author::{AuthorLookup, distinct_author_ids};
use crate::domain::excerpt::{DEFAULT_EXCERPT_LEN, make_excerpt};
use crate::domain::ports::{
    CreateQuestionRequest, ProfileRepository, QuestionRepository, QuestionsCommand,
    QuestionsQuery, TopicRepository,
};
use crate::domain::topic::{group_topics_by_question, normalize_topic_ids};
use crate::domain::{
    CreatedQuestion, Error, NewQuestion, QuestionDetail, QuestionDraft, QuestionId,
    QuestionRecord, QuestionSummary, QuestionValidationError, TopicId, TopicSummary,
};

/// Question service implementing [`QuestionsQuery`] and [`QuestionsCommand`].
#[derive(Clone)]
pub struct QuestionService<Q, T, P> {
    questions: Arc<Q>,
    topics: Arc<T>,
    profiles: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<Q, T, P> QuestionService<Q, T, P> {
    /// Create a new service over the given repositories.
    pub fn new(questions: Arc<Q>, topics: Arc<T>, profiles: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            questions,
            topics,
            profiles,
            clock,
        }
    }
}

fn validation_error(error: &QuestionValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": error.field() }))
}

fn summarize(
    row: QuestionRecord,
    authors: &AuthorLookup,
    topics: &mut HashMap<QuestionId, Vec<TopicSummary>>,
) -> QuestionSummary {
    let author = authors.resolve(&row.author_id);
    QuestionSummary {
        id: row.id,
        author_display_name: author.display_name,
        author_avatar_url: author.avatar_url,
        title: row.title,
        excerpt: make_excerpt(row.body.as_deref().unwrap_or_default(), DEFAULT_EXCERPT_LEN),
        view_count: row.view_count,
        created_at: row.created_at,
        topics: topics.remove(&row.id).unwrap_or_default(),
    }
}

impl<Q, T, P> QuestionService<Q, T, P>
where
    Q: QuestionRepository,
    T: TopicRepository,
    P: ProfileRepository,
{
    async fn author_lookup(&self, rows: &[QuestionRecord]) -> Result<AuthorLookup, Error> {
        let author_ids = distinct_author_ids(rows.iter().map(|row| &row.author_id));
        let profiles = self.profiles.find_authors(&author_ids).await?;
        Ok(AuthorLookup::from_profiles(profiles))
    }

    async fn topics_for(
        &self,
        rows: &[QuestionRecord],
    ) -> Result<HashMap<QuestionId, Vec<TopicSummary>>, Error> {
        let question_ids: Vec<QuestionId> = rows.iter().map(|row| row.id).collect();
        let mappings = self.questions.topic_mappings(&question_ids).await?;
        Ok(group_topics_by_question(mappings))
    }

    async fn missing_topics(&self, requested: &[TopicId]) -> Result<Vec<TopicId>, Error> {
        if requested.is_empty() {
            return Ok(Vec::new());
        }
        let existing: HashSet<TopicId> = self
            .topics
            .existing_ids(requested)
            .await?
            .into_iter()
            .collect();
        Ok(requested
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect())
    }
}

#[async_trait]
impl<Q, T, P> QuestionsQuery for QuestionService<Q, T, P>
where
    Q: QuestionRepository,
    T: TopicRepository,
    P: ProfileRepository,
{
    async fn list_questions(&self, page: PageRequest) -> Result<Vec<QuestionSummary>, Error> {
        let rows = self.questions.list_page(page).await?;
        let authors = self.author_lookup(&rows).await?;
        let mut topics = self.topics_for(&rows).await?;
        Ok(rows
            .into_iter()
            .map(|row| summarize(row, &authors, &mut topics))
            .collect())
    }

    async fn question_detail(&self, id: QuestionId) -> Result<QuestionDetail, Error> {
        let row = self
            .questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Question not found"))?;
        let rows = [row];
        let authors = self.author_lookup(&rows).await?;
        let mut topics = self.topics_for(&rows).await?;
        let [row] = rows;
        let author = authors.resolve(&row.author_id);
        Ok(QuestionDetail {
            id: row.id,
            author_display_name: author.display_name,
            author_avatar_url: author.avatar_url,
            title: row.title,
            body: row.body.unwrap_or_default(),
            view_count: row.view_count,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            topics: topics.remove(&row.id).unwrap_or_default(),
        })
    }
}

#[async_trait]
impl<Q, T, P> QuestionsCommand for QuestionService<Q, T, P>
where
    Q: QuestionRepository,
    T: TopicRepository,
    P: ProfileRepository,
{
    async fn create_question(
        &self,
        request: CreateQuestionRequest,
    ) -> Result<CreatedQuestion, Error> {
        let CreateQuestionRequest {
            author_id,
            title,
            body,
            topic_ids,
        } = request;
        let draft = QuestionDraft::try_new(title.as_deref(), body.as_deref())
            .map_err(|err| validation_error(&err))?;
        let topic_ids = normalize_topic_ids(&topic_ids);
        let missing = self.missing_topics(&topic_ids).await?;
        if !missing.is_empty() {
            debug!(?missing, "rejecting question with unknown topics");
            return Err(Error::invalid_request("Some topicIds do not exist")
                .with_details(json!({ "missingTopicIds": missing })));
        }

        let question = NewQuestion {
            author_id,
            draft,
            topic_ids,
            created_at: self.clock.utc(),
        };
        let question_id = self.questions.insert(&question).await?;
        Ok(CreatedQuestion {
            question_id,
            topic_ids: question.topic_ids,
        })
    }

    async fn record_view(&self, id: QuestionId) -> Result<(), Error> {
        self.questions.increment_view_count(id).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "question_service_tests.rs"]
mod tests;
