//! Answer listing and submission.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::debug;

use crate::domain::author::{AuthorLookup, distinct_author_ids};
use crate::domain::ports::{
    AnswerRepository, AnswersCommand, AnswersQuery, CreateAnswerRequest, ProfileRepository,
    QuestionRepository,
};
use crate::domain::{
    AnswerDraft, AnswerSummary, AnswerValidationError, CreatedAnswer, Error, NewAnswer,
    QuestionId, Role,
};

/// Message returned when a non-answerer tries to answer.
pub const ANSWERER_ONLY_MESSAGE: &str = "Only Answerer can create answers";

/// Answer service implementing [`AnswersQuery`] and [`AnswersCommand`].
#[derive(Clone)]
pub struct AnswerService<A, Q, P> {
    answers: Arc<A>,
    questions: Arc<Q>,
    profiles: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<A, Q, P> AnswerService<A, Q, P> {
    /// Create a new service over the given repositories.
    pub fn new(answers: Arc<A>, questions: Arc<Q>, profiles: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            answers,
            questions,
            profiles,
            clock,
        }
    }
}

fn validation_error(error: &AnswerValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": error.field() }))
}

impl<A, Q, P> AnswerService<A, Q, P>
where
    A: AnswerRepository,
    Q: QuestionRepository,
    P: ProfileRepository,
{
    async fn ensure_answerer(&self, request: &CreateAnswerRequest) -> Result<(), Error> {
        let role = self
            .profiles
            .find_by_id(&request.author_id)
            .await?
            .map(|profile| profile.role);
        if role == Some(Role::Answerer) {
            Ok(())
        } else {
            debug!(user_id = %request.author_id, ?role, "answer rejected for role");
            Err(Error::forbidden(ANSWERER_ONLY_MESSAGE))
        }
    }

    async fn existing_question(&self, raw: Option<i64>) -> Result<QuestionId, Error> {
        let question_id = raw
            .and_then(|value| QuestionId::new(value).ok())
            .ok_or_else(|| validation_error(&AnswerValidationError::QuestionIdRequired))?;
        if self.questions.exists(question_id).await? {
            Ok(question_id)
        } else {
            Err(Error::not_found("Question not found"))
        }
    }
}

#[async_trait]
impl<A, Q, P> AnswersQuery for AnswerService<A, Q, P>
where
    A: AnswerRepository,
    Q: QuestionRepository,
    P: ProfileRepository,
{
    async fn list_answers(&self, question_id: QuestionId) -> Result<Vec<AnswerSummary>, Error> {
        let rows = self.answers.list_for_question(question_id).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let author_ids = distinct_author_ids(rows.iter().map(|row| &row.author_id));
        let authors = AuthorLookup::from_profiles(self.profiles.find_authors(&author_ids).await?);
        Ok(rows
            .into_iter()
            .map(|row| {
                let author = authors.resolve(&row.author_id);
                AnswerSummary {
                    id: row.id,
                    question_id: row.question_id,
                    author_display_name: author.display_name,
                    author_avatar_url: author.avatar_url,
                    title: row.title,
                    content: row.content,
                    upvote_count: row.upvote_count,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                }
            })
            .collect())
    }
}

#[async_trait]
impl<A, Q, P> AnswersCommand for AnswerService<A, Q, P>
where
    A: AnswerRepository,
    Q: QuestionRepository,
    P: ProfileRepository,
{
    async fn create_answer(&self, request: CreateAnswerRequest) -> Result<CreatedAnswer, Error> {
        self.ensure_answerer(&request).await?;
        let question_id = self.existing_question(request.question_id).await?;
        let draft = AnswerDraft::try_new(request.title.as_deref(), request.content.as_deref())
            .map_err(|err| validation_error(&err))?;
        let answer = NewAnswer {
            question_id,
            author_id: request.author_id,
            draft,
            created_at: self.clock.utc(),
        };
        let answer_id = self.answers.insert(&answer).await?;
        Ok(CreatedAnswer { answer_id })
    }
}

#[cfg(test)]
#[path = "answer_service_tests.rs"]
mod tests;
