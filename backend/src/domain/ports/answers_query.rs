//! Driving port for listing answers.

use async_trait::async_trait;

use crate::domain::{AnswerSummary, Error, QuestionId};

/// Read-side answer use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswersQuery: Send + Sync {
    /// Answers to a question, newest first. Empty when there are none.
    async fn list_answers(&self, question_id: QuestionId) -> Result<Vec<AnswerSummary>, Error>;
}
