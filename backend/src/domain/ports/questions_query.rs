//! Driving port for the question feed and detail views.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, QuestionDetail, QuestionId, QuestionSummary};

/// Read-side question use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionsQuery: Send + Sync {
    /// One page of the feed, newest first.
    async fn list_questions(&self, page: PageRequest) -> Result<Vec<QuestionSummary>, Error>;

    /// Full view of one question.
    async fn question_detail(&self, id: QuestionId) -> Result<QuestionDetail, Error>;
}
