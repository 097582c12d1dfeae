//! Driving port for question submission and view tracking.

use async_trait::async_trait;

use crate::domain::{CreatedQuestion, Error, QuestionId, UserId};

/// Unvalidated question submission from an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateQuestionRequest {
    /// Submitting user.
    pub author_id: UserId,
    /// Raw title.
    pub title: Option<String>,
    /// Raw body.
    pub body: Option<String>,
    /// Raw topic ids; non-positive values are ignored.
    pub topic_ids: Vec<i64>,
}

/// Write-side question use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionsCommand: Send + Sync {
    /// Validate and store a new question.
    async fn create_question(&self, request: CreateQuestionRequest)
    -> Result<CreatedQuestion, Error>;

    /// Count one view of a question.
    async fn record_view(&self, id: QuestionId) -> Result<(), Error>;
}
