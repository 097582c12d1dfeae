//! Driving port for answer submission.

use async_trait::async_trait;

use crate::domain::{CreatedAnswer, Error, UserId};

/// Unvalidated answer submission from an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAnswerRequest {
    /// Submitting user.
    pub author_id: UserId,
    /// Raw question id.
    pub question_id: Option<i64>,
    /// Raw title.
    pub title: Option<String>,
    /// Raw content.
    pub content: Option<String>,
}

/// Write-side answer use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswersCommand: Send + Sync {
    /// Check the author's role, validate, and store a new answer.
    async fn create_answer(&self, request: CreateAnswerRequest) -> Result<CreatedAnswer, Error>;
}
