//! Driven port for answer persistence.

use async_trait::async_trait;

use crate::domain::{Error, AnswerId, AnswerRecord, NewAnswer, QuestionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by answer repository adapters.
    pub enum AnswerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "answer repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "{message}",
    }
}

impl From<AnswerRepositoryError> for Error {
    fn from(error: AnswerRepositoryError) -> Self {
        match error {
            AnswerRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("answer repository unavailable: {message}"))
            }
            AnswerRepositoryError::Query { message } => Self::upstream(message),
        }
    }
}

/// Port for reading and writing answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Answers to a question, newest first.
    async fn list_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<AnswerRecord>, AnswerRepositoryError>;

    /// Insert an answer with a zero upvote count.
    async fn insert(&self, answer: &NewAnswer) -> Result<AnswerId, AnswerRepositoryError>;
}
