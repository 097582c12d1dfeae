//! Driven port for question persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, NewQuestion, QuestionId, QuestionRecord, TopicMappingRow};

use super::define_port_error;

define_port_error! {
    /// Errors raised by question repository adapters.
    pub enum QuestionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "question repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "{message}",
    }
}

impl From<QuestionRepositoryError> for Error {
    fn from(error: QuestionRepositoryError) -> Self {
        match error {
            QuestionRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("question repository unavailable: {message}"))
            }
            QuestionRepositoryError::Query { message } => Self::upstream(message),
        }
    }
}

/// Port for reading and writing questions and their topic mappings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Questions ordered newest first, restricted to `page`.
    async fn list_page(
        &self,
        page: PageRequest,
    ) -> Result<Vec<QuestionRecord>, QuestionRepositoryError>;

    /// Fetch one question.
    async fn find_by_id(
        &self,
        id: QuestionId,
    ) -> Result<Option<QuestionRecord>, QuestionRepositoryError>;

    /// Whether a question exists.
    async fn exists(&self, id: QuestionId) -> Result<bool, QuestionRepositoryError>;

    /// Topic join rows for the given questions, in mapping insertion order.
    async fn topic_mappings(
        &self,
        question_ids: &[QuestionId],
    ) -> Result<Vec<TopicMappingRow>, QuestionRepositoryError>;

    /// Insert the question and its topic mappings as one unit.
    ///
    /// Either both the question row and every mapping row are stored, or
    /// nothing is.
    async fn insert(&self, question: &NewQuestion) -> Result<QuestionId, QuestionRepositoryError>;

    /// Atomically add one to the view counter.
    ///
    /// Unknown ids are not an error.
    async fn increment_view_count(&self, id: QuestionId) -> Result<(), QuestionRepositoryError>;
}
