//! Driven port for topic reference data.

use async_trait::async_trait;

use crate::domain::{Error, Topic, TopicId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by topic repository adapters.
    pub enum TopicRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "topic repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "{message}",
    }
}

impl From<TopicRepositoryError> for Error {
    fn from(error: TopicRepositoryError) -> Self {
        match error {
            TopicRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("topic repository unavailable: {message}"))
            }
            TopicRepositoryError::Query { message } => Self::upstream(message),
        }
    }
}

/// Port for reading topics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Every topic, ordered by name.
    async fn list_all(&self) -> Result<Vec<Topic>, TopicRepositoryError>;

    /// The subset of `ids` that exist, in one batched lookup.
    async fn existing_ids(&self, ids: &[TopicId]) -> Result<Vec<TopicId>, TopicRepositoryError>;
}
