//! Topic reference data.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{TopicRepository, TopicsQuery};
use crate::domain::{Error, Topic};

/// Topic service implementing [`TopicsQuery`].
#[derive(Clone)]
pub struct TopicService<T> {
    topics: Arc<T>,
}

impl<T> TopicService<T> {
    /// Create a new service over the given repository.
    pub const fn new(topics: Arc<T>) -> Self {
        Self { topics }
    }
}

#[async_trait]
impl<T> TopicsQuery for TopicService<T>
where
    T: TopicRepository,
{
    async fn list_topics(&self) -> Result<Vec<Topic>, Error> {
        Ok(self.topics.list_all().await?)
    }
}
