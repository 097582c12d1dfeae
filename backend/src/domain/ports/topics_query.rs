//! Driving port for topic reference data.

use async_trait::async_trait;

use crate::domain::{Error, Topic};

/// Read-side topic use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicsQuery: Send + Sync {
    /// Every topic ordered by name.
    async fn list_topics(&self) -> Result<Vec<Topic>, Error>;
}
