//! Driven port for user profile persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AuthorProfile, Error, ProfileUpdate, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "{message}",
    }
}

impl From<ProfileRepositoryError> for Error {
    fn from(error: ProfileRepositoryError) -> Self {
        match error {
            ProfileRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("profile repository unavailable: {message}"))
            }
            ProfileRepositoryError::Query { message } => Self::upstream(message),
        }
    }
}

/// Port for reading and writing user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch one profile.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, ProfileRepositoryError>;

    /// Author fields for every id that has a profile, in one query.
    async fn find_authors(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<AuthorProfile>, ProfileRepositoryError>;

    /// Store `profile` unless one already exists for its id.
    ///
    /// Returns `true` when a row was created.
    async fn insert_if_absent(&self, profile: &UserProfile)
    -> Result<bool, ProfileRepositoryError>;

    /// Apply an edit. Returns `false` when no profile exists.
    async fn update(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, ProfileRepositoryError>;
}
