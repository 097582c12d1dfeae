//! Driving port for reading the caller's profile.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile};

/// Read-side profile use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Profile of `user_id`; `not_found` when none exists.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, Error>;
}
