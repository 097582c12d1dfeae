//! Driving port for profile bootstrap and edits.

use async_trait::async_trait;

use crate::domain::{Error, ProfileUpdate, UserId};

/// Write-side profile use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Create a questioner profile with a random name unless one exists.
    ///
    /// Returns `true` when a profile was created.
    async fn ensure_profile(&self, user_id: &UserId) -> Result<bool, Error>;

    /// Apply a validated edit to an existing profile.
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<(), Error>;
}
