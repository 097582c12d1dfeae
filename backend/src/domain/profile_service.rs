//! Profile bootstrap, lookup, and edits.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::display_name::generate_display_name;
use crate::domain::ports::{ProfileCommand, ProfileQuery, ProfileRepository};
use crate::domain::{Error, ProfileUpdate, UserId, UserProfile};

/// Profile service implementing [`ProfileQuery`] and [`ProfileCommand`].
#[derive(Clone)]
pub struct ProfileService<P> {
    profiles: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> ProfileService<P> {
    /// Create a new service over the given repository.
    pub fn new(profiles: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { profiles, clock }
    }
}

fn profile_not_found(user_id: &UserId) -> Error {
    Error::not_found("Profile not found").with_details(json!({ "userId": user_id.to_string() }))
}

#[async_trait]
impl<P> ProfileQuery for ProfileService<P>
where
    P: ProfileRepository,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        self.profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| profile_not_found(user_id))
    }
}

#[async_trait]
impl<P> ProfileCommand for ProfileService<P>
where
    P: ProfileRepository,
{
    async fn ensure_profile(&self, user_id: &UserId) -> Result<bool, Error> {
        if self.profiles.find_by_id(user_id).await?.is_some() {
            return Ok(false);
        }
        let display_name = generate_display_name(&mut rand::thread_rng());
        let profile = UserProfile::new_questioner(user_id.clone(), display_name, self.clock.utc());
        let created = self.profiles.insert_if_absent(&profile).await?;
        if created {
            info!(user_id = %user_id, display_name = %profile.display_name, "created profile");
        }
        Ok(created)
    }

    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<(), Error> {
        let found = self
            .profiles
            .update(user_id, &update, self.clock.utc())
            .await?;
        if found {
            Ok(())
        } else {
            Err(profile_not_found(user_id))
        }
    }
}
