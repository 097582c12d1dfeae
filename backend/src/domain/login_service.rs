//! Session sign-in backed by the managed identity service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{IdentityProvider, LoginService, ProfileCommand};
use crate::domain::{Error, Identity};

/// [`LoginService`] that resolves access tokens and bootstraps profiles.
#[derive(Clone)]
pub struct SessionLoginService {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileCommand>,
}

impl SessionLoginService {
    /// Create a new service.
    pub fn new(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileCommand>) -> Self {
        Self { identity, profiles }
    }
}

#[async_trait]
impl LoginService for SessionLoginService {
    async fn sign_in(&self, access_token: &str) -> Result<Identity, Error> {
        if access_token.trim().is_empty() {
            return Err(Error::invalid_request("accessToken is required")
                .with_details(serde_json::json!({ "field": "accessToken" })));
        }
        let identity = self.identity.resolve(access_token).await?;
        self.profiles.ensure_profile(&identity.id).await?;
        Ok(identity)
    }
}
