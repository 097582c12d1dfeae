//! Driving port for establishing a session.
//!
//! Credentials never reach this backend. The client signs in with the
//! managed auth service and hands over the resulting access token.

use async_trait::async_trait;

use crate::domain::{Error, Identity};

/// Domain use-case port for sign-in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Resolve the token to an identity and make sure it has a profile.
    async fn sign_in(&self, access_token: &str) -> Result<Identity, Error>;
}
