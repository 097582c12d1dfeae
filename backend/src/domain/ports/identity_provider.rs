//! Driven port for the managed authentication service.
//!
//! Sign-in happens against the external service; this backend only trades
//! the resulting access token for the identity it belongs to.

use async_trait::async_trait;

use crate::domain::{Error, Identity};

use super::define_port_error;

define_port_error! {
    /// Errors raised while resolving an access token.
    pub enum IdentityProviderError {
        /// The token was rejected or has expired.
        InvalidToken { message: String } => "{message}",
        /// The service could not be reached or returned garbage.
        Unavailable { message: String } => "identity service unavailable: {message}",
        /// Token exchange is not configured for this deployment.
        Disabled => "identity exchange is not configured",
    }
}

impl From<IdentityProviderError> for Error {
    fn from(error: IdentityProviderError) -> Self {
        match error {
            IdentityProviderError::InvalidToken { message } => Self::unauthorized(message),
            other @ (IdentityProviderError::Unavailable { .. } | IdentityProviderError::Disabled) => {
                Self::service_unavailable(other.to_string())
            }
        }
    }
}

/// Port resolving access tokens to identities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the identity that owns `access_token`.
    async fn resolve(&self, access_token: &str) -> Result<Identity, IdentityProviderError>;
}

/// Provider used when no identity service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledIdentityProvider;

#[async_trait]
impl IdentityProvider for DisabledIdentityProvider {
    async fn resolve(&self, _access_token: &str) -> Result<Identity, IdentityProviderError> {
        Err(IdentityProviderError::disabled())
    }
}
