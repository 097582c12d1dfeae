//! DTO for the auth service's `GET /auth/v1/user` response.

use serde::Deserialize;

use crate::domain::{Identity, UserId};

#[derive(Debug, Deserialize)]
pub(super) struct AuthUserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) email: Option<String>,
}

impl AuthUserDto {
    pub(super) fn into_identity(self) -> Result<Identity, String> {
        let id = UserId::new(&self.id).map_err(|err| format!("user id {:?}: {err}", self.id))?;
        let email = self.email.filter(|email| !email.trim().is_empty());
        Ok(Identity { id, email })
    }
}
