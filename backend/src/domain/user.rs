//! User identity and profile model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum length, in characters, of a display name or real name.
pub const PROFILE_NAME_MAX: usize = 20;

/// Validation errors for user identity and profile fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The display name was missing or blank.
    #[error("displayName is required")]
    EmptyDisplayName,
    /// A name exceeded [`PROFILE_NAME_MAX`].
    #[error("name or displayName too long")]
    NameTooLong,
    /// The role string was not recognised.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Stable user identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authenticated identity as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    /// Identity provider user id.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    /// Primary email, when the provider exposes one.
    #[schema(example = "traveler@example.com")]
    pub email: Option<String>,
}

/// Capability a profile holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// May ask questions.
    Questioner,
    /// May ask and answer questions.
    Answerer,
}

impl Role {
    /// Stored representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Questioner => "QUESTIONER",
            Self::Answerer => "ANSWERER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUESTIONER" => Ok(Self::Questioner),
            "ANSWERER" => Ok(Self::Answerer),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

/// Public name shown next to questions and answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a display name.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::DisplayName;
    ///
    /// assert!(DisplayName::new("KindPanda123").is_ok());
    /// assert!(DisplayName::new("").is_err());
    /// assert!(DisplayName::new("x".repeat(21)).is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if value.chars().count() > PROFILE_NAME_MAX {
            return Err(UserValidationError::NameTooLong);
        }
        Ok(Self(value))
    }

    /// Wrap a name produced by the random generator, which stays in bounds.
    pub(crate) const fn from_generated(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Owner of the profile.
    pub id: UserId,
    /// Optional real name.
    pub name: Option<String>,
    /// Public display name.
    pub display_name: String,
    /// Public avatar location.
    pub avatar_url: Option<String>,
    /// Capability held by the user.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh profile for a first-time user.
    #[must_use]
    pub fn new_questioner(id: UserId, display_name: DisplayName, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            display_name: display_name.into(),
            avatar_url: None,
            role: Role::Questioner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Author fields needed to decorate questions and answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorProfile {
    /// Author id.
    pub id: UserId,
    /// Public display name.
    pub display_name: String,
    /// Public avatar location.
    pub avatar_url: Option<String>,
}

impl From<&UserProfile> for AuthorProfile {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.clone(),
            display_name: profile.display_name.clone(),
            avatar_url: profile.avatar_url.clone(),
        }
    }
}

/// Validated profile edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    display_name: DisplayName,
    name: Option<String>,
}

impl ProfileUpdate {
    /// Validate an edit request.
    ///
    /// A missing display name is reported before any length violation.
    pub fn try_new(
        display_name: Option<String>,
        name: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let display_name = display_name
            .filter(|value| !value.is_empty())
            .ok_or(UserValidationError::EmptyDisplayName)?;
        let name = name.filter(|value| !value.is_empty());
        if name
            .as_deref()
            .is_some_and(|value| value.chars().count() > PROFILE_NAME_MAX)
        {
            return Err(UserValidationError::NameTooLong);
        }
        Ok(Self {
            display_name: DisplayName::new(display_name)?,
            name,
        })
    }

    /// New display name.
    #[must_use]
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// New real name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("not-a-uuid", UserValidationError::InvalidId)]
    fn rejects_bad_user_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    fn user_id_displays_hyphenated() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id = UserId::new(raw).expect("valid id");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    #[case(Role::Questioner, "\"QUESTIONER\"")]
    #[case(Role::Answerer, "\"ANSWERER\"")]
    fn roles_serialise_upper_case(#[case] role: Role, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&role).expect("serialise"), expected);
        assert_eq!(role.as_str().parse::<Role>(), Ok(role));
    }

    #[rstest]
    #[case(None, None, Err(UserValidationError::EmptyDisplayName))]
    #[case(Some(""), Some("x"), Err(UserValidationError::EmptyDisplayName))]
    #[case(Some("   "), None, Err(UserValidationError::EmptyDisplayName))]
    #[case(Some("abcdefghijklmnopqrstu"), None, Err(UserValidationError::NameTooLong))]
    #[case(Some("Kim"), Some("abcdefghijklmnopqrstu"), Err(UserValidationError::NameTooLong))]
    #[case(Some("Kim"), None, Ok(()))]
    #[case(Some("abcdefghijklmnopqrst"), Some(""), Ok(()))]
    fn validates_profile_updates(
        #[case] display_name: Option<&str>,
        #[case] name: Option<&str>,
        #[case] expected: Result<(), UserValidationError>,
    ) {
        let result = ProfileUpdate::try_new(
            display_name.map(str::to_owned),
            name.map(str::to_owned),
        )
        .map(|_| ());
        assert_eq!(result, expected);
    }

    #[rstest]
    fn blank_real_name_is_cleared() {
        let update = ProfileUpdate::try_new(Some("Kim".to_owned()), Some(String::new()))
            .expect("valid update");
        assert_eq!(update.name(), None);
    }
}
