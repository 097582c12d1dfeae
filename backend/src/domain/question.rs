//! Question model, creation rules, and feed projections.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{QuestionId, TopicId, TopicSummary, UserId};

/// Maximum title length in characters, shared by questions and answers.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum question body length in characters.
pub const BODY_MAX_CHARS: usize = 30_000;

/// Lifecycle state of a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionStatus {
    /// Accepting answers.
    #[default]
    Open,
    /// Marked as answered.
    Answered,
    /// No longer accepting answers.
    Closed,
}

impl QuestionStatus {
    /// Stored representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Answered => "ANSWERED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised status string read from storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown question status: {0}")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for QuestionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "ANSWERED" => Ok(Self::Answered),
            "CLOSED" => Ok(Self::Closed),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Stored question row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// Question id.
    pub id: QuestionId,
    /// Asking user.
    pub author_id: UserId,
    /// Title, at most [`TITLE_MAX_CHARS`].
    pub title: String,
    /// Body text, at most [`BODY_MAX_CHARS`].
    pub body: Option<String>,
    /// Lifecycle state.
    pub status: QuestionStatus,
    /// Number of recorded views.
    pub view_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Field errors raised when creating a question.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionValidationError {
    /// Title missing or blank.
    #[error("title is required")]
    TitleRequired,
    /// Title longer than [`TITLE_MAX_CHARS`].
    #[error("title must be <= {TITLE_MAX_CHARS} chars")]
    TitleTooLong,
    /// Body longer than [`BODY_MAX_CHARS`].
    #[error("description must be <= {BODY_MAX_CHARS} chars")]
    BodyTooLong,
}

impl QuestionValidationError {
    /// Request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::TitleRequired | Self::TitleTooLong => "title",
            Self::BodyTooLong => "body",
        }
    }
}

/// Validated title and body for a new question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    title: String,
    body: Option<String>,
}

impl QuestionDraft {
    /// Trim and validate the submitted fields.
    ///
    /// Title presence is checked first, then title length, then body length,
    /// so an empty title is reported even when the body is also too long.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{QuestionDraft, QuestionValidationError};
    ///
    /// let huge = "x".repeat(40_000);
    /// assert_eq!(
    ///     QuestionDraft::try_new(Some(""), Some(&huge)),
    ///     Err(QuestionValidationError::TitleRequired),
    /// );
    /// ```
    pub fn try_new(
        title: Option<&str>,
        body: Option<&str>,
    ) -> Result<Self, QuestionValidationError> {
        let title = title.unwrap_or_default().trim();
        if title.is_empty() {
            return Err(QuestionValidationError::TitleRequired);
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(QuestionValidationError::TitleTooLong);
        }
        let body = body.unwrap_or_default().trim();
        if body.chars().count() > BODY_MAX_CHARS {
            return Err(QuestionValidationError::BodyTooLong);
        }
        Ok(Self {
            title: title.to_owned(),
            body: (!body.is_empty()).then(|| body.to_owned()),
        })
    }

    /// Trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Trimmed body, `None` when blank.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Question ready to persist together with its topic mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    /// Asking user.
    pub author_id: UserId,
    /// Validated content.
    pub draft: QuestionDraft,
    /// Existing, deduplicated topic ids.
    pub topic_ids: Vec<TopicId>,
    /// Timestamp used for creation and update fields.
    pub created_at: DateTime<Utc>,
}

/// Feed entry for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    /// Question id.
    pub id: QuestionId,
    /// Author display name, empty when unknown.
    #[schema(example = "CuriousPanda204")]
    pub author_display_name: String,
    /// Author avatar location.
    pub author_avatar_url: Option<String>,
    /// Question title.
    pub title: String,
    /// Whitespace-normalised preview of the body.
    pub excerpt: String,
    /// Recorded views.
    pub view_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Attached topics in mapping order.
    pub topics: Vec<TopicSummary>,
}

/// Full question view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    /// Question id.
    pub id: QuestionId,
    /// Author display name, empty when unknown.
    pub author_display_name: String,
    /// Author avatar location.
    pub author_avatar_url: Option<String>,
    /// Question title.
    pub title: String,
    /// Full body, empty when none was given.
    pub body: String,
    /// Recorded views.
    pub view_count: i64,
    /// Lifecycle state.
    pub status: QuestionStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Attached topics in mapping order.
    pub topics: Vec<TopicSummary>,
}

/// Result of a successful question submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedQuestion {
    /// Id of the new question.
    pub question_id: QuestionId,
    /// Topic ids attached to it.
    pub topic_ids: Vec<TopicId>,
}
