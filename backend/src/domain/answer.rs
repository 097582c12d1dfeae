//! Answer model and creation rules.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{AnswerId, QuestionId, TITLE_MAX_CHARS, UserId};

/// Maximum answer content length in characters.
pub const CONTENT_MAX_CHARS: usize = 30_000;

/// Stored answer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    /// Answer id.
    pub id: AnswerId,
    /// Question being answered.
    pub question_id: QuestionId,
    /// Answering user.
    pub author_id: UserId,
    /// Answer title.
    pub title: String,
    /// Answer body.
    pub content: String,
    /// Number of upvotes.
    pub upvote_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Field errors raised when creating an answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerValidationError {
    /// Question id missing or not a positive integer.
    #[error("questionId is required")]
    QuestionIdRequired,
    /// Title missing or blank.
    #[error("title is required")]
    TitleRequired,
    /// Title longer than [`TITLE_MAX_CHARS`].
    #[error("title must be <= {TITLE_MAX_CHARS} chars")]
    TitleTooLong,
    /// Content missing or blank.
    #[error("content is required")]
    ContentRequired,
    /// Content longer than [`CONTENT_MAX_CHARS`].
    #[error("content must be <= {CONTENT_MAX_CHARS} chars")]
    ContentTooLong,
}

impl AnswerValidationError {
    /// Request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::QuestionIdRequired => "questionId",
            Self::TitleRequired | Self::TitleTooLong => "title",
            Self::ContentRequired | Self::ContentTooLong => "content",
        }
    }
}

/// Validated title and content for a new answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerDraft {
    title: String,
    content: String,
}

impl AnswerDraft {
    /// Trim and validate the submitted fields, title first.
    pub fn try_new(
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Self, AnswerValidationError> {
        let title = title.unwrap_or_default().trim();
        if title.is_empty() {
            return Err(AnswerValidationError::TitleRequired);
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(AnswerValidationError::TitleTooLong);
        }
        let content = content.unwrap_or_default().trim();
        if content.is_empty() {
            return Err(AnswerValidationError::ContentRequired);
        }
        if content.chars().count() > CONTENT_MAX_CHARS {
            return Err(AnswerValidationError::ContentTooLong);
        }
        Ok(Self {
            title: title.to_owned(),
            content: content.to_owned(),
        })
    }

    /// Trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Trimmed content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Answer ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    /// Question being answered; known to exist.
    pub question_id: QuestionId,
    /// Answering user.
    pub author_id: UserId,
    /// Validated content.
    pub draft: AnswerDraft,
    /// Timestamp used for creation and update fields.
    pub created_at: DateTime<Utc>,
}

/// Answer as shown under a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSummary {
    /// Answer id.
    pub id: AnswerId,
    /// Question the answer belongs to.
    pub question_id: QuestionId,
    /// Author display name, empty when unknown.
    pub author_display_name: String,
    /// Author avatar location.
    pub author_avatar_url: Option<String>,
    /// Answer title.
    pub title: String,
    /// Answer body.
    pub content: String,
    /// Number of upvotes.
    pub upvote_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Result of a successful answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAnswer {
    /// Id of the new answer.
    pub answer_id: AnswerId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("c".to_owned()), AnswerValidationError::TitleRequired)]
    #[case(Some("t".repeat(101)), Some("c".to_owned()), AnswerValidationError::TitleTooLong)]
    #[case(Some("t".to_owned()), None, AnswerValidationError::ContentRequired)]
    #[case(Some("t".to_owned()), Some(" \t ".to_owned()), AnswerValidationError::ContentRequired)]
    #[case(Some("t".to_owned()), Some("c".repeat(30_001)), AnswerValidationError::ContentTooLong)]
    #[case(Some(String::new()), Some("c".repeat(30_001)), AnswerValidationError::TitleRequired)]
    fn rejects_invalid_drafts(
        #[case] title: Option<String>,
        #[case] content: Option<String>,
        #[case] expected: AnswerValidationError,
    ) {
        let result = AnswerDraft::try_new(title.as_deref(), content.as_deref());
        assert_eq!(result, Err(expected));
    }

    #[rstest]
    fn trims_valid_drafts() {
        let draft = AnswerDraft::try_new(Some("  Take line 2  "), Some("\nExit 3\n"))
            .expect("valid draft");
        assert_eq!(draft.title(), "Take line 2");
        assert_eq!(draft.content(), "Exit 3");
    }

    #[rstest]
    fn messages_name_the_field_limits() {
        assert_eq!(
            AnswerValidationError::ContentTooLong.to_string(),
            "content must be <= 30000 chars"
        );
        assert_eq!(AnswerValidationError::QuestionIdRequired.field(), "questionId");
    }
}
