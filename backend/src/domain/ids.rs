//! Storage-assigned integer identifiers.
//!
//! Questions, answers, and topics are keyed by positive `BIGINT` ids handed
//! out by the database. Each gets its own newtype so a topic id cannot be
//! passed where a question id is expected.

use std::fmt;

/// Raised when an identifier is zero, negative, or not an integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The value was an integer but not strictly positive.
    #[error("id must be a positive integer, got {value}")]
    NotPositive {
        /// Rejected value.
        value: i64,
    },
    /// The text did not parse as an integer.
    #[error("id must be an integer")]
    NotAnInteger,
}

macro_rules! define_positive_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize, utoipa::ToSchema,
        )]
        #[serde(try_from = "i64", into = "i64")]
        #[schema(value_type = i64, example = 42)]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub const fn new(value: i64) -> Result<Self, IdValidationError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(IdValidationError::NotPositive { value })
                }
            }

            /// The raw database value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| IdValidationError::NotAnInteger)?;
                Self::new(value)
            }
        }
    };
}

define_positive_id! {
    /// Identifier of a question.
    QuestionId
}

define_positive_id! {
    /// Identifier of an answer.
    AnswerId
}

define_positive_id! {
    /// Identifier of a topic.
    TopicId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Ok(1))]
    #[case(" 17 ", Ok(17))]
    #[case("0", Err(IdValidationError::NotPositive { value: 0 }))]
    #[case("-4", Err(IdValidationError::NotPositive { value: -4 }))]
    #[case("abc", Err(IdValidationError::NotAnInteger))]
    #[case("1.5", Err(IdValidationError::NotAnInteger))]
    #[case("", Err(IdValidationError::NotAnInteger))]
    fn parses_question_ids(#[case] input: &str, #[case] expected: Result<i64, IdValidationError>) {
        let parsed = input.parse::<QuestionId>().map(QuestionId::get);
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn deserialisation_rejects_non_positive_values() {
        assert!(serde_json::from_str::<TopicId>("0").is_err());
        let id: TopicId = serde_json::from_str("7").expect("positive id");
        assert_eq!(id.get(), 7);
    }
}
