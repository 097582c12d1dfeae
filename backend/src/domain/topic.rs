//! Topics and the question-to-topic aggregation used by the feeds.
//!
//! A join between mappings and topics may yield no topic (dangling mapping),
//! one topic, or, from some sources, a list. [`TopicMappingRow`] always
//! carries zero or more topics; adapters normalise at the boundary so nothing
//! downstream has to care.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{QuestionId, TopicId};

/// Reference data describing a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Topic identifier.
    pub id: TopicId,
    /// URL-safe unique key.
    #[schema(example = "food")]
    pub slug: String,
    /// Human readable label.
    #[schema(example = "Food")]
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Topic {
    /// Project onto the compact form embedded in question payloads.
    #[must_use]
    pub fn summary(&self) -> TopicSummary {
        TopicSummary {
            id: self.id,
            slug: self.slug.clone(),
            name: self.name.clone(),
        }
    }
}

/// Compact topic representation embedded in question payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopicSummary {
    /// Topic identifier.
    pub id: TopicId,
    /// URL-safe unique key.
    #[schema(example = "transport")]
    pub slug: String,
    /// Human readable label.
    #[schema(example = "Transport")]
    pub name: String,
}

/// One question/topic join row with its topics normalised to a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicMappingRow {
    /// Question the mapping belongs to.
    pub question_id: QuestionId,
    /// Topics resolved through the mapping, possibly none.
    #[serde(rename = "topic", default, deserialize_with = "deserialize_topic_ref")]
    pub topics: Vec<TopicSummary>,
}

impl TopicMappingRow {
    /// Build a row from a left join that may not have matched a topic.
    #[must_use]
    pub fn from_join(question_id: QuestionId, topic: Option<TopicSummary>) -> Self {
        Self {
            question_id,
            topics: topic.into_iter().collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TopicRef {
    Many(Vec<TopicSummary>),
    One(TopicSummary),
}

fn deserialize_topic_ref<'de, D>(deserializer: D) -> Result<Vec<TopicSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    let reference = Option::<TopicRef>::deserialize(deserializer)?;
    Ok(match reference {
        None => Vec::new(),
        Some(TopicRef::One(topic)) => vec![topic],
        Some(TopicRef::Many(topics)) => topics,
    })
}

/// Group mapping rows by question, keeping first-seen order.
///
/// Questions whose rows carry no topics are absent from the result; callers
/// default to an empty list when rendering.
///
/// # Examples
/// ```
/// use backend::domain::{QuestionId, TopicId, TopicMappingRow, TopicSummary};
/// use backend::domain::topic::group_topics_by_question;
///
/// let topic = |id: i64, slug: &str| TopicSummary {
///     id: TopicId::new(id).unwrap(),
///     slug: slug.to_owned(),
///     name: slug.to_uppercase(),
/// };
/// let q1 = QuestionId::new(1).unwrap();
/// let rows = vec![
///     TopicMappingRow::from_join(q1, Some(topic(1, "a"))),
///     TopicMappingRow::from_join(q1, Some(topic(2, "b"))),
/// ];
/// let grouped = group_topics_by_question(rows);
/// assert_eq!(grouped[&q1].len(), 2);
/// ```
#[must_use]
pub fn group_topics_by_question<I>(rows: I) -> HashMap<QuestionId, Vec<TopicSummary>>
where
    I: IntoIterator<Item = TopicMappingRow>,
{
    let mut grouped: HashMap<QuestionId, Vec<TopicSummary>> = HashMap::new();
    for row in rows {
        if row.topics.is_empty() {
            continue;
        }
        grouped.entry(row.question_id).or_default().extend(row.topics);
    }
    grouped
}

/// Deduplicate requested topic ids, dropping non-positive values.
///
/// First-seen order is kept.
#[must_use]
pub fn normalize_topic_ids(raw: &[i64]) -> Vec<TopicId> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter_map(|value| TopicId::new(*value).ok())
        .filter(|id| seen.insert(*id))
        .collect()
}
