//! Diesel row structs. Internal to the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{answer, question, question_topic_mapping, topic, user_profile};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = question)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: i64,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = question)]
pub(crate) struct NewQuestionRow<'a> {
    pub author_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = question_topic_mapping)]
pub(crate) struct NewQuestionTopicRow {
    pub question_id: i64,
    pub topic_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = answer)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnswerRow {
    pub id: i64,
    pub question_id: i64,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub upvote_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = answer)]
pub(crate) struct NewAnswerRow<'a> {
    pub question_id: i64,
    pub author_id: Uuid,
    pub title: &'a str,
    pub content: &'a str,
    pub upvote_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = topic)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TopicRow {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Topic columns selected through the mapping join.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = topic)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TopicSummaryRow {
    pub id: i64,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_profile)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserProfileRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_profile)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AuthorRow {
    pub id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_profile)]
pub(crate) struct NewUserProfileRow<'a> {
    pub id: Uuid,
    pub name: Option<&'a str>,
    pub display_name: &'a str,
    pub avatar_url: Option<&'a str>,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `name` is always written so clearing it stores `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = user_profile)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserProfileUpdate<'a> {
    pub display_name: &'a str,
    pub name: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
