//! Builders for domain records used across service and adapter tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{
    AnswerId, AnswerRecord, AuthorProfile, QuestionId, QuestionRecord, QuestionStatus, Role,
    Topic, TopicId, UserId, UserProfile,
};

/// Fixed instant used as "now" in tests.
pub fn fixed_now() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0) {
        chrono::LocalResult::Single(now) => now,
        _ => panic!("valid fixture timestamp"),
    }
}

pub fn question_record(id: i64, author_id: &UserId, body: &str) -> QuestionRecord {
    let created_at = fixed_now() + chrono::TimeDelta::minutes(id);
    QuestionRecord {
        id: QuestionId::new(id).expect("positive question id"),
        author_id: author_id.clone(),
        title: format!("Question {id}"),
        body: Some(body.to_owned()),
        status: QuestionStatus::Open,
        view_count: id * 10,
        created_at,
        updated_at: created_at,
    }
}

pub fn answer_record(id: i64, question_id: i64, author_id: &UserId) -> AnswerRecord {
    let created_at = fixed_now() + chrono::TimeDelta::minutes(id);
    AnswerRecord {
        id: AnswerId::new(id).expect("positive answer id"),
        question_id: QuestionId::new(question_id).expect("positive question id"),
        author_id: author_id.clone(),
        title: format!("Answer {id}"),
        content: format!("Content of answer {id}"),
        upvote_count: 0,
        created_at,
        updated_at: created_at,
    }
}

pub fn topic(id: i64, slug: &str, name: &str) -> Topic {
    Topic {
        id: TopicId::new(id).expect("positive topic id"),
        slug: slug.to_owned(),
        name: name.to_owned(),
        description: None,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

pub fn user_profile(id: &UserId, display_name: &str, role: Role) -> UserProfile {
    UserProfile {
        id: id.clone(),
        name: None,
        display_name: display_name.to_owned(),
        avatar_url: None,
        role,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

pub fn author_profile(id: &UserId, display_name: &str, avatar_url: Option<&str>) -> AuthorProfile {
    AuthorProfile {
        id: id.clone(),
        display_name: display_name.to_owned(),
        avatar_url: avatar_url.map(str::to_owned),
    }
}
