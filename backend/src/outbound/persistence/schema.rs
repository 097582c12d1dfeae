//! Diesel table definitions mirroring `backend/migrations`.
//!
//! Keep in step with the migrations; `diesel print-schema` regenerates the
//! column lists from a live database.

diesel::table! {
    /// Public profile of an authenticated user.
    user_profile (id) {
        /// Identity id issued by the auth service.
        id -> Uuid,
        /// Optional private name (max 20 characters).
        name -> Nullable<Varchar>,
        /// Name shown next to posts (max 20 characters).
        display_name -> Varchar,
        avatar_url -> Nullable<Text>,
        /// `QUESTIONER` or `ANSWERER`.
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Topic reference data.
    topic (id) {
        id -> Int8,
        slug -> Varchar,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Questions posted by users.
    question (id) {
        id -> Int8,
        author_id -> Uuid,
        title -> Varchar,
        /// Question body; `NULL` when the author left it blank.
        description -> Nullable<Text>,
        /// `OPEN`, `ANSWERED` or `CLOSED`.
        status -> Varchar,
        view_count -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Question to topic links; `id` records insertion order.
    question_topic_mapping (id) {
        id -> Int8,
        question_id -> Int8,
        topic_id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Answers to questions.
    answer (id) {
        id -> Int8,
        question_id -> Int8,
        author_id -> Uuid,
        title -> Varchar,
        content -> Text,
        upvote_count -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(question_topic_mapping -> question (question_id));
diesel::joinable!(question_topic_mapping -> topic (topic_id));
diesel::joinable!(answer -> question (question_id));

diesel::allow_tables_to_appear_in_same_query!(
    answer,
    question,
    question_topic_mapping,
    topic,
    user_profile,
);
