//! Tests for the answer service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    AnswerRepositoryError, MockAnswerRepository, MockProfileRepository, MockQuestionRepository,
};
use crate::domain::{AnswerId, ErrorCode, UserId};
use crate::test_support::{
    FixtureClock, answer_record, author_profile, fixed_now, user_profile,
};

struct Mocks {
    answers: MockAnswerRepository,
    questions: MockQuestionRepository,
    profiles: MockProfileRepository,
}

impl Mocks {
    fn into_service(
        self,
    ) -> AnswerService<MockAnswerRepository, MockQuestionRepository, MockProfileRepository> {
        AnswerService::new(
            Arc::new(self.answers),
            Arc::new(self.questions),
            Arc::new(self.profiles),
            Arc::new(FixtureClock::new(fixed_now())),
        )
    }

    fn with_role(mut self, role: Option<Role>) -> Self {
        self.profiles.expect_find_by_id().return_once(move |id| {
            Ok(role.map(|role| user_profile(id, "GentleTiger300", role)))
        });
        self
    }
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        answers: MockAnswerRepository::new(),
        questions: MockQuestionRepository::new(),
        profiles: MockProfileRepository::new(),
    }
}

fn request(question_id: Option<i64>, title: &str, content: &str) -> CreateAnswerRequest {
    CreateAnswerRequest {
        author_id: UserId::random(),
        question_id,
        title: Some(title.to_owned()),
        content: Some(content.to_owned()),
    }
}

fn qid(id: i64) -> QuestionId {
    QuestionId::new(id).expect("positive id")
}

#[rstest]
#[tokio::test]
async fn list_returns_empty_without_profile_lookup(mut mocks: Mocks) {
    mocks
        .answers
        .expect_list_for_question()
        .with(eq(qid(3)))
        .return_once(|_| Ok(Vec::new()));
    mocks.profiles.expect_find_authors().times(0);

    let answers = mocks
        .into_service()
        .list_answers(qid(3))
        .await
        .expect("answers");
    assert!(answers.is_empty());
}

#[rstest]
#[tokio::test]
async fn list_joins_authors_with_defaults(mut mocks: Mocks) {
    let known = UserId::random();
    let unknown = UserId::random();
    let rows = vec![answer_record(2, 3, &known), answer_record(1, 3, &unknown)];
    let profile = author_profile(&known, "SmartKoala777", None);
    mocks
        .answers
        .expect_list_for_question()
        .return_once(move |_| Ok(rows));
    mocks
        .profiles
        .expect_find_authors()
        .withf(|ids| ids.len() == 2)
        .times(1)
        .return_once(move |_| Ok(vec![profile]));

    let answers = mocks
        .into_service()
        .list_answers(qid(3))
        .await
        .expect("answers");
    let names: Vec<&str> = answers
        .iter()
        .map(|a| a.author_display_name.as_str())
        .collect();
    assert_eq!(names, vec!["SmartKoala777", ""]);
    assert!(answers.iter().all(|a| a.author_avatar_url.is_none()));
}

#[rstest]
#[case(Some(Role::Questioner))]
#[case(None)]
#[tokio::test]
async fn non_answerers_are_forbidden_regardless_of_payload(
    mocks: Mocks,
    #[case] role: Option<Role>,
) {
    let mut mocks = mocks.with_role(role);
    mocks.questions.expect_exists().times(0);
    mocks.answers.expect_insert().times(0);

    let error = mocks
        .into_service()
        .create_answer(request(None, "", ""))
        .await
        .expect_err("forbidden");
    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.message(), ANSWERER_ONLY_MESSAGE);
}

#[rstest]
#[case(None)]
#[case(Some(0))]
#[case(Some(-8))]
#[tokio::test]
async fn invalid_question_ids_are_rejected(mocks: Mocks, #[case] question_id: Option<i64>) {
    let mut mocks = mocks.with_role(Some(Role::Answerer));
    mocks.questions.expect_exists().times(0);

    let error = mocks
        .into_service()
        .create_answer(request(question_id, "t", "c"))
        .await
        .expect_err("bad id");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "questionId is required");
}

#[rstest]
#[tokio::test]
async fn missing_question_is_not_found_before_field_checks(mocks: Mocks) {
    let mut mocks = mocks.with_role(Some(Role::Answerer));
    mocks
        .questions
        .expect_exists()
        .with(eq(qid(77)))
        .return_once(|_| Ok(false));

    let error = mocks
        .into_service()
        .create_answer(request(Some(77), "", ""))
        .await
        .expect_err("not found");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Question not found");
}

#[rstest]
#[case("", "content", "title is required")]
#[case("title", "  ", "content is required")]
#[tokio::test]
async fn field_errors_follow_existence_check(
    mocks: Mocks,
    #[case] title: &str,
    #[case] content: &str,
    #[case] message: &str,
) {
    let mut mocks = mocks.with_role(Some(Role::Answerer));
    mocks.questions.expect_exists().return_once(|_| Ok(true));
    mocks.answers.expect_insert().times(0);

    let error = mocks
        .into_service()
        .create_answer(request(Some(1), title, content))
        .await
        .expect_err("field error");
    assert_eq!(error.message(), message);
}

#[rstest]
#[tokio::test]
async fn answerers_can_create_answers(mocks: Mocks) {
    let mut mocks = mocks.with_role(Some(Role::Answerer));
    mocks.questions.expect_exists().return_once(|_| Ok(true));
    mocks
        .answers
        .expect_insert()
        .withf(|answer: &NewAnswer| {
            answer.question_id.get() == 12
                && answer.draft.title() == "Take bus 7016"
                && answer.created_at == fixed_now()
        })
        .times(1)
        .return_once(|_| Ok(AnswerId::new(5).expect("positive id")));

    let created = mocks
        .into_service()
        .create_answer(request(Some(12), " Take bus 7016 ", "It stops right outside."))
        .await
        .expect("created");
    assert_eq!(created.answer_id.get(), 5);
}

#[rstest]
#[tokio::test]
async fn insert_failures_pass_through(mocks: Mocks) {
    let mut mocks = mocks.with_role(Some(Role::Answerer));
    mocks.questions.expect_exists().return_once(|_| Ok(true));
    mocks
        .answers
        .expect_insert()
        .return_once(|_| Err(AnswerRepositoryError::query("duplicate key value")));

    let error = mocks
        .into_service()
        .create_answer(request(Some(1), "t", "c"))
        .await
        .expect_err("insert failure");
    assert_eq!(error.code(), ErrorCode::UpstreamFailure);
    assert_eq!(error.message(), "duplicate key value");
}
