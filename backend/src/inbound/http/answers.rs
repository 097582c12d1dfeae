//! Answer listing and submission endpoints.
//!
//! ```text
//! GET  /api/answers?questionId=7
//! POST /api/answers {"questionId":7,"title":"...","content":"..."}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::CreateAnswerRequest;
use crate::domain::{AnswerSummary, CreatedAnswer, Error, ErrorCode, QuestionId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, decode_json_body, lenient, parse_positive_id};

const INVALID_QUESTION_ID_MESSAGE: &str = "Invalid or missing questionId.";

/// Query for `GET /api/answers`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct AnswersParams {
    /// Question whose answers to list.
    #[param(value_type = i64, example = 7)]
    pub question_id: Option<String>,
}

/// Request body for `POST /api/answers`.
///
/// Wrongly typed fields read as absent so the role check and validation
/// order decide the response.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerBody {
    /// Question being answered, as a number or numeric string.
    #[serde(default, deserialize_with = "lenient::id")]
    #[schema(example = 7)]
    pub question_id: Option<i64>,
    /// Answer headline.
    #[serde(default, deserialize_with = "lenient::string")]
    #[schema(example = "Try the market stalls")]
    pub title: Option<String>,
    /// Answer text; `body` is an accepted alias.
    #[serde(default, alias = "body", deserialize_with = "lenient::string")]
    pub content: Option<String>,
}

/// List answers to a question, newest first.
#[utoipa::path(
    get,
    path = "/api/answers",
    params(AnswersParams),
    responses(
        (status = 200, description = "Answers", body = [AnswerSummary]),
        (status = 400, description = "Invalid or missing questionId", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["answers"],
    operation_id = "listAnswers",
    security([])
)]
#[get("/answers")]
pub async fn list_answers(
    state: web::Data<HttpState>,
    params: web::Query<AnswersParams>,
) -> ApiResult<web::Json<Vec<AnswerSummary>>> {
    let raw = parse_positive_id(
        params.question_id.as_deref(),
        FieldName::new("questionId"),
        INVALID_QUESTION_ID_MESSAGE,
    )?;
    let question_id =
        QuestionId::new(raw).map_err(|_| Error::invalid_request(INVALID_QUESTION_ID_MESSAGE))?;
    let answers = state.answers.list_answers(question_id).await?;
    Ok(web::Json(answers))
}

/// Answer a question as a signed-in answerer.
#[utoipa::path(
    post,
    path = "/api/answers",
    request_body = CreateAnswerBody,
    responses(
        (status = 201, description = "Answer created", body = CreatedAnswer),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Caller is not an answerer", body = Error),
        (status = 404, description = "Question not found", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["answers"],
    operation_id = "createAnswer"
)]
#[post("/answers")]
pub async fn create_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    // An unparsable body still goes through the role check; only a
    // validation failure is replaced by the decode error.
    let (body, decode_error) = match decode_json_body::<CreateAnswerBody>(&payload) {
        Ok(body) => (body, None),
        Err(err) => (CreateAnswerBody::default(), Some(err)),
    };
    let CreateAnswerBody {
        question_id,
        title,
        content,
    } = body;
    let result = state
        .answers_command
        .create_answer(CreateAnswerRequest {
            author_id,
            question_id,
            title,
            content,
        })
        .await;
    match (result, decode_error) {
        (Err(err), Some(decode_error)) if err.code() == ErrorCode::InvalidRequest => {
            Err(decode_error)
        }
        (result, _) => Ok(HttpResponse::Created().json(result?)),
    }
}
