//! Question feed, detail, submission, and view endpoints.
//!
//! ```text
//! GET  /api/questions?offset=0
//! GET  /api/questions/{id}
//! POST /api/questions/{id}/view
//! POST /api/questions {"title":"...","body":"...","topicIds":[1,2]}
//! ```

use actix_web::{HttpResponse, get, post, web};
use pagination::Cursor;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::CreateQuestionRequest;
use crate::domain::{CreatedQuestion, Error, QuestionDetail, QuestionId, QuestionSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, decode_json_body, lenient, parse_page, parse_positive_id,
};

/// Response header carrying the cursor of the following feed page.
pub const NEXT_CURSOR_HEADER: &str = "next-cursor";

const INVALID_ID_MESSAGE: &str = "Invalid id";

/// Feed window selection.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedParams {
    /// Zero-based row offset; negative values read as zero.
    #[param(value_type = Option<i64>, example = 0)]
    pub offset: Option<String>,
    /// Opaque cursor from a previous `next-cursor` header; wins over `offset`.
    #[param(example = "k")]
    pub cursor: Option<String>,
}

/// Request body for `POST /api/questions`.
///
/// Wrongly typed fields read as absent so validation reports them in order.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionBody {
    /// Question headline.
    #[serde(default, deserialize_with = "lenient::string")]
    #[schema(example = "Where can I get good tteokbokki near Hongdae?")]
    pub title: Option<String>,
    /// Question text; `content` and `description` are accepted aliases.
    #[serde(default, alias = "content", alias = "description", deserialize_with = "lenient::string")]
    pub body: Option<String>,
    /// Topic ids to attach. Entries that are not positive integers or
    /// numeric strings are dropped, as are duplicates.
    #[serde(default, deserialize_with = "lenient::id_list")]
    pub topic_ids: Vec<i64>,
}

/// Acknowledgement for fire-and-forget mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    /// Always `true`.
    pub ok: bool,
}

fn question_id(raw: &str) -> Result<QuestionId, Error> {
    let id = parse_positive_id(Some(raw), FieldName::new("id"), INVALID_ID_MESSAGE)?;
    QuestionId::new(id).map_err(|_| Error::invalid_request(INVALID_ID_MESSAGE))
}

/// List questions, newest first.
#[utoipa::path(
    get,
    path = "/api/questions",
    params(FeedParams),
    responses(
        (status = 200, description = "One feed page", body = [QuestionSummary],
            headers(("next-cursor" = String, description = "Cursor for the next page when this one is full"))),
        (status = 400, description = "Malformed offset or cursor", body = Error),
        (status = 500, description = "Storage failure", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["questions"],
    operation_id = "listQuestions",
    security([])
)]
#[get("/questions")]
pub async fn list_questions(
    state: web::Data<HttpState>,
    params: web::Query<FeedParams>,
) -> ApiResult<HttpResponse> {
    let page = parse_page(
        params.offset.as_deref(),
        params.cursor.as_deref(),
        state.page_size,
    )?;
    let questions = state.questions.list_questions(page).await?;

    let mut response = HttpResponse::Ok();
    if let Some(next) = page.next_after(questions.len()) {
        response.insert_header((NEXT_CURSOR_HEADER, Cursor::from(next).to_string()));
    }
    Ok(response.json(questions))
}

/// Fetch one question with its full body.
#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(("id" = i64, Path, description = "Question id")),
    responses(
        (status = 200, description = "Question detail", body = QuestionDetail),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Question not found", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["questions"],
    operation_id = "getQuestion",
    security([])
)]
#[get("/questions/{id}")]
pub async fn get_question(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<QuestionDetail>> {
    let id = question_id(&path)?;
    let detail = state.questions.question_detail(id).await?;
    Ok(web::Json(detail))
}

/// Count one view of a question.
#[utoipa::path(
    post,
    path = "/api/questions/{id}/view",
    params(("id" = i64, Path, description = "Question id")),
    responses(
        (status = 200, description = "View counted", body = OkResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["questions"],
    operation_id = "recordQuestionView",
    security([])
)]
#[post("/questions/{id}/view")]
pub async fn record_view(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OkResponse>> {
    let id = question_id(&path)?;
    state.questions_command.record_view(id).await?;
    Ok(web::Json(OkResponse { ok: true }))
}

/// Submit a question as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = CreateQuestionBody,
    responses(
        (status = 201, description = "Question created", body = CreatedQuestion),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["questions"],
    operation_id = "createQuestion"
)]
#[post("/questions")]
pub async fn create_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let CreateQuestionBody {
        title,
        body,
        topic_ids,
    } = decode_json_body(&payload)?;
    let created = state
        .questions_command
        .create_question(CreateQuestionRequest {
            author_id,
            title,
            body,
            topic_ids,
        })
        .await?;
    Ok(HttpResponse::Created().json(created))
}

#[cfg(test)]
#[path = "questions_tests.rs"]
mod tests;
