//! Topic reference data.

use actix_web::{get, web};

use crate::domain::{Error, Topic};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// List every topic, ordered by name.
#[utoipa::path(
    get,
    path = "/api/topics",
    responses(
        (status = 200, description = "Topics", body = [Topic]),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["topics"],
    operation_id = "listTopics",
    security([])
)]
#[get("/topics")]
pub async fn list_topics(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Topic>>> {
    Ok(web::Json(state.topics.list_topics().await?))
}
