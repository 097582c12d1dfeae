//! Domain primitives, rules, and services.
//!
//! Purpose: hold the question and answer model, the pure helpers that shape
//! feed payloads (excerpts, topic grouping, author joins), and the services
//! implementing the driving ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - QuestionService, AnswerService, TopicService, ProfileService,
//!   SessionLoginService: driving port implementations.
//! - ports: traits separating the domain from its adapters.

pub mod answer;
pub mod answer_service;
pub mod author;
pub mod display_name;
pub mod error;
pub mod excerpt;
pub mod ids;
pub mod login_service;
pub mod ports;
pub mod profile_service;
pub mod question;
pub mod question_service;
pub mod topic;
pub mod topic_service;
pub mod trace_id;
pub mod user;

pub use self::answer::{
    AnswerDraft, AnswerRecord, AnswerSummary, AnswerValidationError, CONTENT_MAX_CHARS,
    CreatedAnswer, NewAnswer,
};
pub use self::answer_service::AnswerService;
pub use self::author::{AuthorInfo, AuthorLookup};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{AnswerId, IdValidationError, QuestionId, TopicId};
pub use self::login_service::SessionLoginService;
pub use self::profile_service::ProfileService;
pub use self::question::{
    BODY_MAX_CHARS, CreatedQuestion, NewQuestion, QuestionDetail, QuestionDraft, QuestionRecord,
    QuestionStatus, QuestionSummary, QuestionValidationError, TITLE_MAX_CHARS,
};
pub use self::question_service::QuestionService;
pub use self::topic::{Topic, TopicMappingRow, TopicSummary};
pub use self::topic_service::TopicService;
pub use self::trace_id::TraceId;
pub use self::user::{
    AuthorProfile, DisplayName, Identity, PROFILE_NAME_MAX, ProfileUpdate, Role, UserId,
    UserProfile, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Only Answerer can create answers"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
