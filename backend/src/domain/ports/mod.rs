//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`IdentityProvider`]) are implemented by the
//! outbound adapters. Driving ports (`*Query`, `*Command`, [`LoginService`])
//! are implemented by the domain services and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod answer_repository;
mod answers_command;
mod answers_query;
mod identity_provider;
mod login_service;
mod profile_command;
mod profile_query;
mod profile_repository;
mod question_repository;
mod questions_command;
mod questions_query;
mod topic_repository;
mod topics_query;

#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
pub use answer_repository::{AnswerRepository, AnswerRepositoryError};
#[cfg(test)]
pub use answers_command::MockAnswersCommand;
pub use answers_command::{AnswersCommand, CreateAnswerRequest};
#[cfg(test)]
pub use answers_query::MockAnswersQuery;
pub use answers_query::AnswersQuery;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{DisabledIdentityProvider, IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::ProfileCommand;
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::{QuestionRepository, QuestionRepositoryError};
#[cfg(test)]
pub use questions_command::MockQuestionsCommand;
pub use questions_command::{CreateQuestionRequest, QuestionsCommand};
#[cfg(test)]
pub use questions_query::MockQuestionsQuery;
pub use questions_query::QuestionsQuery;
#[cfg(test)]
pub use topic_repository::MockTopicRepository;
pub use topic_repository::{TopicRepository, TopicRepositoryError};
#[cfg(test)]
pub use topics_query::MockTopicsQuery;
pub use topics_query::TopicsQuery;
