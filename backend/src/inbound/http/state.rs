//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AnswerRepository, AnswersCommand, AnswersQuery, IdentityProvider, LoginService,
    ProfileCommand, ProfileQuery, ProfileRepository, QuestionRepository, QuestionsCommand,
    QuestionsQuery, TopicRepository, TopicsQuery,
};
use crate::domain::{AnswerService, ProfileService, QuestionService, SessionLoginService, TopicService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub questions: Arc<dyn QuestionsQuery>,
    pub questions_command: Arc<dyn QuestionsCommand>,
    pub answers: Arc<dyn AnswersQuery>,
    pub answers_command: Arc<dyn AnswersCommand>,
    pub topics: Arc<dyn TopicsQuery>,
    pub profile: Arc<dyn ProfileQuery>,
    pub profile_command: Arc<dyn ProfileCommand>,
    pub login: Arc<dyn LoginService>,
    /// Rows per feed page.
    pub page_size: u64,
}

/// Driven adapters the domain services are built over.
pub struct Repositories<Q, A, T, P> {
    pub questions: Arc<Q>,
    pub answers: Arc<A>,
    pub topics: Arc<T>,
    pub profiles: Arc<P>,
}

impl<S> Repositories<S, S, S, S> {
    /// Use one store for every repository port.
    pub fn shared(store: Arc<S>) -> Self {
        Self {
            questions: Arc::clone(&store),
            answers: Arc::clone(&store),
            topics: Arc::clone(&store),
            profiles: store,
        }
    }
}

impl HttpState {
    /// Wire the domain services over `repositories`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::DisabledIdentityProvider;
    /// use backend::inbound::http::state::{HttpState, Repositories};
    /// use backend::outbound::memory::MemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::from_repositories(
    ///     Repositories::shared(Arc::new(MemoryStore::new())),
    ///     Arc::new(DisabledIdentityProvider),
    ///     Arc::new(DefaultClock),
    ///     20,
    /// );
    /// assert_eq!(state.page_size, 20);
    /// ```
    pub fn from_repositories<Q, A, T, P>(
        repositories: Repositories<Q, A, T, P>,
        identity: Arc<dyn IdentityProvider>,
        clock: Arc<dyn Clock>,
        page_size: u64,
    ) -> Self
    where
        Q: QuestionRepository + 'static,
        A: AnswerRepository + 'static,
        T: TopicRepository + 'static,
        P: ProfileRepository + 'static,
    {
        let Repositories {
            questions,
            answers,
            topics,
            profiles,
        } = repositories;

        let question_service = Arc::new(QuestionService::new(
            Arc::clone(&questions),
            Arc::clone(&topics),
            Arc::clone(&profiles),
            Arc::clone(&clock),
        ));
        let answer_service = Arc::new(AnswerService::new(
            answers,
            questions,
            Arc::clone(&profiles),
            Arc::clone(&clock),
        ));
        let profile_service = Arc::new(ProfileService::new(profiles, clock));
        let login = Arc::new(SessionLoginService::new(
            identity,
            Arc::clone(&profile_service) as Arc<dyn ProfileCommand>,
        ));

        Self {
            questions: Arc::clone(&question_service) as Arc<dyn QuestionsQuery>,
            questions_command: question_service,
            answers: Arc::clone(&answer_service) as Arc<dyn AnswersQuery>,
            answers_command: answer_service,
            topics: Arc::new(TopicService::new(topics)),
            profile: Arc::clone(&profile_service) as Arc<dyn ProfileQuery>,
            profile_command: profile_service,
            login,
            page_size: page_size.max(1),
        }
    }
}
