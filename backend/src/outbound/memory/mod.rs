//! In-memory implementation of every repository port.
//!
//! Used when no database URL is configured and by the integration tests.
//! All tables live behind one mutex, so each port call is atomic with
//! respect to every other call; concurrent view increments never lose
//! updates and a question is never visible without its topic mappings.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::ports::{
    AnswerRepository, AnswerRepositoryError, ProfileRepository, ProfileRepositoryError,
    QuestionRepository, QuestionRepositoryError, TopicRepository, TopicRepositoryError,
};
use crate::domain::{
    AnswerId, AnswerRecord, AuthorProfile, NewAnswer, NewQuestion, ProfileUpdate, QuestionId,
    QuestionRecord, QuestionStatus, Topic, TopicId, TopicMappingRow, UserId, UserProfile,
};

#[derive(Default)]
struct Tables {
    questions: Vec<QuestionRecord>,
    answers: Vec<AnswerRecord>,
    topics: Vec<Topic>,
    mappings: Vec<(QuestionId, TopicId)>,
    profiles: HashMap<UserId, UserProfile>,
    last_question_id: i64,
    last_answer_id: i64,
}

impl Tables {
    fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id == id)
    }
}

/// Process-local store backing all repository ports.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `topics`.
    #[must_use]
    pub fn with_topics(topics: Vec<Topic>) -> Self {
        Self {
            tables: Mutex::new(Tables {
                topics,
                ..Tables::default()
            }),
        }
    }

    /// Store pre-populated with the starter topic set.
    #[must_use]
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::with_topics(starter_topics(now))
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        match self.tables.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Topics offered by a fresh in-memory deployment.
#[must_use]
pub fn starter_topics(now: DateTime<Utc>) -> Vec<Topic> {
    [
        (1, "food", "Food", "Restaurants, markets, and what to order"),
        (2, "transport", "Transport", "Subway, buses, taxis, and trains"),
        (3, "housing", "Housing", "Neighbourhoods, leases, and deposits"),
        (4, "language", "Language", "Korean phrases and etiquette"),
        (5, "culture", "Culture", "Festivals, customs, and day trips"),
    ]
    .into_iter()
    .filter_map(|(id, slug, name, description)| {
        Some(Topic {
            id: TopicId::new(id).ok()?,
            slug: slug.to_owned(),
            name: name.to_owned(),
            description: Some(description.to_owned()),
            created_at: now,
            updated_at: now,
        })
    })
    .collect()
}

fn next_id(last: &mut i64) -> i64 {
    *last += 1;
    *last
}

#[async_trait]
impl QuestionRepository for MemoryStore {
    async fn list_page(
        &self,
        page: PageRequest,
    ) -> Result<Vec<QuestionRecord>, QuestionRepositoryError> {
        let tables = self.lock();
        let mut rows: Vec<&QuestionRecord> = tables.questions.iter().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: QuestionId,
    ) -> Result<Option<QuestionRecord>, QuestionRepositoryError> {
        Ok(self.lock().questions.iter().find(|q| q.id == id).cloned())
    }

    async fn exists(&self, id: QuestionId) -> Result<bool, QuestionRepositoryError> {
        Ok(self.lock().questions.iter().any(|q| q.id == id))
    }

    async fn topic_mappings(
        &self,
        question_ids: &[QuestionId],
    ) -> Result<Vec<TopicMappingRow>, QuestionRepositoryError> {
        let wanted: HashSet<&QuestionId> = question_ids.iter().collect();
        let tables = self.lock();
        Ok(tables
            .mappings
            .iter()
            .filter(|(question_id, _)| wanted.contains(question_id))
            .map(|(question_id, topic_id)| {
                TopicMappingRow::from_join(
                    *question_id,
                    tables.topic(*topic_id).map(Topic::summary),
                )
            })
            .collect())
    }

    async fn insert(&self, question: &NewQuestion) -> Result<QuestionId, QuestionRepositoryError> {
        let mut tables = self.lock();
        if let Some(missing) = question
            .topic_ids
            .iter()
            .find(|id| tables.topic(**id).is_none())
        {
            return Err(QuestionRepositoryError::query(format!(
                "insert on table \"question_topic_mapping\" violates foreign key: topic {missing}"
            )));
        }
        let raw_id = next_id(&mut tables.last_question_id);
        let id = QuestionId::new(raw_id)
            .map_err(|err| QuestionRepositoryError::query(err.to_string()))?;
        tables.questions.push(QuestionRecord {
            id,
            author_id: question.author_id.clone(),
            title: question.draft.title().to_owned(),
            body: question.draft.body().map(str::to_owned),
            status: QuestionStatus::Open,
            view_count: 0,
            created_at: question.created_at,
            updated_at: question.created_at,
        });
        tables
            .mappings
            .extend(question.topic_ids.iter().map(|topic_id| (id, *topic_id)));
        Ok(id)
    }

    async fn increment_view_count(&self, id: QuestionId) -> Result<(), QuestionRepositoryError> {
        let mut tables = self.lock();
        if let Some(question) = tables.questions.iter_mut().find(|q| q.id == id) {
            question.view_count = question.view_count.saturating_add(1);
        }
        Ok(())
    }
}

#[async_trait]
impl AnswerRepository for MemoryStore {
    async fn list_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<AnswerRecord>, AnswerRepositoryError> {
        let tables = self.lock();
        let mut rows: Vec<AnswerRecord> = tables
            .answers
            .iter()
            .filter(|answer| answer.question_id == question_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn insert(&self, answer: &NewAnswer) -> Result<AnswerId, AnswerRepositoryError> {
        let mut tables = self.lock();
        if !tables.questions.iter().any(|q| q.id == answer.question_id) {
            return Err(AnswerRepositoryError::query(format!(
                "insert on table \"answer\" violates foreign key: question {}",
                answer.question_id
            )));
        }
        let raw_id = next_id(&mut tables.last_answer_id);
        let id = AnswerId::new(raw_id).map_err(|err| AnswerRepositoryError::query(err.to_string()))?;
        tables.answers.push(AnswerRecord {
            id,
            question_id: answer.question_id,
            author_id: answer.author_id.clone(),
            title: answer.draft.title().to_owned(),
            content: answer.draft.content().to_owned(),
            upvote_count: 0,
            created_at: answer.created_at,
            updated_at: answer.created_at,
        });
        Ok(id)
    }
}

#[async_trait]
impl TopicRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Topic>, TopicRepositoryError> {
        let mut topics = self.lock().topics.clone();
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(topics)
    }

    async fn existing_ids(&self, ids: &[TopicId]) -> Result<Vec<TopicId>, TopicRepositoryError> {
        let tables = self.lock();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| tables.topic(*id).is_some())
            .collect())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        Ok(self.lock().profiles.get(id).cloned())
    }

    async fn find_authors(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<AuthorProfile>, ProfileRepositoryError> {
        let tables = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| tables.profiles.get(id))
            .map(AuthorProfile::from)
            .collect())
    }

    async fn insert_if_absent(
        &self,
        profile: &UserProfile,
    ) -> Result<bool, ProfileRepositoryError> {
        let mut tables = self.lock();
        if tables.profiles.contains_key(&profile.id) {
            return Ok(false);
        }
        tables.profiles.insert(profile.id.clone(), profile.clone());
        Ok(true)
    }

    async fn update(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, ProfileRepositoryError> {
        let mut tables = self.lock();
        let Some(profile) = tables.profiles.get_mut(id) else {
            return Ok(false);
        };
        profile.display_name = update.display_name().as_ref().to_owned();
        profile.name = update.name().map(str::to_owned);
        profile.updated_at = updated_at;
        Ok(true)
    }
}
