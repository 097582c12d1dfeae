//! PostgreSQL persistence adapters built on Diesel.
//!
//! Repositories translate between Diesel rows and domain types and hold no
//! business rules. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module. Connections come from a `bb8`
//! pool through `diesel-async`.
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselQuestionRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/askalocal")).await?;
//! let questions = DieselQuestionRepository::new(pool);
//! ```

mod diesel_answer_repository;
mod diesel_error_mapping;
mod diesel_profile_repository;
mod diesel_question_repository;
mod diesel_topic_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_answer_repository::DieselAnswerRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_question_repository::DieselQuestionRepository;
pub use diesel_topic_repository::DieselTopicRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
