//! Shared test doubles and builders for unit tests.

mod clock;
mod records;

pub use clock::FixtureClock;
pub use records::{answer_record, author_profile, fixed_now, question_record, topic, user_profile};
