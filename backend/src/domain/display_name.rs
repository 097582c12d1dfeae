//! Random display names for first-time users.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::DisplayName;

const ADJECTIVES: [&str; 7] = [
    "Curious", "Kind", "Brave", "Quiet", "Smart", "Gentle", "Friendly",
];

const NOUNS: [&str; 7] = [
    "Traveler", "Panda", "Tiger", "Fox", "Koala", "Seoulite", "Nomad",
];

/// Generate an `{Adjective}{Noun}{100..=999}` display name.
///
/// The random source is injected so callers can seed it in tests.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use backend::domain::display_name::generate_display_name;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let name = generate_display_name(&mut rng);
/// assert!(name.as_ref().len() <= 20);
/// ```
pub fn generate_display_name<R: Rng + ?Sized>(rng: &mut R) -> DisplayName {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Curious");
    let noun = NOUNS.choose(rng).copied().unwrap_or("Traveler");
    let number: u16 = rng.gen_range(100..=999);
    // Longest combination is 19 characters.
    DisplayName::from_generated(format!("{adjective}{noun}{number}"))
}
