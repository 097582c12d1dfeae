//! Joins author profiles onto questions and answers.
//!
//! Each feed fetches the profiles of the distinct authors on the current page
//! in one query, then resolves every row against the resulting lookup.

use std::collections::{HashMap, HashSet};

use crate::domain::{AuthorProfile, UserId};

/// Author fields attached to every surfaced question or answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorInfo {
    /// Display name, empty when the profile is missing.
    pub display_name: String,
    /// Avatar location, `None` when absent or the profile is missing.
    pub avatar_url: Option<String>,
}

/// Lookup table from author id to profile fields.
#[derive(Debug, Clone, Default)]
pub struct AuthorLookup {
    profiles: HashMap<UserId, AuthorInfo>,
}

impl AuthorLookup {
    /// Build the lookup from fetched profiles.
    #[must_use]
    pub fn from_profiles<I>(profiles: I) -> Self
    where
        I: IntoIterator<Item = AuthorProfile>,
    {
        let profiles = profiles
            .into_iter()
            .map(|profile| {
                (
                    profile.id,
                    AuthorInfo {
                        display_name: profile.display_name,
                        avatar_url: profile.avatar_url,
                    },
                )
            })
            .collect();
        Self { profiles }
    }

    /// Resolve an author, falling back to an empty name and no avatar.
    #[must_use]
    pub fn resolve(&self, author_id: &UserId) -> AuthorInfo {
        self.profiles.get(author_id).cloned().unwrap_or_default()
    }
}

/// Distinct author ids in first-seen order.
pub fn distinct_author_ids<'a, I>(ids: I) -> Vec<UserId>
where
    I: IntoIterator<Item = &'a UserId>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}
