use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::job::JobRecord;
use crate::search::cache::SnapshotCache;

/// Shorter input returns nothing without reading the snapshot.
pub const MIN_TERM_CHARS: usize = 2;
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestField {
    Title,
    Location,
}

impl SuggestField {
    fn value<'a>(&self, job: &'a JobRecord) -> Option<&'a str> {
        match self {
            SuggestField::Title => job.title.as_deref(),
            SuggestField::Location => job.location.as_deref(),
        }
    }
}

/// Autocomplete values for `term` drawn from the snapshot cache.
pub async fn suggest(cache: &SnapshotCache, field: SuggestField, term: &str) -> Vec<String> {
    if term.chars().count() < MIN_TERM_CHARS {
        return Vec::new();
    }
    let jobs = cache.snapshot().await;
    rank_suggestions(&jobs, field, term)
}

/// Distinct field values containing `term` (case-insensitive), in snapshot
/// order, at most `MAX_SUGGESTIONS`.
pub fn rank_suggestions(jobs: &[JobRecord], field: SuggestField, term: &str) -> Vec<String> {
    let needle = term.to_lowercase();
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for value in jobs.iter().filter_map(|job| field.value(job)) {
        if out.len() == MAX_SUGGESTIONS {
            break;
        }
        if value.to_lowercase().contains(&needle) && seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}
