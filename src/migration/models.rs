use serde::{Deserialize, Serialize};

use crate::plex::PlexRecord;
use crate::stash::{StashError, StashScene};

/// A scene paired with the export row that shares its path.
#[derive(Debug, Clone, Copy)]
pub struct MatchedPair<'a> {
    pub record: &'a PlexRecord,
    pub scene: &'a StashScene,
}

/// A pending update for one scene.
///
/// `views` and `rating` keep the export's textual values; at least one is
/// present and every present value is within range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCandidate {
    pub id: String,
    pub path: String,
    pub title: String,
    pub views: Option<String>,
    pub rating: Option<String>,
}

/// Result of attempting one update, as written to the report.
///
/// Exactly one of `result` and `error` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub id: String,
    pub path: String,
    pub title: String,
    pub views: String,
    pub rating: String,
    pub result: String,
    pub error: String,
}

impl Outcome {
    pub fn success(candidate: &UpdateCandidate, payload: String) -> Self {
        Self::new(candidate, payload, String::new())
    }

    pub fn failure(candidate: &UpdateCandidate, error: &StashError) -> Self {
        Self::new(candidate, String::new(), error.to_string())
    }

    fn new(candidate: &UpdateCandidate, result: String, error: String) -> Self {
        Self {
            id: candidate.id.clone(),
            path: candidate.path.clone(),
            title: candidate.title.clone(),
            views: candidate.views.clone().unwrap_or_default(),
            rating: candidate.rating.clone().unwrap_or_default(),
            result,
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}
