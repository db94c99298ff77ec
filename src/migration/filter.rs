//! Decides which matched pairs need an update.

use std::fmt;

use super::models::{MatchedPair, UpdateCandidate};

/// Lowest accepted export value for views or rating.
pub const MIN_SCORE: i64 = 1;
/// Highest accepted export value for views or rating.
pub const MAX_SCORE: i64 = 10;
/// Multiplier from the export's 1-10 rating to Stash's 0-100 `rating100`.
pub const RATING_SCALE: i64 = 10;

/// Why a matched pair was left out of the worklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    ViewsOutOfRange(String),
    RatingOutOfRange(String),
    Unchanged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ViewsOutOfRange(v) => {
                write!(f, "views {:?} outside {}-{}", v, MIN_SCORE, MAX_SCORE)
            }
            SkipReason::RatingOutOfRange(r) => {
                write!(f, "rating {:?} outside {}-{}", r, MIN_SCORE, MAX_SCORE)
            }
            SkipReason::Unchanged => write!(f, "already up to date"),
        }
    }
}

/// Parse an export value. Anything that isn't a plain integer is bad data.
pub fn parse_score(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn in_range(raw: &str) -> bool {
    parse_score(raw).is_some_and(|value| (MIN_SCORE..=MAX_SCORE).contains(&value))
}

/// Evaluate one matched pair.
///
/// A present value out of range drops the whole pair, even if the other
/// field would qualify on its own. A field equal to what Stash already has
/// counts as unchanged; the pair is kept only if some field changes. Fields
/// absent in the export stay absent in the candidate.
pub fn evaluate(pair: &MatchedPair<'_>) -> Result<UpdateCandidate, SkipReason> {
    let MatchedPair { record, scene } = *pair;

    if let Some(views) = record.views.as_deref() {
        if !in_range(views) {
            return Err(SkipReason::ViewsOutOfRange(views.to_string()));
        }
    }
    if let Some(rating) = record.rating.as_deref() {
        if !in_range(rating) {
            return Err(SkipReason::RatingOutOfRange(rating.to_string()));
        }
    }

    let views_changed = record
        .views
        .as_deref()
        .and_then(parse_score)
        .is_some_and(|views| views != scene.play_count);
    let rating_changed = record
        .rating
        .as_deref()
        .and_then(parse_score)
        .is_some_and(|rating| rating * RATING_SCALE != scene.rating100);

    if !views_changed && !rating_changed {
        return Err(SkipReason::Unchanged);
    }

    Ok(UpdateCandidate {
        id: scene.id.clone(),
        path: record.path.clone(),
        title: record.title.clone(),
        views: record.views.clone(),
        rating: record.rating.clone(),
    })
}
