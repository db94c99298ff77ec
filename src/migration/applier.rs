//! Applies the worklist to Stash, one scene at a time.

use tracing::{debug, warn};

use super::filter::{parse_score, RATING_SCALE};
use super::models::{Outcome, UpdateCandidate};
use super::progress::ProgressObserver;
use crate::stash::{SceneMutation, StashApi, StashError};

/// Pick the mutation shape for a candidate.
///
/// Both fields present sends the combined update, views alone the views
/// update; anything else falls through to the rating update.
pub fn mutation_for(candidate: &UpdateCandidate) -> Result<SceneMutation, StashError> {
    let id = candidate.id.clone();
    let play_count = candidate.views.as_deref().map(numeric).transpose()?;
    let rating100 = candidate
        .rating
        .as_deref()
        .map(|raw| {
            numeric(raw)?.checked_mul(RATING_SCALE).ok_or_else(|| {
                StashError::InvalidRequest(format!("Rating {:?} is out of range", raw))
            })
        })
        .transpose()?;

    Ok(match (play_count, rating100) {
        (Some(play_count), Some(rating100)) => SceneMutation::All {
            id,
            play_count,
            rating100,
        },
        (Some(play_count), None) => SceneMutation::Views { id, play_count },
        (None, rating100) => SceneMutation::Rating { id, rating100 },
    })
}

fn numeric(raw: &str) -> Result<i64, StashError> {
    parse_score(raw)
        .ok_or_else(|| StashError::InvalidRequest(format!("{:?} is not a number", raw)))
}

/// Issues one `sceneUpdate` per candidate, strictly in order.
pub struct UpdateApplier<'a> {
    api: &'a dyn StashApi,
}

impl<'a> UpdateApplier<'a> {
    pub fn new(api: &'a dyn StashApi) -> Self {
        Self { api }
    }

    /// Attempt every candidate and return one outcome per candidate, in order.
    ///
    /// A failed call is recorded in its outcome and never stops the loop.
    pub async fn apply(
        &self,
        worklist: &[UpdateCandidate],
        progress: &dyn ProgressObserver,
    ) -> Vec<Outcome> {
        let total = worklist.len();
        let mut outcomes = Vec::with_capacity(total);

        for candidate in worklist {
            let outcome = match self.apply_one(candidate).await {
                Ok(payload) => {
                    debug!(scene_id = %candidate.id, "Scene updated");
                    Outcome::success(candidate, payload)
                }
                Err(e) => {
                    warn!(
                        scene_id = %candidate.id,
                        path = %candidate.path,
                        error = %e,
                        "Scene update failed"
                    );
                    Outcome::failure(candidate, &e)
                }
            };
            outcomes.push(outcome);
            progress.on_progress(outcomes.len(), total);
        }

        outcomes
    }

    async fn apply_one(&self, candidate: &UpdateCandidate) -> Result<String, StashError> {
        let mutation = mutation_for(candidate)?;
        debug!(scene_id = %mutation.scene_id(), "Sending sceneUpdate");
        let data = self
            .api
            .execute(mutation.query(), mutation.variables())
            .await?;
        Ok(data.to_string())
    }
}
