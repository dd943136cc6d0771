use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::badges::award_eligible_badges;
use super::compatibility::{rank_candidates, RankedCandidate};
use super::domain::{ActivityEventType, BadgeId, UserId};
use super::score::{compute_activity_score, ScoreWeights};
use super::store::{GamificationStore, StoreError};

/// Outcome of one orchestration pass: the badges earned during the pass and
/// the activity score that was persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChangeOutcome {
    pub user_id: UserId,
    pub newly_awarded: Vec<BadgeId>,
    pub activity_score: u32,
}

/// Scoring orchestrator: runs badge awarding, score recalculation, and score
/// persistence after any state-changing action. Holds the storage port
/// explicitly so it can run against any backend, including the in-memory one.
pub struct ScoringService<S> {
    store: Arc<S>,
    weights: ScoreWeights,
}

impl<S> ScoringService<S>
where
    S: GamificationStore + 'static,
{
    pub fn new(store: Arc<S>, weights: ScoreWeights) -> Self {
        Self { store, weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Run the full sequence for one user. Badges are evaluated on the new
    /// state first, so badges earned by this very action feed into the score
    /// computed in the same pass. The steps are not transactional: a failure
    /// after awarding leaves a stale cached score, which the next triggering
    /// action repairs from still-correct underlying state.
    pub fn on_user_state_changed(
        &self,
        user: &UserId,
    ) -> Result<StateChangeOutcome, ScoringError> {
        let newly_awarded = award_eligible_badges(self.store.as_ref(), user)?;
        let activity_score = compute_activity_score(self.store.as_ref(), user, &self.weights)?;
        self.store.update_profile_score(user, activity_score)?;

        info!(
            user = %user.0,
            score = activity_score,
            badges = newly_awarded.len(),
            "scoring pass complete"
        );

        Ok(StateChangeOutcome {
            user_id: user.clone(),
            newly_awarded,
            activity_score,
        })
    }

    /// Best-effort variant for callers whose primary action must not fail on
    /// a scoring error. Logs and swallows.
    pub fn notify_user_state_changed(&self, user: &UserId) {
        if let Err(error) = self.on_user_state_changed(user) {
            warn!(user = %user.0, %error, "scoring pass failed; will self-heal on next action");
        }
    }

    /// Side-effect-free score read for direct display.
    pub fn activity_score(&self, user: &UserId) -> Result<u32, ScoringError> {
        Ok(compute_activity_score(
            self.store.as_ref(),
            user,
            &self.weights,
        )?)
    }

    /// Append an AI-advisor usage event and re-run the scoring sequence, the
    /// way the advisor endpoint logs its own activity.
    pub fn log_ai_advisor_use(&self, user: &UserId) -> Result<StateChangeOutcome, ScoringError> {
        self.store.record_activity(
            user,
            ActivityEventType::AiAdvisorUsed,
            "used the AI Advisor for career advice.",
        )?;
        self.on_user_state_changed(user)
    }

    /// Build the viewer's discovery feed: every discoverable candidate scored
    /// against the viewer and ordered by compatibility plus cached activity
    /// score. Computed fresh on each call; nothing is persisted.
    pub fn rank_discovery_feed(&self, viewer: &UserId) -> Result<Vec<RankedCandidate>, ScoringError> {
        let viewer_profile = self.store.profile_with_interests(viewer)?;
        let candidates = self.store.discoverable_profiles(viewer)?;
        Ok(rank_candidates(&viewer_profile, candidates))
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
