use serde::{Deserialize, Serialize};

use super::domain::UserId;
use super::store::{GamificationStore, OwnedCollection, StoreError};

/// Weights applied to each engagement signal when computing the activity
/// score. All weights are non-negative, so earning a badge or adding content
/// can never lower the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub profile_field: u32,
    pub experience: u32,
    pub portfolio_item: u32,
    pub badge: u32,
    pub message_sent: u32,
    pub ai_advisor_used: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            profile_field: 5,
            experience: 10,
            portfolio_item: 15,
            badge: 25,
            message_sent: 1,
            ai_advisor_used: 2,
        }
    }
}

/// Weighted linear sum over the user's engagement signals. Pure read: the
/// orchestrator is responsible for persisting the result. The sub-counts are
/// independent reads with no ordering requirement between them.
pub fn compute_activity_score<S: GamificationStore>(
    store: &S,
    user: &UserId,
    weights: &ScoreWeights,
) -> Result<u32, StoreError> {
    let profile = store.profile(user)?;
    let experiences = store.count_owned(OwnedCollection::Experiences, user)?;
    let portfolio_items = store.count_owned(OwnedCollection::PortfolioItems, user)?;
    let badges = store.count_owned(OwnedCollection::UserBadges, user)?;
    let messages = store.count_owned(OwnedCollection::MessagesSent, user)?;
    let ai_uses = store.count_owned(OwnedCollection::AiAdvisorUses, user)?;

    let mut total: u64 = 0;
    if profile.field_is_set("bio") {
        total += u64::from(weights.profile_field);
    }
    if profile.field_is_set("headline") {
        total += u64::from(weights.profile_field);
    }
    total += experiences * u64::from(weights.experience);
    total += portfolio_items * u64::from(weights.portfolio_item);
    total += badges * u64::from(weights.badge);
    total += messages * u64::from(weights.message_sent);
    total += ai_uses * u64::from(weights.ai_advisor_used);

    Ok(u32::try_from(total).unwrap_or(u32::MAX))
}
