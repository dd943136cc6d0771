use tracing::{debug, info};

use super::domain::{BadgeCriteria, BadgeId, Profile, UserId};
use super::store::{GamificationStore, OwnedCollection, StoreError};

/// Pure predicate deciding whether a badge's criteria hold for a user's
/// current state. Unrecognized criteria never satisfy and never error.
pub fn criteria_satisfied<S: GamificationStore>(
    store: &S,
    user: &UserId,
    profile: &Profile,
    criteria: &BadgeCriteria,
) -> Result<bool, StoreError> {
    match criteria {
        BadgeCriteria::Profile { fields } => Ok(fields
            .iter()
            .all(|field| profile.field_is_set(field))),
        BadgeCriteria::Experience { count } => {
            Ok(store.count_owned(OwnedCollection::Experiences, user)? >= *count)
        }
        BadgeCriteria::Portfolio { count } => {
            Ok(store.count_owned(OwnedCollection::PortfolioItems, user)? >= *count)
        }
        BadgeCriteria::Interest { count } => {
            Ok(store.count_owned(OwnedCollection::UserInterests, user)? >= *count)
        }
        BadgeCriteria::Unrecognized => Ok(false),
    }
}

/// Evaluate every unearned badge for the user and persist the newly earned
/// ones in a single batch. Idempotent: the earned-set filter guarantees a
/// second run with unchanged state awards nothing. Any fetch failure aborts
/// before any row is written.
pub fn award_eligible_badges<S: GamificationStore>(
    store: &S,
    user: &UserId,
) -> Result<Vec<BadgeId>, StoreError> {
    let catalog = store.all_badges()?;
    let profile = store.profile(user)?;
    let earned = store.earned_badge_ids(user)?;

    let mut newly_earned = Vec::new();
    for badge in catalog.iter().filter(|badge| !earned.contains(&badge.id)) {
        if criteria_satisfied(store, user, &profile, &badge.criteria)? {
            debug!(user = %user.0, badge = %badge.name, "badge criteria satisfied");
            newly_earned.push(badge.id);
        }
    }

    if !newly_earned.is_empty() {
        store.insert_user_badges(user, &newly_earned)?;
        info!(
            user = %user.0,
            count = newly_earned.len(),
            "awarded new badges"
        );
    }

    Ok(newly_earned)
}
