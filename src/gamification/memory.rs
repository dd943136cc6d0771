use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use chrono::Utc;

use super::domain::{
    ActivityEventType, Badge, BadgeId, CandidateProfile, ConnectionStatus, InterestId, Profile,
    UserId,
};
use super::store::{GamificationStore, OwnedCollection, StoreError};

/// One append-only activity feed row.
#[derive(Debug, Clone)]
pub struct ActivityEvent {
    pub user_id: UserId,
    pub event_type: ActivityEventType,
    pub description: String,
    pub created_at: chrono::DateTime<Utc>,
}

/// A dated activity record owned by a user, optionally tagged to an interest.
#[derive(Debug, Clone, Default)]
pub struct ExperienceRow {
    pub title: String,
    pub interest_id: Option<InterestId>,
}

/// A showcase artifact owned by a user, optionally tagged to an interest.
#[derive(Debug, Clone, Default)]
pub struct PortfolioRow {
    pub title: String,
    pub interest_id: Option<InterestId>,
}

#[derive(Debug, Clone)]
struct ConnectionRow {
    requester: UserId,
    addressee: UserId,
    status: ConnectionStatus,
}

#[derive(Default)]
struct MemoryState {
    profiles: HashMap<UserId, Profile>,
    badges: Vec<Badge>,
    user_badges: HashMap<UserId, BTreeSet<BadgeId>>,
    user_interests: HashMap<UserId, BTreeSet<InterestId>>,
    experiences: HashMap<UserId, Vec<ExperienceRow>>,
    portfolio_items: HashMap<UserId, Vec<PortfolioRow>>,
    messages_sent: HashMap<UserId, u64>,
    activity_feed: Vec<ActivityEvent>,
    connections: Vec<ConnectionRow>,
}

/// In-memory store backing the demo binary and the test suites. All mutators
/// model the writes the surrounding application performs before invoking the
/// orchestrator.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn insert_profile(&self, profile: Profile) {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.profiles.insert(profile.id.clone(), profile);
    }

    pub fn seed_badges(&self, badges: Vec<Badge>) {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.badges = badges;
    }

    pub fn add_experience(&self, user: &UserId, row: ExperienceRow) {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.experiences.entry(user.clone()).or_default().push(row);
    }

    pub fn add_portfolio_item(&self, user: &UserId, row: PortfolioRow) {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state
            .portfolio_items
            .entry(user.clone())
            .or_default()
            .push(row);
    }

    pub fn declare_interest(&self, user: &UserId, interest: InterestId) {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state
            .user_interests
            .entry(user.clone())
            .or_default()
            .insert(interest);
    }

    pub fn add_sent_messages(&self, user: &UserId, count: u64) {
        let mut state = self.state.lock().expect("store mutex poisoned");
        *state.messages_sent.entry(user.clone()).or_default() += count;
    }

    pub fn add_connection(&self, requester: &UserId, addressee: &UserId, status: ConnectionStatus) {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.connections.push(ConnectionRow {
            requester: requester.clone(),
            addressee: addressee.clone(),
            status,
        });
    }

    pub fn earned_badges(&self, user: &UserId) -> BTreeSet<BadgeId> {
        let state = self.state.lock().expect("store mutex poisoned");
        state.user_badges.get(user).cloned().unwrap_or_default()
    }

    pub fn activity_feed_len(&self) -> usize {
        let state = self.state.lock().expect("store mutex poisoned");
        state.activity_feed.len()
    }

    fn enriched(&self, state: &MemoryState, profile: &Profile) -> CandidateProfile {
        let user = &profile.id;
        let experience_tags = state
            .experiences
            .get(user)
            .into_iter()
            .flatten()
            .filter_map(|row| row.interest_id)
            .collect();
        let portfolio_tags = state
            .portfolio_items
            .get(user)
            .into_iter()
            .flatten()
            .filter_map(|row| row.interest_id)
            .collect();

        CandidateProfile {
            profile: profile.clone(),
            interest_ids: state.user_interests.get(user).cloned().unwrap_or_default(),
            experience_interest_tags: experience_tags,
            portfolio_interest_tags: portfolio_tags,
        }
    }
}

impl GamificationStore for MemoryStore {
    fn profile(&self, user: &UserId) -> Result<Profile, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");
        state
            .profiles
            .get(user)
            .cloned()
            .ok_or(StoreError::ProfileNotFound)
    }

    fn count_owned(&self, collection: OwnedCollection, user: &UserId) -> Result<u64, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");
        let count = match collection {
            OwnedCollection::Experiences => state
                .experiences
                .get(user)
                .map_or(0, |rows| rows.len() as u64),
            OwnedCollection::PortfolioItems => state
                .portfolio_items
                .get(user)
                .map_or(0, |rows| rows.len() as u64),
            OwnedCollection::UserInterests => state
                .user_interests
                .get(user)
                .map_or(0, |set| set.len() as u64),
            OwnedCollection::UserBadges => state
                .user_badges
                .get(user)
                .map_or(0, |set| set.len() as u64),
            OwnedCollection::MessagesSent => state.messages_sent.get(user).copied().unwrap_or(0),
            OwnedCollection::AiAdvisorUses => state
                .activity_feed
                .iter()
                .filter(|event| {
                    &event.user_id == user
                        && event.event_type == ActivityEventType::AiAdvisorUsed
                })
                .count() as u64,
        };
        Ok(count)
    }

    fn all_badges(&self) -> Result<Vec<Badge>, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.badges.clone())
    }

    fn earned_badge_ids(&self, user: &UserId) -> Result<BTreeSet<BadgeId>, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.user_badges.get(user).cloned().unwrap_or_default())
    }

    fn insert_user_badges(&self, user: &UserId, badges: &[BadgeId]) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        let earned = state.user_badges.entry(user.clone()).or_default();
        for badge in badges {
            earned.insert(*badge);
        }
        Ok(())
    }

    fn update_profile_score(&self, user: &UserId, score: u32) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        let profile = state
            .profiles
            .get_mut(user)
            .ok_or(StoreError::ProfileNotFound)?;
        profile.activity_score = score;
        profile.updated_at = Utc::now();
        Ok(())
    }

    fn profile_with_interests(&self, user: &UserId) -> Result<CandidateProfile, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");
        let profile = state
            .profiles
            .get(user)
            .cloned()
            .ok_or(StoreError::ProfileNotFound)?;
        Ok(self.enriched(&state, &profile))
    }

    fn discoverable_profiles(
        &self,
        viewer: &UserId,
    ) -> Result<Vec<CandidateProfile>, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");

        let mut linked: BTreeSet<UserId> = BTreeSet::new();
        linked.insert(viewer.clone());
        for edge in &state.connections {
            if edge.status == ConnectionStatus::Declined {
                continue;
            }
            if &edge.requester == viewer {
                linked.insert(edge.addressee.clone());
            }
            if &edge.addressee == viewer {
                linked.insert(edge.requester.clone());
            }
        }

        let mut candidates: Vec<CandidateProfile> = state
            .profiles
            .values()
            .filter(|profile| !linked.contains(&profile.id))
            .map(|profile| self.enriched(&state, profile))
            .collect();
        candidates.sort_by(|a, b| a.profile.id.cmp(&b.profile.id));
        Ok(candidates)
    }

    fn record_activity(
        &self,
        user: &UserId,
        event_type: ActivityEventType,
        description: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.activity_feed.push(ActivityEvent {
            user_id: user.clone(),
            event_type,
            description: description.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }
}
