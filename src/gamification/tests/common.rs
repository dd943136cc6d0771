use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::gamification::domain::{
    ActivityEventType, Badge, BadgeCriteria, BadgeId, CandidateProfile, InterestId, Profile,
    UserId, UserRole,
};
use crate::gamification::memory::{ExperienceRow, MemoryStore, PortfolioRow};
use crate::gamification::score::ScoreWeights;
use crate::gamification::service::ScoringService;
use crate::gamification::store::{GamificationStore, OwnedCollection, StoreError};

pub(super) fn user(id: &str) -> UserId {
    UserId(id.to_string())
}

pub(super) fn profile(id: &str) -> Profile {
    let created = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    Profile {
        id: user(id),
        full_name: Some("Jordan Alvarez".to_string()),
        username: Some(id.to_string()),
        headline: Some("Aspiring mechatronics engineer".to_string()),
        bio: Some("Building robots and looking for a first internship.".to_string()),
        role: Some(UserRole::HighSchoolStudent),
        activity_score: 0,
        created_at: created,
        updated_at: created,
    }
}

pub(super) fn profile_with_role(id: &str, role: UserRole) -> Profile {
    Profile {
        role: Some(role),
        ..profile(id)
    }
}

pub(super) fn profile_badge() -> Badge {
    Badge {
        id: BadgeId(10),
        name: "Profile Pro".to_string(),
        description: "Headline and bio complete".to_string(),
        icon_url: None,
        criteria: BadgeCriteria::Profile {
            fields: vec!["headline".to_string(), "bio".to_string()],
        },
    }
}

pub(super) fn experience_badge(count: u64) -> Badge {
    Badge {
        id: BadgeId(20),
        name: "Experienced".to_string(),
        description: format!("Log {count} experiences"),
        icon_url: None,
        criteria: BadgeCriteria::Experience { count },
    }
}

pub(super) fn portfolio_badge(count: u64) -> Badge {
    Badge {
        id: BadgeId(30),
        name: "Showcase".to_string(),
        description: format!("Add {count} portfolio items"),
        icon_url: None,
        criteria: BadgeCriteria::Portfolio { count },
    }
}

pub(super) fn interest_badge(count: u64) -> Badge {
    Badge {
        id: BadgeId(40),
        name: "Curious".to_string(),
        description: format!("Declare {count} interests"),
        icon_url: None,
        criteria: BadgeCriteria::Interest { count },
    }
}

pub(super) fn unrecognized_badge() -> Badge {
    let raw = r#"{"id": 99, "name": "Mystery", "description": "From a newer catalog", "criteria": {"type": "streak", "days": 7}}"#;
    serde_json::from_str(raw).expect("unknown criteria tags deserialize to Unrecognized")
}

pub(super) fn candidate(
    id: &str,
    role: UserRole,
    interests: &[i64],
    experience_tags: &[i64],
    portfolio_tags: &[i64],
) -> CandidateProfile {
    let to_set = |ids: &[i64]| -> BTreeSet<InterestId> {
        ids.iter().copied().map(InterestId).collect()
    };
    CandidateProfile {
        profile: profile_with_role(id, role),
        interest_ids: to_set(interests),
        experience_interest_tags: to_set(experience_tags),
        portfolio_interest_tags: to_set(portfolio_tags),
    }
}

pub(super) fn seeded_store(badges: Vec<Badge>) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::default());
    store.seed_badges(badges);
    store
}

pub(super) fn add_experiences(store: &MemoryStore, owner: &UserId, count: usize) {
    for index in 0..count {
        store.add_experience(
            owner,
            ExperienceRow {
                title: format!("Experience {index}"),
                interest_id: None,
            },
        );
    }
}

pub(super) fn add_portfolio_items(store: &MemoryStore, owner: &UserId, count: usize) {
    for index in 0..count {
        store.add_portfolio_item(
            owner,
            PortfolioRow {
                title: format!("Portfolio item {index}"),
                interest_id: None,
            },
        );
    }
}

pub(super) fn build_service(store: Arc<MemoryStore>) -> ScoringService<MemoryStore> {
    ScoringService::new(store, ScoreWeights::default())
}

/// Store whose every operation fails, for exercising abort paths.
pub(super) struct UnavailableStore;

impl UnavailableStore {
    fn down<T>() -> Result<T, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

impl GamificationStore for UnavailableStore {
    fn profile(&self, _user: &UserId) -> Result<Profile, StoreError> {
        Self::down()
    }

    fn count_owned(&self, _collection: OwnedCollection, _user: &UserId) -> Result<u64, StoreError> {
        Self::down()
    }

    fn all_badges(&self) -> Result<Vec<Badge>, StoreError> {
        Self::down()
    }

    fn earned_badge_ids(&self, _user: &UserId) -> Result<BTreeSet<BadgeId>, StoreError> {
        Self::down()
    }

    fn insert_user_badges(&self, _user: &UserId, _badges: &[BadgeId]) -> Result<(), StoreError> {
        Self::down()
    }

    fn update_profile_score(&self, _user: &UserId, _score: u32) -> Result<(), StoreError> {
        Self::down()
    }

    fn profile_with_interests(&self, _user: &UserId) -> Result<CandidateProfile, StoreError> {
        Self::down()
    }

    fn discoverable_profiles(
        &self,
        _viewer: &UserId,
    ) -> Result<Vec<CandidateProfile>, StoreError> {
        Self::down()
    }

    fn record_activity(
        &self,
        _user: &UserId,
        _event_type: ActivityEventType,
        _description: &str,
    ) -> Result<(), StoreError> {
        Self::down()
    }
}
