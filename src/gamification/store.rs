use std::collections::BTreeSet;

use super::domain::{ActivityEventType, Badge, BadgeId, CandidateProfile, Profile, UserId};

/// Per-user collections the engine takes counts over. Each variant stands for
/// one equality-filtered count query against the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedCollection {
    Experiences,
    PortfolioItems,
    UserInterests,
    UserBadges,
    MessagesSent,
    AiAdvisorUses,
}

/// Storage port for every read/write the engine performs. Passed explicitly so
/// the core stays deterministic under test with an in-memory implementation.
pub trait GamificationStore: Send + Sync {
    fn profile(&self, user: &UserId) -> Result<Profile, StoreError>;

    fn count_owned(&self, collection: OwnedCollection, user: &UserId) -> Result<u64, StoreError>;

    fn all_badges(&self) -> Result<Vec<Badge>, StoreError>;

    fn earned_badge_ids(&self, user: &UserId) -> Result<BTreeSet<BadgeId>, StoreError>;

    /// Insert one earned-badge row per id, as a single batch. Rows are never
    /// updated or deleted afterwards.
    fn insert_user_badges(&self, user: &UserId, badges: &[BadgeId]) -> Result<(), StoreError>;

    /// Write the cached activity score onto the profile record.
    fn update_profile_score(&self, user: &UserId, score: u32) -> Result<(), StoreError>;

    fn profile_with_interests(&self, user: &UserId) -> Result<CandidateProfile, StoreError>;

    /// Profiles discoverable by the viewer: everyone except the viewer and
    /// users already linked by a connection edge in any non-declined state.
    fn discoverable_profiles(&self, viewer: &UserId)
        -> Result<Vec<CandidateProfile>, StoreError>;

    /// Append one activity feed entry.
    fn record_activity(
        &self,
        user: &UserId,
        event_type: ActivityEventType,
        description: &str,
    ) -> Result<(), StoreError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("profile not found")]
    ProfileNotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
