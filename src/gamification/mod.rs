//! Gamification engine: activity scoring, badge awarding, and pairwise
//! compatibility ranking for the discovery feed.
//!
//! Every state-changing action in the surrounding application invokes the
//! [`ScoringService`] afterwards; the service awards any newly qualifying
//! badges, recomputes the activity score on the new state (badges included),
//! and persists the score back onto the profile. Compatibility is computed
//! fresh at feed render time and never cached.

pub mod badges;
pub mod compatibility;
pub mod domain;
pub mod memory;
pub mod router;
pub mod score;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use badges::{award_eligible_badges, criteria_satisfied};
pub use compatibility::{
    compatibility_score, rank_candidates, RankedCandidate, SignalStrength,
};
pub use domain::{
    ActivityEventType, Badge, BadgeCriteria, BadgeId, CandidateProfile, ConnectionStatus,
    InterestId, Profile, UserId, UserRole,
};
pub use memory::MemoryStore;
pub use router::scoring_router;
pub use score::{compute_activity_score, ScoreWeights};
pub use service::{ScoringError, ScoringService, StateChangeOutcome};
pub use store::{GamificationStore, OwnedCollection, StoreError};
