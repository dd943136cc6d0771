use serde::{Deserialize, Serialize};

use super::domain::{CandidateProfile, UserRole};

const ROLE_MATCH_POINTS: u32 = 100;
const SHARED_INTEREST_POINTS: u32 = 25;
const CONTENT_MATCH_POINTS: u32 = 75;

/// Pairwise compatibility between two enriched profiles. Symmetric by
/// construction: every term is either a set intersection or a role rule
/// checked in both directions. Empty interest/tag sets contribute zero.
pub fn compatibility_score(a: &CandidateProfile, b: &CandidateProfile) -> u32 {
    let mut score = 0;

    if roles_complement(a.profile.role, b.profile.role) {
        score += ROLE_MATCH_POINTS;
    }

    let shared = a.interest_ids.intersection(&b.interest_ids).count() as u32;
    score += shared * SHARED_INTEREST_POINTS;

    // Declared interest on one side matching interest-tagged content on the
    // other, counted once per interest id in each of the four directions.
    let cross = a.interest_ids.intersection(&b.experience_interest_tags).count()
        + a.interest_ids.intersection(&b.portfolio_interest_tags).count()
        + b.interest_ids.intersection(&a.experience_interest_tags).count()
        + b.interest_ids.intersection(&a.portfolio_interest_tags).count();
    score += cross as u32 * CONTENT_MATCH_POINTS;

    score
}

/// The two complementarity pairs, each checked in both directions. Roles are
/// mutually exclusive per user so at most one rule fires per comparison.
fn roles_complement(a: Option<UserRole>, b: Option<UserRole>) -> bool {
    let pair = |x: Option<UserRole>, y: Option<UserRole>| match (x, y) {
        (Some(UserRole::HighSchoolStudent), Some(UserRole::CollegeRecruiter)) => true,
        (
            Some(UserRole::CollegeStudent | UserRole::JobSeeker),
            Some(UserRole::CorporateRecruiter),
        ) => true,
        _ => false,
    };

    pair(a, b) || pair(b, a)
}

/// Qualitative tier a compatibility score renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStrength {
    Low,
    Medium,
    High,
}

impl SignalStrength {
    /// Tier thresholds are part of the scoring contract: `<100` low,
    /// `100..200` medium, `>=200` high.
    pub const fn classify(score: u32) -> Self {
        match score {
            0..=99 => SignalStrength::Low,
            100..=199 => SignalStrength::Medium,
            _ => SignalStrength::High,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SignalStrength::Low => "Low Signal",
            SignalStrength::Medium => "Medium Signal",
            SignalStrength::High => "High Signal",
        }
    }

    /// Display weight hint for the rendering layer.
    pub const fn emphasis(self) -> &'static str {
        match self {
            SignalStrength::Low => "muted",
            SignalStrength::Medium => "standard",
            SignalStrength::High => "strong",
        }
    }
}

/// A discovery-feed candidate with its computed scores attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate: CandidateProfile,
    pub compatibility: u32,
    /// Compatibility plus the candidate's cached activity score; the feed
    /// ordering key.
    pub combined: u32,
    pub strength: SignalStrength,
}

/// Score each candidate against the viewer and order the feed descending by
/// combined value. The sort is stable, so candidates tied on combined value
/// keep their fetch order.
pub fn rank_candidates(
    viewer: &CandidateProfile,
    candidates: Vec<CandidateProfile>,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let compatibility = compatibility_score(viewer, &candidate);
            let combined = compatibility + candidate.profile.activity_score;
            RankedCandidate {
                strength: SignalStrength::classify(compatibility),
                candidate,
                compatibility,
                combined,
            }
        })
        .collect();

    ranked.sort_by(|left, right| right.combined.cmp(&left.combined));
    ranked
}
