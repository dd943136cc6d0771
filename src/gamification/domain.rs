use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for platform users (opaque, assigned at signup).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for badge catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BadgeId(pub i64);

/// Identifier wrapper for entries in the shared interest catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterestId(pub i64);

/// Declared role of a user, driving the complementarity rules in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    HighSchoolStudent,
    CollegeStudent,
    JobSeeker,
    CollegeRecruiter,
    CorporateRecruiter,
}

impl UserRole {
    pub const fn label(self) -> &'static str {
        match self {
            UserRole::HighSchoolStudent => "high_school_student",
            UserRole::CollegeStudent => "college_student",
            UserRole::JobSeeker => "job_seeker",
            UserRole::CollegeRecruiter => "college_recruiter",
            UserRole::CorporateRecruiter => "corporate_recruiter",
        }
    }

    /// Human-facing role name used on profile cards.
    pub const fn display_name(role: Option<UserRole>) -> &'static str {
        match role {
            Some(UserRole::HighSchoolStudent) => "High School Student",
            Some(UserRole::CollegeStudent) => "College Student",
            Some(UserRole::JobSeeker) => "Job Seeker",
            Some(UserRole::CollegeRecruiter) => "College Administrator",
            Some(UserRole::CorporateRecruiter) => "Corporate Talent Seeker",
            None => "Member",
        }
    }
}

/// User identity record. `activity_score` is a derived cache maintained by the
/// scoring orchestrator and is always recomputable from the other collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub role: Option<UserRole>,
    pub activity_score: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Whether a criteria-addressable field is present and non-empty.
    /// Unknown field names are treated as absent so criteria fail closed.
    pub fn field_is_set(&self, field: &str) -> bool {
        fn set(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|text| !text.trim().is_empty())
        }

        match field {
            "full_name" => set(&self.full_name),
            "username" => set(&self.username),
            "headline" => set(&self.headline),
            "bio" => set(&self.bio),
            "role" => self.role.is_some(),
            _ => false,
        }
    }
}

/// Badge catalog entry. The catalog is seeded once and read-only at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub criteria: BadgeCriteria,
}

/// Closed tagged representation of badge criteria. Unknown `type` tags are
/// absorbed into `Unrecognized` at the serde boundary instead of propagating
/// loose data into the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BadgeCriteria {
    Profile { fields: Vec<String> },
    Experience { count: u64 },
    Portfolio { count: u64 },
    Interest { count: u64 },
    #[serde(other)]
    Unrecognized,
}

/// Event kinds recorded on the append-only activity feed. `AiAdvisorUsed`
/// doubles as a scoring signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityEventType {
    ProfileUpdated,
    ExperienceAdded,
    PortfolioAdded,
    ConnectionAccepted,
    MessageSent,
    BadgeEarned,
    AiAdvisorUsed,
}

impl ActivityEventType {
    pub const fn label(self) -> &'static str {
        match self {
            ActivityEventType::ProfileUpdated => "profile_updated",
            ActivityEventType::ExperienceAdded => "experience_added",
            ActivityEventType::PortfolioAdded => "portfolio_added",
            ActivityEventType::ConnectionAccepted => "connection_accepted",
            ActivityEventType::MessageSent => "message_sent",
            ActivityEventType::BadgeEarned => "badge_earned",
            ActivityEventType::AiAdvisorUsed => "ai_advisor_used",
        }
    }
}

/// Status of a connection edge between two users. Any non-declined edge
/// (pending included) removes the pair from each other's discovery feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Declined,
    Blocked,
}

/// Profile enriched with the interest sets the compatibility calculator
/// consumes: declared interests plus the interest tags on the user's
/// experiences and portfolio items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub profile: Profile,
    pub interest_ids: BTreeSet<InterestId>,
    pub experience_interest_tags: BTreeSet<InterestId>,
    pub portfolio_interest_tags: BTreeSet<InterestId>,
}

impl CandidateProfile {
    pub fn bare(profile: Profile) -> Self {
        Self {
            profile,
            interest_ids: BTreeSet::new(),
            experience_interest_tags: BTreeSet::new(),
            portfolio_interest_tags: BTreeSet::new(),
        }
    }
}
