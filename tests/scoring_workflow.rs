use std::sync::Arc;

use chrono::Utc;
use signals_engine::gamification::memory::{ExperienceRow, MemoryStore, PortfolioRow};
use signals_engine::gamification::{
    Badge, BadgeCriteria, BadgeId, GamificationStore, InterestId, Profile, ScoreWeights,
    ScoringService, SignalStrength, UserId, UserRole,
};

fn make_profile(id: &str, role: UserRole) -> Profile {
    let now = Utc::now();
    Profile {
        id: UserId(id.to_string()),
        full_name: Some(format!("User {id}")),
        username: Some(id.to_string()),
        headline: Some("On Signals".to_string()),
        bio: Some("Testing the scoring engine end to end.".to_string()),
        role: Some(role),
        activity_score: 0,
        created_at: now,
        updated_at: now,
    }
}

fn badge_catalog() -> Vec<Badge> {
    vec![
        Badge {
            id: BadgeId(1),
            name: "Profile Pro".to_string(),
            description: "Headline and bio complete".to_string(),
            icon_url: None,
            criteria: BadgeCriteria::Profile {
                fields: vec!["headline".to_string(), "bio".to_string()],
            },
        },
        Badge {
            id: BadgeId(2),
            name: "Seasoned Explorer".to_string(),
            description: "Three experiences logged".to_string(),
            icon_url: None,
            criteria: BadgeCriteria::Experience { count: 3 },
        },
    ]
}

#[test]
fn full_scoring_pass_awards_badges_updates_score_and_ranks_feed() {
    let store = Arc::new(MemoryStore::default());
    store.seed_badges(badge_catalog());

    let student = UserId("student".to_string());
    let recruiter = UserId("recruiter".to_string());
    let bystander = UserId("bystander".to_string());
    store.insert_profile(make_profile("student", UserRole::HighSchoolStudent));
    store.insert_profile(make_profile("recruiter", UserRole::CollegeRecruiter));
    store.insert_profile(make_profile("bystander", UserRole::CollegeStudent));

    let robotics = InterestId(7);
    store.declare_interest(&student, robotics);
    store.declare_interest(&recruiter, robotics);
    store.add_experience(
        &recruiter,
        ExperienceRow {
            title: "Campus outreach program".to_string(),
            interest_id: Some(robotics),
        },
    );
    store.add_portfolio_item(
        &student,
        PortfolioRow {
            title: "Robot arm build log".to_string(),
            interest_id: Some(robotics),
        },
    );

    let service = ScoringService::new(store.clone(), ScoreWeights::default());

    // First pass: profile badge earned, score reflects it immediately.
    let outcome = service
        .on_user_state_changed(&student)
        .expect("scoring pass runs");
    assert_eq!(outcome.newly_awarded, vec![BadgeId(1)]);
    // headline 5 + bio 5 + portfolio 15 + badge 25.
    assert_eq!(outcome.activity_score, 50);
    assert_eq!(
        store.profile(&student).expect("profile").activity_score,
        50
    );

    // Growing the experience log past the threshold earns the count badge
    // exactly once.
    for index in 0..3 {
        store.add_experience(
            &student,
            ExperienceRow {
                title: format!("Experience {index}"),
                interest_id: None,
            },
        );
    }
    let second = service
        .on_user_state_changed(&student)
        .expect("second pass runs");
    assert_eq!(second.newly_awarded, vec![BadgeId(2)]);
    // Previous 50 + 3 experiences (30) + second badge (25).
    assert_eq!(second.activity_score, 105);

    let third = service
        .on_user_state_changed(&student)
        .expect("third pass runs");
    assert!(third.newly_awarded.is_empty());
    assert_eq!(third.activity_score, 105);

    // Discovery feed: the recruiter shares an interest, is role-complementary,
    // and has interest-tagged content matching the student's declared interest.
    let feed = service
        .rank_discovery_feed(&student)
        .expect("feed builds");
    assert_eq!(feed.len(), 2);

    let top = &feed[0];
    assert_eq!(top.candidate.profile.id, recruiter);
    // role 100 + shared interest 25 + student's interest tagging the
    // recruiter's experience 75 + recruiter's interest tagging the student's
    // portfolio 75.
    assert_eq!(top.compatibility, 275);
    assert_eq!(top.strength, SignalStrength::High);

    assert_eq!(feed[1].candidate.profile.id, bystander);
    assert_eq!(feed[1].strength, SignalStrength::Low);
}
