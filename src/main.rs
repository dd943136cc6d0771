use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use signals_engine::config::AppConfig;
use signals_engine::error::AppError;
use signals_engine::gamification::memory::{ExperienceRow, MemoryStore, PortfolioRow};
use signals_engine::gamification::{
    scoring_router, Badge, BadgeCriteria, BadgeId, InterestId, Profile, ScoringService, UserId,
    UserRole,
};
use signals_engine::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Signals Scoring Engine",
    about = "Run the Signals gamification and compatibility scoring engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Seed a small sample network and print a scored discovery feed
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Default)]
struct DemoArgs {
    /// User id whose discovery feed is rendered (defaults to the sample student)
    #[arg(long)]
    viewer: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Demo(args) => run_demo(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let store = Arc::new(MemoryStore::default());
    store.seed_badges(standard_badge_catalog());
    let service = Arc::new(ScoringService::new(store, config.scoring.weights));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(scoring_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "signals scoring engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(MemoryStore::default());
    store.seed_badges(standard_badge_catalog());
    let viewer = seed_sample_network(&store, args.viewer);

    let service = ScoringService::new(store, Default::default());
    for user in ["maya", "devon", "priya", "sam"] {
        service.on_user_state_changed(&UserId(user.to_string()))?;
    }

    let feed = service.rank_discovery_feed(&viewer)?;

    println!("Discovery feed for {}", viewer.0);
    for entry in &feed {
        println!(
            "- {} ({}) | compatibility {} | combined {} | {}",
            entry
                .candidate
                .profile
                .full_name
                .as_deref()
                .unwrap_or("unnamed"),
            UserRole::display_name(entry.candidate.profile.role),
            entry.compatibility,
            entry.combined,
            entry.strength.label(),
        );
    }

    Ok(())
}

/// The seeded badge catalog the platform ships with.
fn standard_badge_catalog() -> Vec<Badge> {
    vec![
        Badge {
            id: BadgeId(1),
            name: "Profile Pro".to_string(),
            description: "Complete your headline and bio".to_string(),
            icon_url: None,
            criteria: BadgeCriteria::Profile {
                fields: vec!["headline".to_string(), "bio".to_string()],
            },
        },
        Badge {
            id: BadgeId(2),
            name: "First Steps".to_string(),
            description: "Log your first experience".to_string(),
            icon_url: None,
            criteria: BadgeCriteria::Experience { count: 1 },
        },
        Badge {
            id: BadgeId(3),
            name: "Seasoned Explorer".to_string(),
            description: "Log three experiences".to_string(),
            icon_url: None,
            criteria: BadgeCriteria::Experience { count: 3 },
        },
        Badge {
            id: BadgeId(4),
            name: "Showcase Starter".to_string(),
            description: "Add a portfolio item".to_string(),
            icon_url: None,
            criteria: BadgeCriteria::Portfolio { count: 1 },
        },
        Badge {
            id: BadgeId(5),
            name: "Curious Mind".to_string(),
            description: "Declare three interests".to_string(),
            icon_url: None,
            criteria: BadgeCriteria::Interest { count: 3 },
        },
    ]
}

fn sample_profile(id: &str, name: &str, role: UserRole) -> Profile {
    let now = Utc::now();
    Profile {
        id: UserId(id.to_string()),
        full_name: Some(name.to_string()),
        username: Some(id.to_string()),
        headline: Some(format!("{name} on Signals")),
        bio: Some("Sample profile for the scoring demo.".to_string()),
        role: Some(role),
        activity_score: 0,
        created_at: now,
        updated_at: now,
    }
}

fn seed_sample_network(store: &MemoryStore, viewer: Option<String>) -> UserId {
    let robotics = InterestId(1);
    let design = InterestId(2);
    let data_science = InterestId(3);

    store.insert_profile(sample_profile(
        "maya",
        "Maya Okafor",
        UserRole::HighSchoolStudent,
    ));
    store.insert_profile(sample_profile(
        "devon",
        "Devon Reyes",
        UserRole::CollegeRecruiter,
    ));
    store.insert_profile(sample_profile(
        "priya",
        "Priya Raman",
        UserRole::CollegeStudent,
    ));
    store.insert_profile(sample_profile(
        "sam",
        "Sam Whitfield",
        UserRole::CorporateRecruiter,
    ));

    let maya = UserId("maya".to_string());
    let devon = UserId("devon".to_string());
    let priya = UserId("priya".to_string());

    store.declare_interest(&maya, robotics);
    store.declare_interest(&maya, design);
    store.declare_interest(&devon, robotics);
    store.declare_interest(&priya, data_science);

    store.add_experience(
        &maya,
        ExperienceRow {
            title: "Robotics club captain".to_string(),
            interest_id: Some(robotics),
        },
    );
    store.add_experience(
        &priya,
        ExperienceRow {
            title: "Data visualization internship".to_string(),
            interest_id: Some(data_science),
        },
    );
    store.add_portfolio_item(
        &maya,
        PortfolioRow {
            title: "Competition robot CAD models".to_string(),
            interest_id: Some(design),
        },
    );

    viewer.map(UserId).unwrap_or(maya)
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_network_ranks_matching_recruiter_first() {
        let store = Arc::new(MemoryStore::default());
        store.seed_badges(standard_badge_catalog());
        let viewer = seed_sample_network(&store, None);

        let service = ScoringService::new(store, Default::default());
        for user in ["maya", "devon", "priya", "sam"] {
            service
                .on_user_state_changed(&UserId(user.to_string()))
                .expect("scoring pass succeeds");
        }

        let feed = service.rank_discovery_feed(&viewer).expect("feed builds");
        assert_eq!(feed.len(), 3);
        // Devon is role-complementary and shares the robotics interest.
        assert_eq!(feed[0].candidate.profile.id, UserId("devon".to_string()));
        assert!(feed[0].compatibility >= 125);
    }

    #[test]
    fn badge_catalog_round_trips_through_json() {
        let catalog = standard_badge_catalog();
        let encoded = serde_json::to_string(&catalog).expect("serializes");
        let decoded: Vec<Badge> = serde_json::from_str(&encoded).expect("deserializes");
        assert_eq!(decoded, catalog);
    }
}
