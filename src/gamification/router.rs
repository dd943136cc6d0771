use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::UserId;
use super::service::{ScoringError, ScoringService};
use super::store::{GamificationStore, StoreError};

/// Router builder exposing the scoring endpoints the application's action
/// handlers call after their own mutations.
pub fn scoring_router<S>(service: Arc<ScoringService<S>>) -> Router
where
    S: GamificationStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/users/:user_id/score/recalculate",
            post(recalculate_handler::<S>),
        )
        .route(
            "/api/v1/users/:user_id/ai-activity",
            post(ai_activity_handler::<S>),
        )
        .route("/api/v1/users/:user_id/score", get(score_handler::<S>))
        .route(
            "/api/v1/users/:user_id/discovery-feed",
            get(discovery_feed_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn recalculate_handler<S>(
    State(service): State<Arc<ScoringService<S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: GamificationStore + 'static,
{
    let user = UserId(user_id);
    match service.on_user_state_changed(&user) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ai_activity_handler<S>(
    State(service): State<Arc<ScoringService<S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: GamificationStore + 'static,
{
    let user = UserId(user_id);
    match service.log_ai_advisor_use(&user) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<ScoringService<S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: GamificationStore + 'static,
{
    let user = UserId(user_id);
    match service.activity_score(&user) {
        Ok(score) => {
            let payload = json!({
                "user_id": user.0,
                "activity_score": score,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn discovery_feed_handler<S>(
    State(service): State<Arc<ScoringService<S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: GamificationStore + 'static,
{
    let user = UserId(user_id);
    match service.rank_discovery_feed(&user) {
        Ok(ranked) => {
            let entries: Vec<_> = ranked
                .into_iter()
                .map(|entry| {
                    json!({
                        "profile": entry.candidate.profile,
                        "compatibility": entry.compatibility,
                        "combined": entry.combined,
                        "strength": entry.strength.label(),
                        "emphasis": entry.strength.emphasis(),
                    })
                })
                .collect();
            (StatusCode::OK, axum::Json(json!({ "candidates": entries }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: ScoringError) -> Response {
    let status = match &error {
        ScoringError::Store(StoreError::ProfileNotFound) => StatusCode::NOT_FOUND,
        ScoringError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
